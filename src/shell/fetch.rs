use std::io::{self, Write};
use std::sync::Arc;

use tokio::runtime::Handle;

use super::{Lesson, ShellError};
use crate::channels::{ResourceFeed, ResourceFetcher, RESOURCES};

const SELECT_USAGE: &str = "select <posts|users|comments>";

/// Fetch-on-change: picking a resource issues one request and shows the
/// first few records.
///
/// Commands block on `runtime` until the request settles, so this must not
/// be driven from inside an async task.
pub struct FetchLesson {
    runtime: Handle,
    feed: ResourceFeed,
}

impl FetchLesson {
    pub fn new(
        runtime: Handle,
        fetcher: Arc<dyn ResourceFetcher>,
        resource: &str,
        limit: usize,
    ) -> Self {
        let feed = ResourceFeed::mount(runtime.clone(), fetcher, resource, limit);
        runtime.block_on(feed.settled());
        Self { runtime, feed }
    }

    pub fn feed(&self) -> &ResourceFeed {
        &self.feed
    }

    fn select(&mut self, resource: &str) {
        self.feed.select(resource);
        self.runtime.block_on(self.feed.settled());
    }
}

impl Lesson for FetchLesson {
    fn title(&self) -> &'static str {
        "useEffect: fetch on change"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (SELECT_USAGE, "switch resource and refetch"),
            ("posts | users | comments", "shorthand for select"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let state = self.feed.store().get_state();
        let tabs: Vec<String> = RESOURCES
            .iter()
            .map(|resource| {
                if *resource == state.resource {
                    format!("[{resource}]")
                } else {
                    resource.to_string()
                }
            })
            .collect();
        writeln!(out, "{}  (requests: {})", tabs.join(" "), self.feed.requests())?;

        if let Some(error) = &state.error {
            writeln!(out, "error: {error}")?;
        }
        for record in &state.records {
            writeln!(out, "  {record}")?;
        }
        Ok(())
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        let resource = match (command, args) {
            ("select", [resource]) => *resource,
            ("select", _) => return Err(ShellError::Usage(SELECT_USAGE)),
            (resource, []) if RESOURCES.contains(&resource) => resource,
            _ => return Err(ShellError::UnknownCommand(command.to_string())),
        };
        if !RESOURCES.contains(&resource) {
            return Err(ShellError::Usage(SELECT_USAGE));
        }
        self.select(resource);
        Ok(())
    }
}
