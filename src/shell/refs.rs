use std::io::{self, Write};

use super::{Lesson, ShellError};
use crate::hooks::{Cleanup, EffectSlot, InstanceRef, StateCell};

/// Name input with a render counter and the previous name, both kept in
/// refs so updating them never triggers another render.
pub struct RefsLesson {
    name: StateCell<String>,
    render_count: InstanceRef<usize>,
    prev_name: InstanceRef<String>,
    count_renders: EffectSlot<()>,
    track_name: EffectSlot<String>,
}

impl RefsLesson {
    pub fn new() -> Self {
        Self {
            name: StateCell::new(String::new()),
            render_count: InstanceRef::new(0),
            prev_name: InstanceRef::new(String::new()),
            count_renders: EffectSlot::every(),
            track_name: EffectSlot::new(),
        }
    }

    pub fn render_count(&self) -> usize {
        self.render_count.current()
    }

    pub fn prev_name(&self) -> String {
        self.prev_name.current()
    }
}

impl Default for RefsLesson {
    fn default() -> Self {
        Self::new()
    }
}

fn or_dots(value: &str) -> &str {
    if value.is_empty() {
        "..."
    } else {
        value
    }
}

impl Lesson for RefsLesson {
    fn title(&self) -> &'static str {
        "useRef: render count and previous value"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("name <text...>", "type a name"),
            ("clear", "empty the name"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let name = self.name.get();
        // The view shows the refs as they were before this render's effects.
        writeln!(
            out,
            "Your name is: {} but it used to be {}",
            or_dots(&name),
            or_dots(&self.prev_name.current())
        )?;
        writeln!(out, "Render count: {}", self.render_count.current())?;

        let render_count = self.render_count.clone();
        self.count_renders.run((), move |_| {
            render_count.with_mut(|count| *count += 1);
            Cleanup::none()
        });
        let prev_name = self.prev_name.clone();
        self.track_name.run(name, move |name| {
            prev_name.set_current(name.clone());
            Cleanup::none()
        });
        Ok(())
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "name" if !args.is_empty() => self.name.set(args.join(" ")),
            "name" => return Err(ShellError::Usage("name <text...>")),
            "clear" => self.name.set(String::new()),
            _ => return Err(ShellError::UnknownCommand(command.to_string())),
        }
        Ok(())
    }
}
