use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Lesson, ShellError};
use crate::channels::{KeyValueStorage, PersistedValue};
use crate::context::{provide_value_context, use_value_context, Scope, ValueContext};
use crate::hooks::UpdateLogger;
use crate::mvi::Subscription;

/// Custom hooks: a name persisted to storage and logged on change, plus a
/// counter shared through its own context accessor.
pub struct NameLesson {
    name: PersistedValue,
    logger: UpdateLogger<String>,
    counter: ValueContext,
    reader_renders: Arc<AtomicUsize>,
    _reader: Subscription,
}

impl NameLesson {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: &str) -> Result<Self, ShellError> {
        let name = PersistedValue::load(storage, key, String::new)?;
        let scope = provide_value_context(&Scope::root(), 0);
        let counter = use_value_context(&scope)?;

        let reader_renders = Arc::new(AtomicUsize::new(1));
        let renders = Arc::clone(&reader_renders);
        let reader = counter.watch(move |_| {
            renders.fetch_add(1, Ordering::Relaxed);
        });

        Ok(Self {
            name,
            logger: UpdateLogger::new("name"),
            counter,
            reader_renders,
            _reader: reader,
        })
    }

    pub fn name(&self) -> String {
        self.name.get()
    }

    pub fn count(&self) -> i64 {
        self.counter.count()
    }

    /// Renders of the component that reads the shared counter.
    pub fn reader_renders(&self) -> usize {
        self.reader_renders.load(Ordering::Relaxed)
    }
}

impl Lesson for NameLesson {
    fn title(&self) -> &'static str {
        "Custom hooks: persisted name and value context"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("name <text...>", "set the saved name"),
            ("clear", "empty the saved name"),
            ("increment", "bump the shared counter"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let name = self.name.get();
        self.logger.observe(&name);
        writeln!(out, "Name ({}): {}", self.name.key(), name)?;
        writeln!(
            out,
            "Example Component 1: {} (renders {})",
            self.counter.count(),
            self.reader_renders()
        )?;
        writeln!(out, "Example Component 2 (renders 1)")
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
            "increment" => self.counter.increment(),
            _ => return Err(ShellError::UnknownCommand(command.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::MemoryStorage;
    use crate::shell::run_lesson;

    #[test]
    fn name_survives_a_new_session() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());

        let mut first = NameLesson::new(Arc::clone(&storage), "name").unwrap();
        let mut out = Vec::new();
        run_lesson(&mut first, "name Ada Lovelace\n".as_bytes(), &mut out).unwrap();
        drop(first);

        let second = NameLesson::new(storage, "name").unwrap();
        assert_eq!(second.name(), "Ada Lovelace");
    }

    #[test]
    fn increment_rerenders_only_the_reader() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let mut lesson = NameLesson::new(storage, "name").unwrap();
        let mut out = Vec::new();
        run_lesson(&mut lesson, "increment\nincrement\n".as_bytes(), &mut out).unwrap();
        assert_eq!(lesson.count(), 2);
        assert_eq!(lesson.reader_renders(), 3);
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("Example Component 1: 2 (renders 3)\nExample Component 2 (renders 1)\n"));
    }
}
