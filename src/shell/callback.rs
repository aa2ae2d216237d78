use std::io::{self, Write};
use std::sync::Arc;

use super::{Lesson, ShellError};
use crate::context::theme_styles;
use crate::hooks::{ByRef, CallbackMemo, Cleanup, EffectSlot, MemoCallback};

/// The three consecutive numbers starting at `number`.
pub fn items_for(number: i64) -> Vec<i64> {
    vec![number, number.saturating_add(1), number.saturating_add(2)]
}

type ItemsFn = dyn Fn() -> Vec<i64> + Send + Sync;

/// A list that refreshes its items whenever the `get_items` callback it was
/// handed has a new identity.
///
/// With the callback memoized on `number`, toggling the theme leaves the
/// list alone. Switching to a fresh closure per render refreshes it every time.
pub struct CallbackLesson {
    number: i64,
    dark: bool,
    memoized: bool,
    callbacks: CallbackMemo<i64, Vec<i64>>,
    list_effect: EffectSlot<ByRef<ItemsFn>>,
    items: Vec<i64>,
}

impl CallbackLesson {
    pub fn new() -> Self {
        Self {
            number: 0,
            dark: false,
            memoized: true,
            callbacks: CallbackMemo::new(),
            list_effect: EffectSlot::new(),
            items: Vec::new(),
        }
    }

    /// Times the list has refreshed its items.
    pub fn list_updates(&self) -> usize {
        self.list_effect.runs()
    }

    pub fn items(&self) -> &[i64] {
        &self.items
    }
}

impl Default for CallbackLesson {
    fn default() -> Self {
        Self::new()
    }
}

impl Lesson for CallbackLesson {
    fn title(&self) -> &'static str {
        "useCallback: item list"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("set <n>", "change the input number"),
            ("inc", "number + 1"),
            ("dec", "number - 1"),
            ("theme", "toggle the theme"),
            ("memo", "switch between a memoized and a fresh callback"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let get_items: MemoCallback<Vec<i64>> = if self.memoized {
            self.callbacks.get(self.number, |&n| move || items_for(n))
        } else {
            let n = self.number;
            Arc::new(move || items_for(n))
        };

        let items = &mut self.items;
        self.list_effect.run(ByRef(get_items), |get_items| {
            *items = get_items();
            tracing::debug!("Items updated");
            Cleanup::none()
        });

        let styles = theme_styles(self.dark);
        writeln!(out, "[{} theme]", styles.label)?;
        for item in &self.items {
            writeln!(out, "  Item: {item}")?;
        }
        writeln!(
            out,
            "list updates: {} ({} callback)",
            self.list_updates(),
            if self.memoized { "memoized" } else { "fresh" }
        )
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "set" => self.number = super::int_arg(args, "set <n>")?,
            "inc" => self.number = self.number.saturating_add(1),
            "dec" => self.number = self.number.saturating_sub(1),
            "theme" => self.dark = !self.dark,
            "memo" => self.memoized = !self.memoized,
            _ => return Err(ShellError::UnknownCommand(command.to_string())),
        }
        Ok(())
    }
}
