use std::io::{self, Write};

use super::{Lesson, ShellError};
use crate::context::theme_styles;
use crate::hooks::{ByRef, Memo};

/// `number * 2`, after a busy loop of `iterations` steps.
pub fn slow_double(number: i64, iterations: u64) -> i64 {
    tracing::debug!(number, iterations, "Calling slow function");
    let mut spin = 0u64;
    for step in 0..iterations {
        spin = std::hint::black_box(spin.wrapping_add(step));
    }
    std::hint::black_box(spin);
    number.saturating_mul(2)
}

/// Memoized slow computation next to an unrelated theme toggle.
///
/// The second half keys a memo on a `{ value }` wrapper compared by identity.
/// A wrapper rebuilt on every render defeats the memo; memoizing the wrapper
/// itself restores it.
pub struct MemoLesson {
    number: i64,
    dark: bool,
    iterations: u64,
    double: Memo<i64, i64>,
    stable_wrapper: bool,
    wrapper: Memo<i64, ByRef<i64>>,
    wrapped_double: Memo<ByRef<i64>, i64>,
}

impl MemoLesson {
    pub fn new(iterations: u64) -> Self {
        Self {
            number: 0,
            dark: false,
            iterations,
            double: Memo::new(),
            stable_wrapper: true,
            wrapper: Memo::new(),
            wrapped_double: Memo::new(),
        }
    }

    /// Slow computations keyed on the number itself.
    pub fn computations(&self) -> usize {
        self.double.computations()
    }

    /// Slow computations keyed on the `{ value }` wrapper.
    pub fn wrapped_computations(&self) -> usize {
        self.wrapped_double.computations()
    }
}

impl Lesson for MemoLesson {
    fn title(&self) -> &'static str {
        "useMemo: slow function"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("set <n>", "change the input number"),
            ("theme", "toggle the theme (does not touch the number)"),
            ("wrapper", "switch between a memoized and a fresh { value } wrapper"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let iterations = self.iterations;
        let doubled = *self
            .double
            .get(self.number, |&n| slow_double(n, iterations));

        let wrapper = if self.stable_wrapper {
            self.wrapper.get(self.number, |&n| ByRef::new(n)).clone()
        } else {
            ByRef::new(self.number)
        };
        let wrapped = *self
            .wrapped_double
            .get(wrapper, |value| slow_double(**value, iterations));

        let styles = theme_styles(self.dark);
        writeln!(out, "[{} theme] Double Number: {doubled}", styles.label)?;
        writeln!(
            out,
            "slow calls: {} by value, {} by {} wrapper (doubled {wrapped})",
            self.computations(),
            self.wrapped_computations(),
            if self.stable_wrapper { "memoized" } else { "fresh" },
        )
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "set" => {
                self.number = super::int_arg(args, "set <n>")?;
                Ok(())
            }
            "theme" => {
                self.dark = !self.dark;
                Ok(())
            }
            "wrapper" => {
                self.stable_wrapper = !self.stable_wrapper;
                Ok(())
            }
            _ => Err(ShellError::UnknownCommand(command.to_string())),
        }
    }
}
