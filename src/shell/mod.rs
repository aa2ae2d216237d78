//! Line-driven lesson runner.
//!
//! Each lesson owns its stores and side channels. The runner feeds it one
//! command per input line and prints the lesson's view after every command
//! that succeeds. `help` lists the lesson's commands, `quit` ends it.

mod callback;
mod cart;
mod counter;
mod fetch;
mod memo;
mod name;
mod refs;
mod theme;
mod width;

pub use callback::{items_for, CallbackLesson};
pub use cart::CartLesson;
pub use counter::{CounterLesson, Pets};
pub use fetch::FetchLesson;
pub use memo::{slow_double, MemoLesson};
pub use name::NameLesson;
pub use refs::RefsLesson;
pub use theme::ThemeLesson;
pub use width::WidthLesson;

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::cart::{ActionError, PriceError};
use crate::channels::StorageError;
use crate::context::ContextError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// One interactive example.
pub trait Lesson {
    fn title(&self) -> &'static str;

    /// `(usage, description)` for every command the lesson accepts.
    fn commands(&self) -> &'static [(&'static str, &'static str)];

    /// Print the current view.
    fn render(&mut self, out: &mut dyn Write) -> io::Result<()>;

    /// Apply one command. `args` are the whitespace-separated words after it.
    fn execute(&mut self, command: &str, args: &[&str], out: &mut dyn Write)
        -> Result<(), ShellError>;
}

/// Drive `lesson` from `input` until `quit` or end of input.
///
/// Command errors are printed and the session continues; only I/O errors on
/// `input` or `out` end it early.
pub fn run_lesson<L>(lesson: &mut L, input: impl BufRead, out: &mut dyn Write) -> io::Result<()>
where
    L: Lesson + ?Sized,
{
    writeln!(out, "== {} ==", lesson.title())?;
    lesson.render(out)?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "quit" | "exit" => break,
            "help" => print_help(lesson, out)?,
            _ => match lesson.execute(command, &args, out) {
                Ok(()) => lesson.render(out)?,
                Err(ShellError::Io(err)) => return Err(err),
                Err(err) => {
                    tracing::debug!(command, error = %err, "Command rejected");
                    writeln!(out, "error: {err}")?;
                }
            },
        }
        out.flush()?;
    }
    Ok(())
}

fn print_help<L>(lesson: &L, out: &mut dyn Write) -> io::Result<()>
where
    L: Lesson + ?Sized,
{
    for (usage, description) in lesson.commands() {
        writeln!(out, "  {usage:<24} {description}")?;
    }
    writeln!(out, "  {:<24} {}", "help", "show this list")?;
    writeln!(out, "  {:<24} {}", "quit", "leave the lesson")
}

/// Parse a single integer argument.
fn int_arg(args: &[&str], usage: &'static str) -> Result<i64, ShellError> {
    match args {
        [value] => value.parse().map_err(|_| ShellError::Usage(usage)),
        _ => Err(ShellError::Usage(usage)),
    }
}
