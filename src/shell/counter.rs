use std::io::{self, Write};

use super::{Lesson, ShellError};
use crate::hooks::StateCell;
use crate::mvi::StoreState;

/// Object state where each update replaces one field and keeps the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pets {
    pub count: i64,
    pub animal: String,
}

impl StoreState for Pets {}

impl Default for Pets {
    fn default() -> Self {
        Self {
            count: 0,
            animal: "cats".to_string(),
        }
    }
}

/// Score counter and a `{ count, animal }` record, both changed through
/// functional updates.
pub struct CounterLesson {
    score: StateCell<i64>,
    pets: StateCell<Pets>,
}

impl CounterLesson {
    pub fn new() -> Self {
        Self {
            score: StateCell::new(0),
            pets: StateCell::new(Pets::default()),
        }
    }

    pub fn score(&self) -> i64 {
        self.score.get()
    }

    pub fn pets(&self) -> Pets {
        self.pets.get()
    }
}

impl Default for CounterLesson {
    fn default() -> Self {
        Self::new()
    }
}

impl Lesson for CounterLesson {
    fn title(&self) -> &'static str {
        "useState: counters"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("up [times]", "increment the score"),
            ("down [times]", "decrement the score"),
            ("pet-up", "one more pet"),
            ("pet-down", "one pet fewer"),
            ("animal <name>", "change the animal, keeping the count"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let pets = self.pets.snapshot();
        writeln!(out, "Score: {}", self.score.get())?;
        writeln!(out, "{} {}", pets.count, pets.animal)
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "up" | "down" => {
                let times = match args {
                    [] => 1,
                    _ => super::int_arg(args, "up|down [times]")?,
                };
                let step = if command == "up" { 1 } else { -1 };
                // Each update sees the previous one's result, so repeats add up.
                for _ in 0..times.max(0) {
                    self.score.update(move |score| score + step);
                }
                Ok(())
            }
            "pet-up" => {
                self.pets.update(|pets| Pets {
                    count: pets.count + 1,
                    ..pets.clone()
                });
                Ok(())
            }
            "pet-down" => {
                self.pets.update(|pets| Pets {
                    count: pets.count - 1,
                    ..pets.clone()
                });
                Ok(())
            }
            "animal" => {
                if args.is_empty() {
                    return Err(ShellError::Usage("animal <name>"));
                }
                let animal = args.join(" ");
                self.pets.update(move |pets| Pets {
                    animal,
                    ..pets.clone()
                });
                Ok(())
            }
            _ => Err(ShellError::UnknownCommand(command.to_string())),
        }
    }
}
