use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Lesson, ShellError};
use crate::context::{
    provide_theme, theme_styles, use_theme, use_toggle_theme, watch_theme, Scope, ToggleTheme,
};
use crate::mvi::Subscription;

/// A themed panel that reads the flag and a button that only toggles it.
///
/// Both consumers resolve their values from the provider scope. Only the
/// panel watches the flag, so only the panel re-renders on a toggle.
pub struct ThemeLesson {
    root: Scope,
    scope: Scope,
    toggle: ToggleTheme,
    panel_renders: Arc<AtomicUsize>,
    _panel: Subscription,
}

impl ThemeLesson {
    pub fn new(dark: bool) -> Result<Self, ShellError> {
        let root = Scope::root();
        let scope = provide_theme(&root, dark);

        let panel_renders = Arc::new(AtomicUsize::new(1));
        let counter = Arc::clone(&panel_renders);
        let panel = watch_theme(&scope, move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })?;
        let toggle = use_toggle_theme(&scope)?;

        Ok(Self {
            root,
            scope,
            toggle,
            panel_renders,
            _panel: panel,
        })
    }

    pub fn dark(&self) -> Result<bool, ShellError> {
        Ok(use_theme(&self.scope)?)
    }

    /// Times the theme-reading panel has rendered, including mount.
    pub fn panel_renders(&self) -> usize {
        self.panel_renders.load(Ordering::Relaxed)
    }
}

impl Lesson for ThemeLesson {
    fn title(&self) -> &'static str {
        "useContext: theme"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("toggle", "switch between dark and light"),
            ("orphan", "read the theme outside its provider"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        match use_theme(&self.scope) {
            Ok(dark) => {
                let styles = theme_styles(dark);
                writeln!(
                    out,
                    "[{} theme] background {} color {}",
                    styles.label, styles.background, styles.color
                )?;
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }
        writeln!(
            out,
            "panel renders: {}  button renders: 1",
            self.panel_renders()
        )
    }

    fn execute(
        &mut self,
        command: &str,
        _args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "toggle" => {
                self.toggle.toggle();
                Ok(())
            }
            "orphan" => {
                use_theme(&self.root)?;
                Ok(())
            }
            _ => Err(ShellError::UnknownCommand(command.to_string())),
        }
    }
}
