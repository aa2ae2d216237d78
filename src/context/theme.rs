//! Dark/light theme shared through two contexts: one for the flag, one for
//! the toggler, so consumers that only toggle never read the flag.

use std::sync::Arc;

use super::scope::{ContextError, ContextKey, Scope};
use crate::hooks::StateCell;
use crate::mvi::Subscription;

/// Context key for the dark-theme flag.
pub enum ThemeContext {}

impl ContextKey for ThemeContext {
    type Value = StateCell<bool>;
    const NAME: &'static str = "use_theme";
}

/// Context key for the theme toggler.
pub enum ThemeUpdateContext {}

impl ContextKey for ThemeUpdateContext {
    type Value = ToggleTheme;
    const NAME: &'static str = "use_toggle_theme";
}

/// Flips the shared dark-theme flag.
#[derive(Clone)]
pub struct ToggleTheme(Arc<dyn Fn() + Send + Sync>);

impl ToggleTheme {
    pub fn toggle(&self) {
        (self.0)()
    }
}

/// Bind a fresh theme cell (and its toggler) below `parent`.
pub fn provide_theme(parent: &Scope, dark: bool) -> Scope {
    let cell = StateCell::new(dark);
    let target = cell.clone();
    let toggle = ToggleTheme(Arc::new(move || target.update(|dark| !dark)));
    parent
        .provide::<ThemeContext>(cell)
        .provide::<ThemeUpdateContext>(toggle)
}

/// Current dark-theme flag.
pub fn use_theme(scope: &Scope) -> Result<bool, ContextError> {
    Ok(scope.get::<ThemeContext>()?.get())
}

pub fn use_toggle_theme(scope: &Scope) -> Result<ToggleTheme, ContextError> {
    scope.get::<ThemeUpdateContext>()
}

/// Re-render hook for consumers that read the theme.
///
/// Only consumers that call this are notified on change.
pub fn watch_theme<F>(scope: &Scope, on_change: F) -> Result<Subscription, ContextError>
where
    F: Fn(bool) + Send + Sync + 'static,
{
    let cell = scope.get::<ThemeContext>()?;
    Ok(cell.watch(move |dark| on_change(*dark)))
}

/// Colours for a themed panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyles {
    pub background: &'static str,
    pub color: &'static str,
    pub label: &'static str,
}

pub fn theme_styles(dark: bool) -> ThemeStyles {
    if dark {
        ThemeStyles {
            background: "#333",
            color: "#FFF",
            label: "Dark",
        }
    } else {
        ThemeStyles {
            background: "#CCC",
            color: "#333",
            label: "Light",
        }
    }
}
