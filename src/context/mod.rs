//! Shared values scoped to a subtree.
//!
//! A provider puts a capability into a [`Scope`]; the scope is passed down
//! the call chain explicitly. Accessors are typed functions over the scope and
//! fail with [`ContextError::Unbound`] when no enclosing provider bound the
//! context. There is no ambient default.

mod counter;
mod scope;
mod theme;

pub use counter::{provide_value_context, use_value_context, ValueContext};
pub use scope::{ContextError, ContextKey, Scope};
pub use theme::{
    provide_theme, theme_styles, use_theme, use_toggle_theme, watch_theme, ThemeContext, ThemeStyles,
    ThemeUpdateContext, ToggleTheme,
};
