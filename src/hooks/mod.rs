//! Component-local primitives: observed state, incidental references,
//! memoization, and effects with cleanup.
//!
//! Observed state ([`StateCell`]) participates in change notification;
//! incidental storage ([`InstanceRef`]) never does. They are distinct types
//! so the difference is visible at every use site.

mod effect;
mod logger;
mod memo;
mod reference;
mod state;

pub use effect::{Cleanup, EffectSlot};
pub use logger::UpdateLogger;
pub use memo::{ByRef, CallbackMemo, Memo, MemoCallback};
pub use reference::InstanceRef;
pub use state::{StateCell, ValueAction, ValueReducer};
