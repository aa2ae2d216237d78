//! Reducer-driven store.
//!
//! ```text
//! dispatch(action) ─→ reduce(state, action) ─→ swap snapshot ─→ notify observers
//!        ↑                                                            │
//!        └──────────── observers may dispatch (queued) ───────────────┘
//! ```
//!
//! Snapshots are immutable `Arc`s. Observers run after the swap, once per
//! processed action.

mod action;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use reducer::Reducer;
pub use state::StoreState;
pub use store::{Store, Subscription};
