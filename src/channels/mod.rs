//! Side channels: external systems the stores consume but do not own.
//!
//! None of these are touched from inside a reducer. Their results are fed
//! back into stores as ordinary dispatches.

pub mod feed;
pub mod network;
pub mod persisted;
pub mod storage;
pub mod viewport;

pub use feed::{FeedAction, FeedReducer, FeedState, FeedStore, ResourceFeed};
pub use network::{FetchError, HttpFetcher, Record, ResourceFetcher, RESOURCES};
pub use persisted::PersistedValue;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use viewport::{ManualViewport, ResizeSubscription, TerminalViewport, Viewport, WidthReadout};
