//! Item id generation.
//!
//! Ids are minted outside the reducer and carried in the `ADD_ITEM` payload.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Identifier of a cart line, unique among the items a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Source of fresh item ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ItemId;
}

/// Time-based ids in milliseconds that never repeat within a process.
///
/// Two ids minted in the same millisecond would collide on a bare clock
/// reading, so each id is at least one greater than the previous.
pub struct MonotonicIds {
    last: AtomicU64,
    clock: fn() -> u64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    /// Use a custom millisecond clock (tests pin it to a constant).
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock,
        }
    }
}

impl Default for MonotonicIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MonotonicIds {
    fn next_id(&self) -> ItemId {
        let now = (self.clock)();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return ItemId(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}

/// Counter ids starting at 1. Deterministic, used by tests and scripted demos.
#[derive(Default)]
pub struct SequentialIds {
    last: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> ItemId {
        ItemId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
