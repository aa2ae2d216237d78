//! A string value mirrored into key-value storage.

use std::sync::Arc;

use super::storage::{KeyValueStorage, StorageError};
use crate::hooks::StateCell;
use crate::mvi::Subscription;

/// Observed string state that writes itself back to storage on every change.
///
/// The initial value is the stored one if the key exists, otherwise the
/// caller's initializer. Storage failures after load are logged and leave
/// the in-memory value as set.
pub struct PersistedValue {
    key: String,
    cell: StateCell<String>,
    _writer: Subscription,
}

impl PersistedValue {
    pub fn load<F>(
        storage: Arc<dyn KeyValueStorage>,
        key: impl Into<String>,
        initial: F,
    ) -> Result<Self, StorageError>
    where
        F: FnOnce() -> String,
    {
        let key = key.into();
        let value = match storage.read(&key)? {
            Some(saved) => {
                tracing::debug!(key = %key, "Restored persisted value");
                saved
            }
            None => initial(),
        };
        storage.write(&key, &value)?;

        let cell = StateCell::new(value);
        let writer_key = key.clone();
        let writer = cell.watch(move |value: &String| {
            if let Err(err) = storage.write(&writer_key, value) {
                tracing::warn!(key = %writer_key, error = %err, "Failed to persist value");
            }
        });

        Ok(Self {
            key,
            cell,
            _writer: writer,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> String {
        self.cell.get()
    }

    pub fn set(&self, value: impl Into<String>) {
        self.cell.set(value.into());
    }

    /// The underlying observed cell, for watchers.
    pub fn cell(&self) -> &StateCell<String> {
        &self.cell
    }
}
