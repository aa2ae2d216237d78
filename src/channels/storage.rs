//! Key-value string storage.
//!
//! No transactions, no expiry, no namespacing beyond the key itself.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse storage file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write storage file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait KeyValueStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage, mainly for tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object file.
///
/// Each access takes an advisory lock on the file (shared for reads,
/// exclusive for read-modify-write), so concurrent processes do not lose
/// each other's keys.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, source: std::io::Error) -> StorageError {
        StorageError::ReadError {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::WriteError {
            path: self.path.clone(),
            source,
        }
    }

    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>, StorageError> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(content).map_err(|source| StorageError::ParseError {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.read_error(err)),
        };
        file.lock_shared().map_err(|e| self.read_error(e))?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        let _ = FileExt::unlock(&file);
        read.map_err(|e| self.read_error(e))?;

        Ok(self.parse(&content)?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.lock_exclusive().map_err(|e| self.write_error(e))?;

        let result = (|| {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| self.read_error(e))?;
            let mut entries = self.parse(&content)?;
            entries.insert(key.to_string(), value.to_string());

            let json = serde_json::to_string_pretty(&entries).map_err(|source| {
                StorageError::ParseError {
                    path: self.path.clone(),
                    source,
                }
            })?;
            file.set_len(0).map_err(|e| self.write_error(e))?;
            file.seek(SeekFrom::Start(0))
                .map_err(|e| self.write_error(e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| self.write_error(e))?;
            file.flush().map_err(|e| self.write_error(e))
        })();

        let _ = FileExt::unlock(&file);
        if result.is_ok() {
            tracing::debug!(key, path = %self.path.display(), "Storage key written");
        }
        result
    }
}
