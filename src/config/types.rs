use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings read from `config.toml`; every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub memo: MemoConfig,
}

/// Local key-value storage used by the persisted-name demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every stored key.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Key the persisted name is stored under (default: "name").
    #[serde(default = "default_name_key")]
    pub name_key: String,
}

/// Endpoint for the fetch-on-change demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Base URL; resources are fetched from `{base_url}/{resource}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// How many records to keep from each response (default: 3).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Resource selected on start (default: "posts").
    #[serde(default = "default_resource")]
    pub default_resource: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Busy-loop length of the deliberately slow computation.
    #[serde(default = "default_slow_iterations")]
    pub slow_iterations: u64,
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("statecraft")
        .join("storage.json")
}

fn default_name_key() -> String {
    "name".to_string()
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_limit() -> usize {
    3
}

fn default_resource() -> String {
    "posts".to_string()
}

fn default_slow_iterations() -> u64 {
    50_000_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            name_key: default_name_key(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            limit: default_limit(),
            default_resource: default_resource(),
        }
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            slow_iterations: default_slow_iterations(),
        }
    }
}
