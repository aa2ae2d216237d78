use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::channels::RESOURCES;
use crate::config::types::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    ValidationError { message: String },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

impl Config {
    /// `<config dir>/statecraft/config.toml`, relative to `.` when the
    /// platform has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statecraft")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parse and validate `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file absent, defaults apply");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        let config = toml::from_str::<Config>(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fetch = &self.fetch;
        if !is_http_url(&fetch.base_url) {
            return Err(invalid(format!(
                "fetch.base_url must start with http:// or https://, got '{}'",
                fetch.base_url
            )));
        }
        if fetch.timeout_seconds < 1 {
            return Err(invalid("fetch.timeout_seconds must be >= 1"));
        }
        if fetch.limit < 1 {
            return Err(invalid("fetch.limit must be >= 1"));
        }
        if !RESOURCES.contains(&fetch.default_resource.as_str()) {
            return Err(invalid(format!(
                "fetch.default_resource '{}' is unknown (expected {})",
                fetch.default_resource,
                RESOURCES.join("|")
            )));
        }
        if self.storage.name_key.is_empty() {
            return Err(invalid("storage.name_key is empty"));
        }
        Ok(())
    }
}
