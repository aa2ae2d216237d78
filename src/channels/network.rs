//! Resource fetching over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::FetchConfig;

/// Resources the fetch demo offers.
pub const RESOURCES: [&str; 3] = ["posts", "users", "comments"];

/// One record as returned by the endpoint. Shape varies per resource.
pub type Record = serde_json::Value;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("'{resource}' responded with status {status}")]
    Status { resource: String, status: u16 },

    #[error("'{resource}' did not return a list")]
    NotAList { resource: String },
}

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch every record of `resource`. No retry.
    async fn fetch(&self, resource: &str) -> Result<Vec<Record>, FetchError>;
}

/// `GET {base_url}/{resource}` returning a JSON array.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, resource: &str) -> Result<Vec<Record>, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        tracing::debug!(url = %url, "Fetching resource");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Array(records) => {
                tracing::debug!(resource, count = records.len(), "Resource fetched");
                Ok(records)
            }
            _ => Err(FetchError::NotAList {
                resource: resource.to_string(),
            }),
        }
    }
}
