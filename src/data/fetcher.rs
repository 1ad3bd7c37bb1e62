//! Document retrieval from a directory or an HTTP base URL.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

use super::client::create_http_client;
use super::error::FetchError;
use crate::TARGET_WEB_REQUEST;

/// Where the JSON documents live.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Remote(Url),
    Directory(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` values are base URLs, anything else is a path.
    pub fn parse(spec: &str) -> Result<Self, FetchError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(FetchError::InvalidSource {
                spec: spec.to_string(),
                reason: "empty".to_string(),
            });
        }

        if spec.starts_with("http://") || spec.starts_with("https://") {
            // Url::join drops the last segment unless the base ends in a slash.
            let base = if spec.ends_with('/') {
                spec.to_string()
            } else {
                format!("{}/", spec)
            };
            let url = Url::parse(&base).map_err(|e| FetchError::InvalidSource {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;
            Ok(DataSource::Remote(url))
        } else {
            Ok(DataSource::Directory(PathBuf::from(spec)))
        }
    }

    /// Human readable location of a document, used in logs and errors.
    pub fn location(&self, file: &str) -> String {
        match self {
            DataSource::Remote(base) => base
                .join(file)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", base, file)),
            DataSource::Directory(dir) => dir.join(file).display().to_string(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(base) => write!(f, "{}", base),
            DataSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Fetches documents from one data source. Cheap to clone; the HTTP client is
/// shared between clones.
#[derive(Debug, Clone)]
pub struct Fetcher {
    source: DataSource,
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(source: DataSource) -> anyhow::Result<Self> {
        let client = create_http_client()?;
        Ok(Fetcher { source, client })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Retrieve `file` and parse its body as JSON. No retry, timeout or caching.
    pub async fn fetch_json(&self, file: &str) -> Result<Value, FetchError> {
        let location = self.source.location(file);
        let body = self.fetch_body(file, &location).await?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Malformed { location, source })
    }

    /// Retrieve `file` and decode it into a document type.
    pub async fn fetch_document<T: DeserializeOwned>(&self, file: &str) -> Result<T, FetchError> {
        let value = self.fetch_json(file).await?;
        serde_json::from_value(value).map_err(|source| FetchError::Shape {
            location: self.source.location(file),
            source,
        })
    }

    async fn fetch_body(&self, file: &str, location: &str) -> Result<Vec<u8>, FetchError> {
        match &self.source {
            DataSource::Directory(dir) => {
                let path = dir.join(file);
                debug!(target: TARGET_WEB_REQUEST, "Reading {}", path.display());
                tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
                    location: location.to_string(),
                    source,
                })
            }
            DataSource::Remote(base) => {
                let url = base.join(file).map_err(|e| FetchError::InvalidSource {
                    spec: location.to_string(),
                    reason: e.to_string(),
                })?;

                info!(target: TARGET_WEB_REQUEST, "Loading {}", url);
                let response = self.client.get(url).send().await.map_err(|source| {
                    FetchError::Transport {
                        location: location.to_string(),
                        source,
                    }
                })?;

                debug!(target: TARGET_WEB_REQUEST, "Request to {} returned {}", location, response.status());
                if !response.status().is_success() {
                    return Err(FetchError::Status {
                        location: location.to_string(),
                        status: response.status().as_u16(),
                    });
                }

                let bytes = response.bytes().await.map_err(|source| FetchError::Transport {
                    location: location.to_string(),
                    source,
                })?;
                Ok(bytes.to_vec())
            }
        }
    }
}
