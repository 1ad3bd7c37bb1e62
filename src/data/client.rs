//! HTTP client creation for remote data sources.

use anyhow::Result;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use crate::TARGET_WEB_REQUEST;

const USER_AGENT: &str = concat!("labpage/", env!("CARGO_PKG_VERSION"));

/// Create the client used for every remote document request. No request
/// timeout is configured: a stalled request leaves its section unrendered.
pub fn create_http_client() -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain;q=0.9, */*;q=0.8"),
    );

    debug!(target: TARGET_WEB_REQUEST, "Creating HTTP client for remote data source");

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}
