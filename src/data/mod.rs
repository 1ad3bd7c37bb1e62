//! Data fetching for the homepage.
//!
//! This module resolves JSON documents against a data source (a local
//! directory or an HTTP base URL), decodes them into the document types and
//! normalizes the legacy and current shapes into one canonical form.

mod client;
mod diagnostics;
mod error;
mod fetcher;
mod types;
mod year;

pub use self::client::create_http_client;
pub use self::diagnostics::*;
pub use self::error::FetchError;
pub use self::fetcher::{DataSource, Fetcher};
pub use self::types::*;
pub use self::year::Year;
