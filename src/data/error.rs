use thiserror::Error;

/// Why a document could not be turned into a value. None of these are retried;
/// a section whose document fails keeps its placeholder.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid data source '{spec}': {reason}")]
    InvalidSource { spec: String, reason: String },

    #[error("request to {location} failed: {source}")]
    Transport {
        location: String,
        source: reqwest::Error,
    },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    #[error("{location} returned HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("{location} is not valid JSON: {source}")]
    Malformed {
        location: String,
        source: serde_json::Error,
    },

    #[error("{location} does not have the expected shape: {source}")]
    Shape {
        location: String,
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True when the document never arrived, as opposed to arriving unreadable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::Io { .. } | FetchError::Status { .. }
        )
    }
}
