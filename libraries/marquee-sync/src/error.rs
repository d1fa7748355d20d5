//! Error types for integration sync

use thiserror::Error;

/// Sync errors
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Invalid service URL
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

impl From<SyncError> for marquee_core::CoreError {
    fn from(err: SyncError) -> Self {
        marquee_core::CoreError::network(err.to_string())
    }
}
