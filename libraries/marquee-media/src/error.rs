/// Media-specific errors
use thiserror::Error;

/// Result type alias using `MediaError`
pub type Result<T> = std::result::Result<T, MediaError>;

/// Media error types
#[derive(Error, Debug)]
pub enum MediaError {
    /// The probe deadline elapsed before any strategy produced metadata
    ///
    /// Distinct from the exhausted-strategies case, which resolves with a
    /// fallback duration instead of failing.
    #[error("Duration probe timed out after {deadline_ms} ms: {url}")]
    ProbeTimeout {
        /// Probed URL
        url: String,
        /// Deadline that elapsed
        deadline_ms: u64,
    },

    /// The video failed to load for thumbnail capture
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// The grabbed frame could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
}
