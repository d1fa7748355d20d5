//! Error types for playback scheduling

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Command sent after the scheduler closed
    #[error("Scheduler is closed")]
    SchedulerClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
