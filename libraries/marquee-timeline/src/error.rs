//! Error types for the timeline store

use marquee_core::types::ItemId;
use thiserror::Error;

/// Timeline errors
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Item not present in the timeline
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Manual duration edits are rejected for video items
    #[error("Video duration is probe-locked: {0}")]
    VideoDurationLocked(ItemId),

    /// Persisted shape could not be interpreted
    #[error("Invalid persisted content at index {index}: {reason}")]
    InvalidPersisted {
        /// Position in the persisted list
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;
