//! Marquee Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Marquee
//! Player, a digital-signage playlist engine.
//!
//! This crate provides the foundational building blocks used across the
//! timeline, media, sync, and playback crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `PlaylistItem`, `Playlist`, the persisted wire shape
//! - **Collaborator Traits**: `UrlResolver`, `MediaMetadataSource`,
//!   `FrameGrabber`, `IntegrationService`, `MediaWarmer`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use marquee_core::types::{ItemContent, ItemDraft, PlaylistItem};
//!
//! let draft = ItemDraft::new(ItemContent::Image, "https://cdn.example.com/a.jpg", "Poster A");
//! let item = PlaylistItem::from_draft(draft);
//!
//! assert_eq!(item.name, "Poster A");
//! assert_eq!(item.duration_secs, 10);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{
    AssetRef, CrossOriginMode, FrameGrabber, IntegrationRecord, IntegrationService,
    MediaMetadata, MediaMetadataSource, MediaWarmer, RawFrame, UrlResolver,
};
pub use types::{
    AssetId, ContentKind, IntegrationId, IntegrationInfo, ItemContent, ItemDraft, ItemId,
    ItemPatch, PersistedContent, PersistedPlaylist, Playlist, PlaylistId, PlaylistItem,
    MIN_ITEM_DURATION_SECS,
};
