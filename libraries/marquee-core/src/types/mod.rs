//! Domain types for Marquee Player

mod ids;
mod item;
mod persisted;
mod playlist;

pub use ids::{AssetId, IntegrationId, ItemId, PlaylistId};
pub use item::{
    ContentKind, IntegrationInfo, ItemContent, ItemDraft, ItemPatch, PlaylistItem,
    MIN_ITEM_DURATION_SECS,
};
pub use persisted::{PersistedContent, PersistedPlaylist};
pub use playlist::Playlist;
