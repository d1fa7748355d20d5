/// Playlist item domain types
use crate::types::{AssetId, IntegrationId, ItemId};
use serde::{Deserialize, Serialize};

/// Floor for every item duration, in seconds
pub const MIN_ITEM_DURATION_SECS: u32 = 1;

/// Default duration assigned to newly added items, in seconds
const DEFAULT_ITEM_DURATION_SECS: u32 = 10;

/// One entry in the ordered content sequence of a playlist
///
/// Array position within the playlist is the authoritative order during
/// editing; a persisted `order_index` is derived at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Opaque stable identifier, assigned at insertion time
    pub id: ItemId,

    /// Reference to the underlying stored asset
    ///
    /// `None` for ad-hoc items such as manually entered websites.
    pub asset_id: Option<AssetId>,

    /// Content kind with kind-specific fields
    pub content: ItemContent,

    /// Canonical (unsigned/raw) resource locator, persisted form
    pub url: String,

    /// Optional still-image reference for authoring-time display
    pub thumbnail_url: Option<String>,

    /// Display label
    pub name: String,

    /// Playback duration in whole seconds, always >= 1
    ///
    /// For video items this is probe-derived and locked against manual
    /// edits; for other kinds it is user-editable with a floor of 1.
    pub duration_secs: u32,
}

impl PlaylistItem {
    /// Build an item from a draft, assigning a fresh id
    pub fn from_draft(draft: ItemDraft) -> Self {
        Self {
            id: ItemId::generate(),
            asset_id: draft.asset_id,
            content: draft.content,
            url: draft.url,
            thumbnail_url: draft.thumbnail_url,
            name: draft.name,
            duration_secs: draft
                .duration_secs
                .unwrap_or(DEFAULT_ITEM_DURATION_SECS)
                .max(MIN_ITEM_DURATION_SECS),
        }
    }

    /// Content kind of this item
    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    /// Whether playback of this item is driven by a wall-clock timer
    ///
    /// Video items advance on the media's own end-of-playback signal
    /// instead.
    pub fn is_timer_driven(&self) -> bool {
        self.kind() != ContentKind::Video
    }
}

/// Content kind with kind-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    /// Still image asset
    Image,

    /// Video asset; duration is probe-derived
    Video,

    /// Web page shown in an embedded view
    Website,

    /// Live external-data widget (weather, news, ...)
    Integration {
        /// Which integration this item renders
        integration_id: IntegrationId,

        /// App name/category metadata, fetched lazily
        #[serde(skip_serializing_if = "Option::is_none")]
        integration: Option<IntegrationInfo>,
    },
}

impl ItemContent {
    /// Kind discriminant without variant payloads
    pub fn kind(&self) -> ContentKind {
        match self {
            ItemContent::Image => ContentKind::Image,
            ItemContent::Video => ContentKind::Video,
            ItemContent::Website => ContentKind::Website,
            ItemContent::Integration { .. } => ContentKind::Integration,
        }
    }
}

/// Flat content-kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Still image
    Image,
    /// Video asset
    Video,
    /// Web page
    Website,
    /// Live external-data widget
    Integration,
}

impl ContentKind {
    /// Whether an item of this kind is worth warming in the media cache
    ///
    /// Websites and integrations render live and are never prefetched.
    pub fn is_prefetchable(self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Video)
    }

    /// Wire name used by the persisted shape
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
            ContentKind::Website => "website",
            ContentKind::Integration => "integration",
        }
    }
}

/// Integration metadata attached to an integration item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationInfo {
    /// App name, e.g. "Weather Pro"
    pub app: String,

    /// App category, if the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Input for adding a new item to the timeline
///
/// The store assigns the id; everything else comes from the authoring UI
/// (library pick or manual website entry).
#[derive(Debug, Clone)]
pub struct ItemDraft {
    /// Stored asset reference, if any
    pub asset_id: Option<AssetId>,
    /// Content kind and kind-specific fields
    pub content: ItemContent,
    /// Canonical resource locator
    pub url: String,
    /// Optional poster image
    pub thumbnail_url: Option<String>,
    /// Display label
    pub name: String,
    /// Initial duration; defaults to 10 seconds when omitted
    pub duration_secs: Option<u32>,
}

impl ItemDraft {
    /// Draft with the required fields set and the rest defaulted
    pub fn new(content: ItemContent, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            asset_id: None,
            content,
            url: url.into(),
            thumbnail_url: None,
            name: name.into(),
            duration_secs: None,
        }
    }

    /// Attach a stored asset reference
    pub fn with_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Set the initial duration
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Attach a poster image
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}

/// Partial update applied to an existing item
///
/// Absent fields are left untouched. Duration changes go through the
/// store's `update_duration` so the video lock is enforced in one place.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    /// New display label
    pub name: Option<String>,
    /// New resource locator
    pub url: Option<String>,
    /// New poster image; `Some(None)` clears it
    pub thumbnail_url: Option<Option<String>>,
    /// Replacement integration metadata
    pub integration: Option<IntegrationInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_duration_to_ten_seconds() {
        let item = PlaylistItem::from_draft(ItemDraft::new(
            ItemContent::Image,
            "https://cdn.example.com/a.jpg",
            "Poster A",
        ));
        assert_eq!(item.duration_secs, 10);
    }

    #[test]
    fn draft_duration_is_floored_at_one() {
        let draft = ItemDraft::new(ItemContent::Website, "https://example.com", "Site")
            .with_duration(0);
        let item = PlaylistItem::from_draft(draft);
        assert_eq!(item.duration_secs, 1);
    }

    #[test]
    fn video_items_are_not_timer_driven() {
        let video = PlaylistItem::from_draft(ItemDraft::new(
            ItemContent::Video,
            "https://cdn.example.com/v.mp4",
            "Clip",
        ));
        assert!(!video.is_timer_driven());

        let widget = PlaylistItem::from_draft(ItemDraft::new(
            ItemContent::Integration {
                integration_id: IntegrationId::new("weather-1"),
                integration: None,
            },
            "",
            "Weather",
        ));
        assert!(widget.is_timer_driven());
    }

    #[test]
    fn content_serializes_with_type_tag() {
        let json = serde_json::to_value(&ItemContent::Image).unwrap();
        assert_eq!(json["type"], "image");

        let json = serde_json::to_value(&ItemContent::Integration {
            integration_id: IntegrationId::new("news-7"),
            integration: None,
        })
        .unwrap();
        assert_eq!(json["type"], "integration");
        assert_eq!(json["integration_id"], "news-7");
    }
}
