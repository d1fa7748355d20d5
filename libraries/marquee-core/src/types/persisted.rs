/// Persisted (save/restore) wire shape
///
/// The backend stores a playlist as a flat list of content descriptors.
/// Exactly one of the url fields is set depending on `content_type`, and
/// `order_index` is derived from array order at save time.
use crate::types::{ContentKind, IntegrationId};
use serde::{Deserialize, Serialize};

/// One persisted content descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedContent {
    /// Content kind wire name: `image | video | website | integration`
    #[serde(rename = "type")]
    pub content_type: ContentKind,

    /// Display label
    pub name: String,

    /// Set only for `type = image`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Set only for `type = video`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Set only for `type = website`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Set only for `type = integration`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<IntegrationId>,

    /// Playback duration in whole seconds
    pub duration_seconds: u32,

    /// 0-based position, contiguous, matching array order at save time
    pub order_index: u32,

    /// Accessibility label, defaulted to the item name
    pub alt_text: String,
}

/// Persisted playlist wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlaylist {
    /// Playlist name
    pub name: String,

    /// Flat ordered content list
    pub contents: Vec<PersistedContent>,
}

impl PersistedContent {
    /// The url field matching `content_type`, if present
    pub fn url(&self) -> Option<&str> {
        match self.content_type {
            ContentKind::Image => self.image_url.as_deref(),
            ContentKind::Video => self.video_url.as_deref(),
            ContentKind::Website => self.website_url.as_deref(),
            ContentKind::Integration => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_matching_url_field_serialized() {
        let content = PersistedContent {
            content_type: ContentKind::Video,
            name: "Clip".to_string(),
            image_url: None,
            video_url: Some("https://cdn.example.com/v.mp4".to_string()),
            website_url: None,
            integration_id: None,
            duration_seconds: 8,
            order_index: 0,
            alt_text: "Clip".to_string(),
        };

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["video_url"], "https://cdn.example.com/v.mp4");
        assert!(json.get("image_url").is_none());
        assert!(json.get("website_url").is_none());
    }
}
