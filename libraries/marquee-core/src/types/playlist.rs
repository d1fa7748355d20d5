/// Playlist domain type
use crate::types::{PlaylistId, PlaylistItem};
use serde::{Deserialize, Serialize};

/// A named, ordered sequence of playlist items
///
/// Array position is the order; no separate order field is authoritative
/// during editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Ordered content sequence
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Create a playlist with a specific ID (for restoring persisted state)
    pub fn with_id(id: PlaylistId, name: impl Into<String>, items: Vec<PlaylistItem>) -> Self {
        Self {
            id,
            name: name.into(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_creation() {
        let playlist = Playlist::new("Lobby loop");
        assert_eq!(playlist.name, "Lobby loop");
        assert!(playlist.items.is_empty());
    }
}
