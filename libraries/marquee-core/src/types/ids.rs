/// ID types for Marquee Player entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random ID
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Playlist item identifier
    ///
    /// Assigned at insertion time, never reused, unaffected by reordering.
    ItemId
}

string_id! {
    /// Playlist identifier
    PlaylistId
}

string_id! {
    /// Stored asset identifier (library reference)
    AssetId
}

string_id! {
    /// Integration (live-data widget) identifier
    IntegrationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_generation_creates_unique_ids() {
        let id1 = ItemId::generate();
        let id2 = ItemId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn asset_id_from_string() {
        let id = AssetId::new("asset-123");
        assert_eq!(id.as_str(), "asset-123");
    }

    #[test]
    fn integration_id_display() {
        let id = IntegrationId::new("integration-456");
        assert_eq!(format!("{}", id), "integration-456");
    }
}
