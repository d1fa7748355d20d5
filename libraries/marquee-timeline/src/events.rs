//! Timeline change notifications
//!
//! Every mutation of the store emits one event to all live subscribers so
//! an authoring UI can re-render without polling. Subscribers that dropped
//! their receiver are pruned on the next send.

use marquee_core::types::ItemId;
use serde::{Deserialize, Serialize};

/// Events emitted by the timeline store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// An item was appended to the end of the sequence
    ItemAdded {
        /// Id of the new item
        id: ItemId,
        /// Its position (always the previous length)
        index: usize,
    },

    /// An item was removed
    ItemRemoved {
        /// Id of the removed item
        id: ItemId,
    },

    /// An item's fields changed in place
    ItemUpdated {
        /// Id of the changed item
        id: ItemId,
    },

    /// An item moved to a new position
    Reordered {
        /// Original position
        from: usize,
        /// New position
        to: usize,
    },

    /// The whole playlist was replaced (edit mode entry)
    Loaded {
        /// New item count
        len: usize,
    },

    /// The timeline was emptied
    Cleared,
}
