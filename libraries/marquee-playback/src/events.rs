//! Scheduler events
//!
//! The scheduler publishes to an event receiver instead of calling UI
//! callbacks directly, so any host (authoring preview, signage player,
//! test) can bind to it the same way.

use marquee_core::types::ItemId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchedulerEvent {
    /// Playback entered an item
    ///
    /// Emitted synchronously for index 0 on start and for each subsequent
    /// advance, before any resolution work, so the stream order always
    /// matches playback order.
    ItemStarted {
        /// Position in the sequence
        index: usize,
        /// Id of the item now showing
        item_id: ItemId,
        /// Raw URL, always displayable
        url: String,
    },

    /// The item's asset resolved to a playable URL
    ///
    /// Follows the item's `ItemStarted` and supersedes its raw URL. May
    /// arrive after later items started, or never, when the resolver
    /// hangs; the raw URL stands until then.
    ItemResolved {
        /// Position in the sequence
        index: usize,
        /// Id of the resolved item
        item_id: ItemId,
        /// Resolved (possibly time-limited) URL
        url: String,
    },

    /// An item's asset could not be resolved
    ///
    /// The item still occupies its slot; playback shows the raw URL and
    /// advances on schedule.
    ItemFailed {
        /// Position in the sequence
        index: usize,
        /// Id of the affected item
        item_id: ItemId,
        /// Why resolution failed
        message: String,
    },

    /// The last item finished; the session is over
    Ended,
}
