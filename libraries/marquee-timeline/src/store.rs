//! Ordered playlist item store
//!
//! One store per authoring session, owned by the caller and passed where it
//! is needed. Array position is the authoritative order; persisted
//! `order_index` values are derived at save time.

use crate::error::{Result, TimelineError};
use crate::events::TimelineEvent;
use marquee_core::types::{
    ContentKind, ItemDraft, ItemId, ItemPatch, Playlist, PlaylistItem, MIN_ITEM_DURATION_SECS,
};
use tokio::sync::mpsc;
use tracing::debug;

/// In-memory playlist timeline
///
/// Pure model: no I/O, no timers. Mutations notify subscribers.
#[derive(Debug, Default)]
pub struct TimelineStore {
    name: String,
    items: Vec<PlaylistItem>,
    subscribers: Vec<mpsc::UnboundedSender<TimelineEvent>>,
}

impl TimelineStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to change notifications
    ///
    /// The receiver sees every mutation made after this call. Dropping it
    /// unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TimelineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: TimelineEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Append a new item and return its id
    ///
    /// The id is returned synchronously so the caller can kick off
    /// asynchronous duration/thumbnail work keyed by it.
    pub fn add_item(&mut self, draft: ItemDraft) -> ItemId {
        let item = PlaylistItem::from_draft(draft);
        let id = item.id.clone();
        let index = self.items.len();
        debug!(item = %id, index, kind = ?item.kind(), "adding timeline item");
        self.items.push(item);
        self.notify(TimelineEvent::ItemAdded {
            id: id.clone(),
            index,
        });
        id
    }

    /// Apply a partial field update to an item
    pub fn update_item(&mut self, id: &ItemId, patch: ItemPatch) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| TimelineError::ItemNotFound(id.clone()))?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(url) = patch.url {
            item.url = url;
        }
        if let Some(thumbnail_url) = patch.thumbnail_url {
            item.thumbnail_url = thumbnail_url;
        }
        if let Some(info) = patch.integration {
            if let marquee_core::types::ItemContent::Integration { integration, .. } =
                &mut item.content
            {
                *integration = Some(info);
            }
        }

        self.notify(TimelineEvent::ItemUpdated { id: id.clone() });
        Ok(())
    }

    /// Set an item's duration from the +/- controls, clamped to >= 1
    ///
    /// Rejected for video items, whose duration is probe-locked.
    pub fn update_duration(&mut self, id: &ItemId, secs: u32) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| TimelineError::ItemNotFound(id.clone()))?;

        if item.kind() == ContentKind::Video {
            return Err(TimelineError::VideoDurationLocked(id.clone()));
        }

        item.duration_secs = secs.max(MIN_ITEM_DURATION_SECS);
        self.notify(TimelineEvent::ItemUpdated { id: id.clone() });
        Ok(())
    }

    /// Write a probe-derived duration onto a video item
    ///
    /// The only mutation path for video durations. Clamped to >= 1 like
    /// every other duration write.
    pub fn apply_probed_duration(&mut self, id: &ItemId, secs: u32) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| TimelineError::ItemNotFound(id.clone()))?;

        item.duration_secs = secs.max(MIN_ITEM_DURATION_SECS);
        debug!(item = %id, secs = item.duration_secs, "locked probed duration");
        self.notify(TimelineEvent::ItemUpdated { id: id.clone() });
        Ok(())
    }

    /// Remove an item by id; no-op if absent
    pub fn remove_item(&mut self, id: &ItemId) {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        if self.items.len() < before {
            self.notify(TimelineEvent::ItemRemoved { id: id.clone() });
        }
    }

    /// Move the item at `from` to position `to`
    ///
    /// Intermediate items shift by one; the moved item is untouched.
    /// No-op when the indices are equal or out of range.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.notify(TimelineEvent::Reordered { from, to });
    }

    /// Wholesale replace of name + items (edit mode entry)
    pub fn load(&mut self, playlist: Playlist) {
        self.name = playlist.name;
        self.items = playlist.items;
        let len = self.items.len();
        debug!(len, "loaded playlist into timeline");
        self.notify(TimelineEvent::Loaded { len });
    }

    /// Empty the timeline and reset the name
    pub fn clear(&mut self) {
        self.items.clear();
        self.name.clear();
        self.notify(TimelineEvent::Cleared);
    }

    /// Set the playlist name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Playlist name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current ordered item sequence
    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    /// Item lookup by id
    pub fn get(&self, id: &ItemId) -> Option<&PlaylistItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the timeline is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total playback length: sum of `max(1, duration)` over all items
    pub fn total_duration_secs(&self) -> u64 {
        self.items
            .iter()
            .map(|i| u64::from(i.duration_secs.max(MIN_ITEM_DURATION_SECS)))
            .sum()
    }
}
