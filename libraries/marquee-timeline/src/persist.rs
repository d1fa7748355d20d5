//! Persisted-shape conversion
//!
//! The backend stores a playlist as a flat content list with derived
//! `order_index` values. Conversion happens only at the save/restore
//! boundary; inside the store, array position is the order.

use crate::error::{Result, TimelineError};
use crate::store::TimelineStore;
use marquee_core::types::{
    ContentKind, IntegrationId, ItemContent, PersistedContent, PersistedPlaylist, PlaylistItem,
    MIN_ITEM_DURATION_SECS,
};

impl TimelineStore {
    /// Snapshot the timeline into the persisted wire shape
    ///
    /// `order_index` is exactly `0..n-1` in current array order;
    /// `alt_text` defaults to the item name.
    pub fn to_persisted(&self) -> PersistedPlaylist {
        let contents = self
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| persist_item(item, index as u32))
            .collect();

        PersistedPlaylist {
            name: self.name().to_string(),
            contents,
        }
    }

    /// Restore a persisted playlist into this store, replacing its contents
    ///
    /// Items are ordered by `order_index`. Fresh ids are assigned; persisted
    /// shapes carry none.
    pub fn restore_persisted(&mut self, persisted: PersistedPlaylist) -> Result<()> {
        let mut contents: Vec<(usize, PersistedContent)> =
            persisted.contents.into_iter().enumerate().collect();
        contents.sort_by_key(|(_, c)| c.order_index);

        let mut items = Vec::with_capacity(contents.len());
        for (index, content) in contents {
            items.push(restore_item(index, content)?);
        }

        let playlist = marquee_core::types::Playlist::with_id(
            marquee_core::types::PlaylistId::generate(),
            persisted.name,
            items,
        );
        self.load(playlist);
        Ok(())
    }
}

fn persist_item(item: &PlaylistItem, order_index: u32) -> PersistedContent {
    let kind = item.kind();
    let integration_id = match &item.content {
        ItemContent::Integration { integration_id, .. } => Some(integration_id.clone()),
        _ => None,
    };
    let (image_url, video_url, website_url) = match kind {
        ContentKind::Image => (Some(item.url.clone()), None, None),
        ContentKind::Video => (None, Some(item.url.clone()), None),
        ContentKind::Website => (None, None, Some(item.url.clone())),
        ContentKind::Integration => (None, None, None),
    };

    PersistedContent {
        content_type: kind,
        name: item.name.clone(),
        image_url,
        video_url,
        website_url,
        integration_id,
        duration_seconds: item.duration_secs.max(MIN_ITEM_DURATION_SECS),
        order_index,
        alt_text: item.name.clone(),
    }
}

fn restore_item(index: usize, content: PersistedContent) -> Result<PlaylistItem> {
    let item_content = match content.content_type {
        ContentKind::Image => ItemContent::Image,
        ContentKind::Video => ItemContent::Video,
        ContentKind::Website => ItemContent::Website,
        ContentKind::Integration => {
            let integration_id: IntegrationId =
                content
                    .integration_id
                    .clone()
                    .ok_or_else(|| TimelineError::InvalidPersisted {
                        index,
                        reason: "integration content without integration_id".to_string(),
                    })?;
            ItemContent::Integration {
                integration_id,
                integration: None,
            }
        }
    };

    let url = content.url().unwrap_or_default().to_string();
    if url.is_empty() && content.content_type != ContentKind::Integration {
        return Err(TimelineError::InvalidPersisted {
            index,
            reason: format!("missing url for {} content", content.content_type.as_str()),
        });
    }

    Ok(PlaylistItem {
        id: marquee_core::types::ItemId::generate(),
        asset_id: None,
        content: item_content,
        url,
        thumbnail_url: None,
        name: content.name,
        duration_secs: content.duration_seconds.max(MIN_ITEM_DURATION_SECS),
    })
}
