//! Next-item prefetching
//!
//! Purely an optimization: while one item plays, the next item's asset is
//! resolved and warmed in the client media cache so the transition does not
//! flash. Failures are swallowed; playback never depends on a prefetch.

use crate::resolver::CachingResolver;
use marquee_core::types::PlaylistItem;
use marquee_core::{AssetRef, MediaWarmer};
use std::sync::Arc;
use tracing::debug;

/// Warms upcoming assets without blocking playback
pub struct Prefetcher {
    resolver: Arc<CachingResolver>,
    warmer: Arc<dyn MediaWarmer>,
}

impl Prefetcher {
    /// Prefetcher over a resolver and a media warmer
    pub fn new(resolver: Arc<CachingResolver>, warmer: Arc<dyn MediaWarmer>) -> Self {
        Self { resolver, warmer }
    }

    /// Begin warming an item's asset; returns immediately
    ///
    /// Only image and video items are warmed; websites and integrations
    /// render live.
    pub fn warm_ahead(&self, item: &PlaylistItem) {
        if !item.kind().is_prefetchable() {
            return;
        }

        let resolver = self.resolver.clone();
        let warmer = self.warmer.clone();
        let asset = AssetRef::new(item.asset_id.clone(), item.url.clone());
        let item_id = item.id.clone();

        tokio::spawn(async move {
            let url = resolver.resolve_or_raw(&asset).await;
            if let Err(e) = warmer.warm(&url).await {
                debug!(item = %item_id, error = %e, "prefetch failed (ignored)");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marquee_core::types::{ItemContent, ItemDraft};
    use marquee_core::UrlResolver;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct PassthroughResolver;

    #[async_trait]
    impl UrlResolver for PassthroughResolver {
        async fn resolve(&self, asset: &AssetRef) -> marquee_core::Result<String> {
            Ok(asset.url.clone())
        }
    }

    struct CountingWarmer {
        warmed: AtomicUsize,
    }

    #[async_trait]
    impl MediaWarmer for CountingWarmer {
        async fn warm(&self, _url: &str) -> marquee_core::Result<()> {
            self.warmed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn warms_images_and_videos_only() {
        let warmer = Arc::new(CountingWarmer {
            warmed: AtomicUsize::new(0),
        });
        let prefetcher = Prefetcher::new(
            Arc::new(CachingResolver::new(Arc::new(PassthroughResolver))),
            warmer.clone(),
        );

        let image = PlaylistItem::from_draft(ItemDraft::new(
            ItemContent::Image,
            "https://cdn.example.com/a.jpg",
            "a",
        ));
        let website = PlaylistItem::from_draft(ItemDraft::new(
            ItemContent::Website,
            "https://example.com",
            "site",
        ));

        prefetcher.warm_ahead(&image);
        prefetcher.warm_ahead(&website);

        // Let the spawned warm task run
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(warmer.warmed.load(Ordering::SeqCst), 1);
    }
}
