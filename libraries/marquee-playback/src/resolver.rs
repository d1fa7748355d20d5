//! Expiring resolved-URL cache
//!
//! Signed URLs are valid for a limited window, so resolved entries carry an
//! expiry and are re-resolved once stale. The resolver's failure contract
//! is enforced here: `resolve_or_raw` never fails, it falls back to the
//! stored raw URL.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use lru::LruCache;
use marquee_core::{AssetRef, UrlResolver};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 256;

/// Default time-to-live for a resolved URL
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct CachedUrl {
    url: String,
    expires_at: DateTime<Utc>,
}

/// LRU cache with per-entry expiry over any [`UrlResolver`]
pub struct CachingResolver {
    inner: Arc<dyn UrlResolver>,
    cache: Mutex<LruCache<AssetRef, CachedUrl>>,
    ttl: ChronoDuration,
}

impl CachingResolver {
    /// Wrap a resolver with the default capacity and TTL
    pub fn new(inner: Arc<dyn UrlResolver>) -> Self {
        Self::with_config(inner, DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Wrap a resolver with explicit capacity and TTL
    pub fn with_config(inner: Arc<dyn UrlResolver>, capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::seconds(600)),
        }
    }

    /// Resolve through the cache
    ///
    /// A fresh cached entry short-circuits; otherwise the inner resolver
    /// runs and a success is cached with an expiry.
    pub async fn resolve(&self, asset: &AssetRef) -> marquee_core::Result<String> {
        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(hit) = cache.get(asset) {
                if hit.expires_at > Utc::now() {
                    return Ok(hit.url.clone());
                }
                cache.pop(asset);
            }
        }

        let url = self.inner.resolve(asset).await?;
        let mut cache = self.cache.lock().unwrap();
        cache.put(
            asset.clone(),
            CachedUrl {
                url: url.clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok(url)
    }

    /// Resolve, falling back to the raw stored URL on any failure
    pub async fn resolve_or_raw(&self, asset: &AssetRef) -> String {
        match self.resolve(asset).await {
            Ok(url) => url,
            Err(e) => {
                debug!(url = %asset.url, error = %e, "resolution failed, using raw URL");
                asset.url.clone()
            }
        }
    }
}
