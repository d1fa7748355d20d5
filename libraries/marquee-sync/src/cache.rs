//! Per-item integration data cache
//!
//! Keyed by playlist item id, not integration id: two items rendering the
//! same integration hold independent entries. A loading-flag map guarantees
//! at most one concurrent fetch per item, and every write is a whole-record
//! swap stamped with the generation current when the fetch started, so a
//! fetch that outlives its item never touches the map.

use crate::widget::WidgetKind;
use marquee_core::types::{IntegrationId, IntegrationInfo, ItemId};
use marquee_core::{IntegrationRecord, IntegrationService};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// One fully-populated cache entry
///
/// Readers only ever see absent, loading, or one of these; never a
/// half-written record.
#[derive(Debug, Clone)]
pub struct IntegrationData {
    /// Synced payload, unwrapped from any `sync_result` nesting
    pub payload: serde_json::Value,

    /// App metadata, when the service reported it
    ///
    /// The cache never mutates playlist items; a host that wants this
    /// written onto the item's `integration` field applies it through the
    /// timeline store's update path.
    pub info: Option<IntegrationInfo>,

    /// Renderer chosen from the app name
    pub widget: WidgetKind,

    /// When this record was fetched
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    data: HashMap<ItemId, Arc<IntegrationData>>,
    /// Item id -> generation of the fetch that owns the flag
    loading: HashMap<ItemId, u64>,
    generations: HashMap<ItemId, u64>,
}

/// Shared cache of synced integration payloads
pub struct IntegrationCache {
    service: Arc<dyn IntegrationService>,
    inner: Mutex<Inner>,
}

impl IntegrationCache {
    /// Cache backed by the given sync service
    pub fn new(service: Arc<dyn IntegrationService>) -> Self {
        Self {
            service,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Cached data for an item, if a fetch has completed successfully
    pub fn get(&self, item_id: &ItemId) -> Option<Arc<IntegrationData>> {
        self.inner.lock().unwrap().data.get(item_id).cloned()
    }

    /// Whether a fetch for this item is in flight
    pub fn is_loading(&self, item_id: &ItemId) -> bool {
        self.inner.lock().unwrap().loading.contains_key(item_id)
    }

    /// Fetch and cache data for one item
    ///
    /// No-op while a fetch for the same item is in flight or a record is
    /// already cached. `known_info` skips the metadata fetch when the item
    /// already carries its integration metadata. On sync failure the
    /// integration's last-known stored metadata is cached instead; when
    /// that also fails the entry stays empty, the loading flag clears, and
    /// consumers render the explicit "no data" state. Freshly fetched
    /// metadata lands on the returned record's `info`; writing it back onto
    /// the item is the host's call, made through the timeline store.
    pub async fn load(
        &self,
        item_id: &ItemId,
        integration_id: &IntegrationId,
        known_info: Option<IntegrationInfo>,
    ) -> Option<Arc<IntegrationData>> {
        let generation = {
            let mut inner = self.inner.lock().unwrap();
            if let Some(existing) = inner.data.get(item_id) {
                return Some(existing.clone());
            }
            if inner.loading.contains_key(item_id) {
                debug!(item = %item_id, "load already in flight, skipping");
                return None;
            }
            let generation = *inner.generations.entry(item_id.clone()).or_insert(0);
            inner.loading.insert(item_id.clone(), generation);
            generation
        };

        let (info, payload) = self.fetch(integration_id, known_info).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.loading.get(item_id) == Some(&generation) {
            inner.loading.remove(item_id);
        }
        if inner.generations.get(item_id) != Some(&generation) {
            debug!(item = %item_id, "discarding stale fetch result");
            return None;
        }

        let payload = payload?;
        let widget = info
            .as_ref()
            .map_or(WidgetKind::Generic, |i| WidgetKind::from_app_name(&i.app));
        let record = Arc::new(IntegrationData {
            payload,
            info,
            widget,
            fetched_at: Utc::now(),
        });
        inner.data.insert(item_id.clone(), record.clone());
        Some(record)
    }

    /// Drop an item's entry and orphan any in-flight fetch for it
    ///
    /// Used when the item leaves the timeline. A fetch started before this
    /// call completes silently without writing.
    pub fn invalidate(&self, item_id: &ItemId) {
        let mut inner = self.inner.lock().unwrap();
        *inner.generations.entry(item_id.clone()).or_insert(0) += 1;
        inner.data.remove(item_id);
        inner.loading.remove(item_id);
    }

    /// Drop every entry and orphan all in-flight fetches
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        let keys: Vec<ItemId> = inner
            .data
            .keys()
            .chain(inner.loading.keys())
            .cloned()
            .collect();
        for id in keys {
            *inner.generations.entry(id).or_insert(0) += 1;
        }
        inner.data.clear();
        inner.loading.clear();
    }

    async fn fetch(
        &self,
        integration_id: &IntegrationId,
        known_info: Option<IntegrationInfo>,
    ) -> (Option<IntegrationInfo>, Option<serde_json::Value>) {
        // Step 1: metadata, fetched once when the item does not know it yet
        let mut meta_record: Option<IntegrationRecord> = None;
        let info = match known_info {
            Some(info) => Some(info),
            None => match self.service.get_metadata(integration_id).await {
                Ok(record) => {
                    let info = IntegrationInfo {
                        app: record.app.clone(),
                        category: record.category.clone(),
                    };
                    meta_record = Some(record);
                    Some(info)
                }
                Err(e) => {
                    debug!(integration = %integration_id, error = %e, "metadata fetch failed");
                    None
                }
            },
        };

        // Step 2: sync, falling back to last-known stored metadata
        let payload = match self.service.trigger_sync(integration_id).await {
            Ok(value) => Some(unwrap_sync_result(value)),
            Err(e) => {
                warn!(integration = %integration_id, error = %e, "sync failed, using stored metadata");
                match meta_record {
                    Some(record) => Some(record.metadata),
                    None => match self.service.get_metadata(integration_id).await {
                        Ok(record) => Some(record.metadata),
                        Err(e2) => {
                            warn!(integration = %integration_id, error = %e2, "no data available");
                            None
                        }
                    },
                }
            }
        };

        (info, payload)
    }
}

/// Unwrap one level of `sync_result` nesting
///
/// Some integrations answer `{ "sync_result": <data> }` instead of the bare
/// payload.
fn unwrap_sync_result(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("sync_result") => {
            map.remove("sync_result").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marquee_core::CoreError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubService {
        sync_calls: AtomicUsize,
        metadata_calls: AtomicUsize,
        sync_result: Option<serde_json::Value>,
        metadata_result: Option<IntegrationRecord>,
        delay: Duration,
    }

    impl StubService {
        fn new(sync: Option<serde_json::Value>, metadata: Option<IntegrationRecord>) -> Self {
            Self {
                sync_calls: AtomicUsize::new(0),
                metadata_calls: AtomicUsize::new(0),
                sync_result: sync,
                metadata_result: metadata,
                delay: Duration::ZERO,
            }
        }

        fn weather_record() -> IntegrationRecord {
            IntegrationRecord {
                app: "Weather Pro".to_string(),
                category: Some("weather".to_string()),
                metadata: json!({"last_temp": 21}),
            }
        }
    }

    #[async_trait]
    impl IntegrationService for StubService {
        async fn trigger_sync(
            &self,
            _id: &IntegrationId,
        ) -> marquee_core::Result<serde_json::Value> {
            self.sync_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.sync_result
                .clone()
                .ok_or_else(|| CoreError::network("sync unavailable"))
        }

        async fn get_metadata(
            &self,
            _id: &IntegrationId,
        ) -> marquee_core::Result<IntegrationRecord> {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            self.metadata_result
                .clone()
                .ok_or_else(|| CoreError::network("metadata unavailable"))
        }
    }

    fn ids() -> (ItemId, IntegrationId) {
        (ItemId::generate(), IntegrationId::new("weather-1"))
    }

    #[tokio::test]
    async fn successful_sync_populates_entry_and_picks_widget() {
        let service = Arc::new(StubService::new(
            Some(json!({"temp": 18})),
            Some(StubService::weather_record()),
        ));
        let cache = IntegrationCache::new(service.clone());
        let (item, integration) = ids();

        let record = cache.load(&item, &integration, None).await.unwrap();
        assert_eq!(record.payload, json!({"temp": 18}));
        assert_eq!(record.widget, WidgetKind::Weather);
        assert!(!cache.is_loading(&item));
        assert!(cache.get(&item).is_some());
    }

    #[tokio::test]
    async fn nested_sync_result_is_unwrapped() {
        let service = Arc::new(StubService::new(
            Some(json!({"sync_result": {"headline": "breaking"}})),
            Some(IntegrationRecord {
                app: "ACME News".to_string(),
                category: None,
                metadata: json!({}),
            }),
        ));
        let cache = IntegrationCache::new(service);
        let (item, integration) = ids();

        let record = cache.load(&item, &integration, None).await.unwrap();
        assert_eq!(record.payload, json!({"headline": "breaking"}));
        assert_eq!(record.widget, WidgetKind::News);
    }

    #[tokio::test]
    async fn sync_failure_falls_back_to_stored_metadata() {
        let service = Arc::new(StubService::new(None, Some(StubService::weather_record())));
        let cache = IntegrationCache::new(service.clone());
        let (item, integration) = ids();

        let record = cache.load(&item, &integration, None).await.unwrap();
        assert_eq!(record.payload, json!({"last_temp": 21}));
        // Metadata was fetched once up front and reused for the fallback
        assert_eq!(service.metadata_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn total_failure_leaves_entry_empty_and_not_loading() {
        let service = Arc::new(StubService::new(None, None));
        let cache = IntegrationCache::new(service);
        let (item, integration) = ids();

        assert!(cache.load(&item, &integration, None).await.is_none());
        assert!(cache.get(&item).is_none());
        assert!(!cache.is_loading(&item));
    }

    #[tokio::test]
    async fn concurrent_loads_result_in_one_fetch() {
        let mut service = StubService::new(
            Some(json!({"temp": 18})),
            Some(StubService::weather_record()),
        );
        service.delay = Duration::from_millis(50);
        let service = Arc::new(service);
        let cache = Arc::new(IntegrationCache::new(service.clone()));
        let (item, integration) = ids();

        let (a, b) = tokio::join!(
            cache.load(&item, &integration, None),
            cache.load(&item, &integration, None),
        );

        // One call won the flag; the other was a no-op
        assert_eq!(service.sync_calls.load(Ordering::SeqCst), 1);
        assert!(a.is_some() || b.is_some());
        assert!(a.is_none() || b.is_none());
    }

    #[tokio::test]
    async fn cached_entry_short_circuits_reload() {
        let service = Arc::new(StubService::new(
            Some(json!({"temp": 18})),
            Some(StubService::weather_record()),
        ));
        let cache = IntegrationCache::new(service.clone());
        let (item, integration) = ids();

        cache.load(&item, &integration, None).await.unwrap();
        cache.load(&item, &integration, None).await.unwrap();
        assert_eq!(service.sync_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_orphans_in_flight_fetch() {
        let mut service = StubService::new(
            Some(json!({"temp": 18})),
            Some(StubService::weather_record()),
        );
        service.delay = Duration::from_millis(50);
        let cache = Arc::new(IntegrationCache::new(Arc::new(service)));
        let (item, integration) = ids();

        let pending = {
            let cache = cache.clone();
            let item = item.clone();
            let integration = integration.clone();
            tokio::spawn(async move { cache.load(&item, &integration, None).await })
        };

        // Let the fetch claim its flag, then drop the item
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.invalidate(&item);

        assert!(pending.await.unwrap().is_none());
        assert!(cache.get(&item).is_none());
        assert!(!cache.is_loading(&item));
    }

    #[test]
    fn unwrap_handles_both_shapes() {
        assert_eq!(
            unwrap_sync_result(json!({"sync_result": {"a": 1}})),
            json!({"a": 1})
        );
        assert_eq!(unwrap_sync_result(json!({"a": 1})), json!({"a": 1}));
        assert_eq!(unwrap_sync_result(json!([1, 2])), json!([1, 2]));
    }
}
