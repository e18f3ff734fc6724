// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tag-keyed cache for view data.
//!
//! Loaders store backend reads under a key and a collection tag. Server
//! actions call [`TagCache::revalidate_tag`] after a successful mutation so
//! the next read of that collection goes back to the backend.

use dashmap::DashMap;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache tags for each backend collection.
pub mod tags {
    pub const CONNECTOR_TYPES: &str = "connector-types";
    pub const STATIONS: &str = "stations";
    pub const RESERVATIONS: &str = "reservations";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const VEHICLE_MODELS: &str = "vehicle-models";
    pub const WALLET: &str = "wallet";
}

/// Entries hold the decoded value itself, so a hit never re-parses
/// backend JSON.
#[derive(Clone)]
struct CacheEntry {
    tag: String,
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

/// In-memory read cache shared by all requests.
pub struct TagCache {
    entries: DashMap<String, CacheEntry>,
    /// How many times each tag has been revalidated.
    revalidations: DashMap<String, u64>,
    ttl: Duration,
}

impl TagCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            revalidations: DashMap::new(),
            ttl,
        }
    }

    /// Return the cached value for `key`, or run `load` and cache its result.
    ///
    /// Errors are returned as-is and never cached.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, tag: &str, load: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.fresh(key) {
            match value.downcast_ref::<T>() {
                Some(hit) => return Ok(hit.clone()),
                None => {
                    tracing::warn!(key, "Discarding cache entry of another type");
                    self.entries.remove(key);
                }
            }
        }

        let loaded = load().await?;
        self.sweep_expired();
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                tag: tag.to_string(),
                value: Arc::new(loaded.clone()),
                stored_at: Instant::now(),
            },
        );
        Ok(loaded)
    }

    fn fresh(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        // Clone out so no map guard is held across an await.
        let entry = self.entries.get(key).map(|e| e.clone())?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value)
        } else {
            self.entries.remove(key);
            None
        }
    }

    /// Drop every expired entry, whatever its key.
    fn sweep_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Evict every entry stored under `tag`.
    pub fn revalidate_tag(&self, tag: &str) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.tag != tag && entry.stored_at.elapsed() < ttl);
        *self.revalidations.entry(tag.to_string()).or_insert(0) += 1;
        tracing::debug!(tag, "Cache tag revalidated");
    }

    pub fn revalidation_count(&self, tag: &str) -> u64 {
        self.revalidations.get(tag).map(|c| *c).unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectorType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn load_counted(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_hit_skips_loader() {
        let cache = TagCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_load("stations:all", tags::STATIONS, || load_counted(&calls, 7))
            .await;
        let second = cache
            .get_or_load("stations:all", tags::STATIONS, || load_counted(&calls, 8))
            .await;

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_revalidate_only_evicts_its_tag() {
        let cache = TagCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        cache
            .get_or_load("stations:all", tags::STATIONS, || load_counted(&calls, 1))
            .await
            .unwrap();
        cache
            .get_or_load("connector-types:all", tags::CONNECTOR_TYPES, || {
                load_counted(&calls, 2)
            })
            .await
            .unwrap();

        cache.revalidate_tag(tags::STATIONS);

        assert!(!cache.contains("stations:all"));
        assert!(cache.contains("connector-types:all"));
        assert_eq!(cache.revalidation_count(tags::STATIONS), 1);
        assert_eq!(cache.revalidation_count(tags::CONNECTOR_TYPES), 0);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = TagCache::new(Duration::from_secs(60));

        let failed: Result<u32, String> = cache
            .get_or_load("wallet:u1", tags::WALLET, || async { Err("down".to_string()) })
            .await;
        assert!(failed.is_err());
        assert!(!cache.contains("wallet:u1"));
    }

    #[tokio::test]
    async fn test_expired_entries_reload() {
        let cache = TagCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_load("subscriptions:all", tags::SUBSCRIPTIONS, || {
                    load_counted(&calls, 3)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_backend_model_is_served_from_cache() {
        let cache = TagCache::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let load = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            serde_json::from_value::<Vec<ConnectorType>>(serde_json::json!([
                { "Id": "ct-1", "Name": "CCS2", "MaxPowerKw": 150.0 }
            ]))
        };

        let first = cache
            .get_or_load("connector-types:all", tags::CONNECTOR_TYPES, load)
            .await
            .unwrap();
        let second = cache
            .get_or_load("connector-types:all", tags::CONNECTOR_TYPES, load)
            .await
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second[0].max_power_kw, 150.0);

        let view = serde_json::to_value(&second).unwrap();
        assert_eq!(view[0]["maxPowerKw"], 150.0);
    }

    #[tokio::test]
    async fn test_insert_sweeps_expired_keys() {
        let cache = TagCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for uid in ["u1", "u2", "u3"] {
            cache
                .get_or_load(&format!("wallet:{uid}"), tags::WALLET, || {
                    load_counted(&calls, 1)
                })
                .await
                .unwrap();
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.contains("wallet:u3"));

        cache.revalidate_tag(tags::STATIONS);
        assert!(cache.is_empty());
    }
}
