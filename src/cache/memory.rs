//! In-memory TTL cache using moka

use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct Entry<V> {
    value: V,
    ttl: Duration,
}

/// Expires each entry by the TTL it was inserted with
struct PerEntryExpiry;

impl<K, V> Expiry<K, Entry<V>> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &K, entry: &Entry<V>, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Wall-clock TTL cache with per-entry expiry.
///
/// No LRU and no capacity bound: the key space is bounded by the number of
/// tracked funds, typically under a hundred.
pub struct TtlCache<V: Clone + Send + Sync + 'static> {
    inner: Cache<String, Entry<V>>,
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().expire_after(PerEntryExpiry).build(),
        }
    }

    /// Get a value if present and not yet expired
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await.map(|e| e.value)
    }

    /// Store a value that expires `ttl` after insertion
    pub async fn insert(&self, key: &str, value: V, ttl: Duration) {
        self.inner
            .insert(key.to_string(), Entry { value, ttl })
            .await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
