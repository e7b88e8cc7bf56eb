//! Time-windowed cache of aggregated news.
//!
//! One [`NewsCache`] is created at startup and shared through the API state.
//! Entries are keyed by the language filter's cache key and are reused while
//! younger than the TTL. Stale entries stay in the map until the next miss
//! for the same key overwrites them; there is no eviction or capacity bound.

use crate::models::NewsItem;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Default time an aggregation result is served from cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CacheEntry {
    timestamp: Instant,
    items: Vec<NewsItem>,
}

/// Process-wide map from cache key to the last computed news list.
///
/// The lock is held only to read or replace an entry, never while computing.
/// Two concurrent misses for the same key therefore both compute, and the
/// later write wins.
#[derive(Debug)]
pub struct NewsCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl NewsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh entry for `key`, or run `compute`, store its result
    /// and return it.
    ///
    /// An entry is fresh while `now - timestamp < ttl`.
    #[instrument(level = "debug", skip(self, compute))]
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Vec<NewsItem>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<NewsItem>>,
    {
        if let Some(items) = self.lookup(key).await {
            debug!(count = items.len(), "Cache hit");
            return items;
        }

        debug!("Cache miss; computing");
        let items = compute().await;

        self.entries.lock().await.insert(
            key.to_string(),
            CacheEntry {
                timestamp: Instant::now(),
                items: items.clone(),
            },
        );
        items
    }

    async fn lookup(&self, key: &str) -> Option<Vec<NewsItem>> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|entry| entry.timestamp.elapsed() < self.ttl)
            .map(|entry| entry.items.clone())
    }

    /// Number of keys ever stored, fresh or stale.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
