use crate::models::SearchResult;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache of search results keyed by normalized query, backed by
/// moka with TTL and bounded capacity. Expired entries behave as misses and
/// are evicted lazily; there is no background sweeper to manage.
/// All methods are `&self` — no locking needed.
pub struct SearchCache {
    entries: Cache<String, Arc<Vec<SearchResult>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SearchCache {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        SearchCache {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Fresh cached results for an exact normalized key, or `None`.
    pub fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        match self.entries.get(key) {
            Some(results) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Search cache hit: {}", key);
                Some((*results).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Search cache miss: {}", key);
                None
            }
        }
    }

    /// Overwrites unconditionally.
    pub fn insert(&self, key: &str, results: Vec<SearchResult>) {
        tracing::debug!("Caching {} results: {}", results.len(), key);
        self.entries.insert(key.to_string(), Arc::new(results));
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
