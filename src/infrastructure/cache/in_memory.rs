//! In-memory TTL + LRU result cache

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::cache::{CacheKey, CacheStats, ResultCache};
use crate::domain::sentiment::SentimentResult;
use crate::infrastructure::observability::{record_cache_eviction, record_cache_lookup};

/// Configuration for the in-memory result cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// TTL applied by `set`
    pub default_ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            default_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: SentimentResult,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

#[derive(Debug)]
struct CacheState {
    entries: LruCache<CacheKey, CacheEntry>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Thread-safe result cache shared by every caller in the process.
///
/// Entries and counters live behind a single mutex so that each
/// check-then-act sequence is atomic. Expiry is checked lazily on access.
#[derive(Debug)]
pub struct InMemoryResultCache {
    state: Mutex<CacheState>,
    config: InMemoryCacheConfig,
}

impl InMemoryResultCache {
    /// Creates a cache, rejecting a zero capacity or zero TTL
    pub fn new(config: InMemoryCacheConfig) -> Result<Self, DomainError> {
        let capacity = NonZeroUsize::new(config.max_entries).ok_or_else(|| {
            DomainError::configuration("cache max_entries must be greater than zero")
        })?;

        if config.default_ttl.is_zero() {
            return Err(DomainError::configuration(
                "cache ttl must be greater than zero",
            ));
        }

        Ok(Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            config,
        })
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultCache for InMemoryResultCache {
    fn get(&self, text: &str) -> Option<SentimentResult> {
        let key = CacheKey::for_text(text);
        let now = Instant::now();
        let mut state = self.lock();

        let expired = state.entries.peek(&key).map(|entry| entry.is_expired(now));

        let found = match expired {
            Some(false) => state.entries.get(&key).map(|entry| entry.result),
            Some(true) => {
                state.entries.pop(&key);
                debug!(key = %key, "Cache entry expired");
                None
            }
            None => None,
        };

        if found.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }

        record_cache_lookup(found.is_some());
        found
    }

    fn set(&self, text: &str, result: SentimentResult) {
        self.set_with_ttl(text, result, self.config.default_ttl);
    }

    fn set_with_ttl(&self, text: &str, result: SentimentResult, ttl: Duration) {
        let key = CacheKey::for_text(text);
        let entry = CacheEntry {
            result,
            created_at: Instant::now(),
            ttl,
        };

        let mut state = self.lock();

        if let Some((displaced, _)) = state.entries.push(key.clone(), entry) {
            if displaced != key {
                state.evictions += 1;
                record_cache_eviction();
                debug!(evicted = %displaced, "Evicted least recently used cache entry");
            }
        }
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
        state.evictions = 0;
    }

    fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.lock();

        let expired: Vec<CacheKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            state.entries.pop(key);
        }

        if !expired.is_empty() {
            debug!(removed = expired.len(), "Removed expired cache entries");
        }

        expired.len()
    }

    fn stats(&self) -> CacheStats {
        let state = self.lock();

        CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            size: state.entries.len(),
            capacity: state.entries.cap().get(),
            default_ttl_seconds: self.config.default_ttl.as_secs(),
            hit_rate: CacheStats::hit_rate_percent(state.hits, state.misses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache_with_capacity(max_entries: usize) -> InMemoryResultCache {
        InMemoryResultCache::new(InMemoryCacheConfig::default().with_max_entries(max_entries))
            .unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let cache = cache_with_capacity(10);
        let result = SentimentResult::new(0.8, 0.0);

        cache.set("great blender", result);

        assert_eq!(cache.get("great blender"), Some(result));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_get_missing_counts_miss() {
        let cache = cache_with_capacity(10);

        assert!(cache.get("never stored").is_none());

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_keys_are_exact_text() {
        let cache = cache_with_capacity(10);
        cache.set("Good product", SentimentResult::new(0.7, 0.6));

        assert!(cache.get("good product").is_none());
        assert!(cache.get("Good product ").is_none());
        assert!(cache.get("Good product").is_some());
    }

    #[test]
    fn test_set_replaces_existing() {
        let cache = cache_with_capacity(2);
        cache.set("a", SentimentResult::new(0.1, 0.0));
        cache.set("a", SentimentResult::new(-0.4, 0.0));

        assert_eq!(cache.get("a").unwrap().polarity(), -0.4);

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = cache_with_capacity(10);
        cache.set_with_ttl("short lived", SentimentResult::new(0.5, 0.0), Duration::from_secs(1));

        assert!(cache.get("short lived").is_some());

        std::thread::sleep(Duration::from_millis(1100));

        assert!(cache.get("short lived").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_lru_eviction_removes_least_recently_accessed() {
        let cache = cache_with_capacity(3);
        cache.set("a", SentimentResult::new(0.1, 0.0));
        cache.set("b", SentimentResult::new(0.2, 0.0));
        cache.set("c", SentimentResult::new(0.3, 0.0));

        // "a" becomes most recently used, leaving "b" as the eviction candidate
        assert!(cache.get("a").is_some());

        cache.set("d", SentimentResult::new(0.4, 0.0));

        let stats = cache.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.size, 3);

        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
    }

    #[test]
    fn test_capacity_plus_one_evicts_exactly_once() {
        let cache = cache_with_capacity(5);

        for i in 0..6 {
            cache.set(&format!("review {}", i), SentimentResult::new(0.5, 0.0));
        }

        let stats = cache.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.size, 5);
        assert!(cache.get("review 0").is_none());
        assert!(cache.get("review 5").is_some());
    }

    #[test]
    fn test_clear_resets_entries_and_counters() {
        let cache = cache_with_capacity(1);
        cache.set("a", SentimentResult::new(0.1, 0.0));
        cache.set("b", SentimentResult::new(0.2, 0.0));
        cache.get("b");
        cache.get("a");

        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.capacity, 1);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_stats_snapshot_serializes_hit_rate() {
        let cache = cache_with_capacity(10);
        cache.set("seen", SentimentResult::new(0.4, 0.0));
        cache.get("seen");
        cache.get("unseen");

        let json = serde_json::to_value(cache.stats()).unwrap();

        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["hit_rate"], 50.0);
    }

    #[test]
    fn test_evict_expired() {
        let cache = cache_with_capacity(10);
        cache.set_with_ttl("old 1", SentimentResult::new(0.1, 0.0), Duration::from_millis(20));
        cache.set_with_ttl("old 2", SentimentResult::new(0.2, 0.0), Duration::from_millis(20));
        cache.set("fresh", SentimentResult::new(0.3, 0.0));

        std::thread::sleep(Duration::from_millis(60));

        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.stats().size, 1);
        assert_eq!(cache.evict_expired(), 0);
    }

    #[test]
    fn test_stats_report_configuration() {
        let config = InMemoryCacheConfig::default()
            .with_max_entries(42)
            .with_default_ttl(Duration::from_secs(300));
        let cache = InMemoryResultCache::new(config).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.capacity, 42);
        assert_eq!(stats.default_ttl_seconds, 300);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = InMemoryResultCache::new(InMemoryCacheConfig::default().with_max_entries(0));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let result =
            InMemoryResultCache::new(InMemoryCacheConfig::default().with_default_ttl(Duration::ZERO));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_concurrent_access_keeps_counters_consistent() {
        let cache = Arc::new(cache_with_capacity(16));
        let threads = 8;
        let ops = 200;

        std::thread::scope(|scope| {
            for t in 0..threads {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..ops {
                        let text = format!("text {}", (t * ops + i) % 32);
                        if cache.get(&text).is_none() {
                            cache.set(&text, SentimentResult::new(0.2, 0.1));
                        }
                    }
                });
            }
        });

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, (threads * ops) as u64);
        assert!(stats.size <= 16);
        assert_eq!(stats.capacity, 16);
    }
}
