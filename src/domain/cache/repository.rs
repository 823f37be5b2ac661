//! Result cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use serde::Serialize;

use crate::domain::sentiment::SentimentResult;

/// Point-in-time snapshot of cache counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
    pub capacity: usize,
    pub default_ttl_seconds: u64,
    /// Percentage of lookups that hit, rounded to two decimals
    pub hit_rate: f64,
}

impl CacheStats {
    /// Percentage of hits over all lookups, `0.0` before any lookup
    pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;

        if total == 0 {
            return 0.0;
        }

        (hits as f64 / total as f64 * 10_000.0).round() / 100.0
    }
}

/// Process-local store of sentiment results keyed by input text.
///
/// Implementations never fail: a missing or expired entry is reported as `None`.
pub trait ResultCache: Send + Sync + Debug {
    /// Looks up a live entry, refreshing its recency on a hit
    fn get(&self, text: &str) -> Option<SentimentResult>;

    /// Stores a result under the default TTL
    fn set(&self, text: &str, result: SentimentResult);

    /// Stores a result with an explicit TTL
    fn set_with_ttl(&self, text: &str, result: SentimentResult, ttl: Duration);

    /// Drops every entry and resets counters
    fn clear(&self);

    /// Removes all expired entries, returning how many were removed
    fn evict_expired(&self) -> usize;

    /// Snapshot of counters, size and configuration
    fn stats(&self) -> CacheStats;
}
