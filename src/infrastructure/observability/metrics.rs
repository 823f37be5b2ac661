//! Metric recording helpers
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use std::time::Duration;

use metrics::{counter, histogram};

/// Record a result cache lookup
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("sentiment_cache_lookups_total", "result" => result).increment(1);
}

/// Record an LRU eviction
pub fn record_cache_eviction() {
    counter!("sentiment_cache_evictions_total").increment(1);
}

/// Record one backend attempt inside the retry loop
pub fn record_backend_attempt(params: BackendAttemptMetricParams) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("model", params.model.to_string()),
        ("status", params.status.to_string()),
    ];

    counter!("sentiment_backend_attempts_total", &labels).increment(1);
    histogram!("sentiment_backend_attempt_duration_seconds", &labels)
        .record(params.duration.as_secs_f64());
}

/// Parameters for backend attempt metrics
pub struct BackendAttemptMetricParams<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    /// `success`, `parse_error`, `timeout` or `backend_error`
    pub status: &'a str,
    pub duration: Duration,
}

/// Record a fallback to the lexicon analyzer
pub fn record_fallback(reason: &'static str) {
    counter!("sentiment_fallbacks_total", "reason" => reason).increment(1);
}

/// Record a completed batch
pub fn record_batch(size: usize, duration: Duration) {
    histogram!("sentiment_batch_size").record(size as f64);
    histogram!("sentiment_batch_duration_seconds").record(duration.as_secs_f64());
}
