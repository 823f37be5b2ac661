//! Observability infrastructure - Metrics

mod metrics;

pub use self::metrics::{
    BackendAttemptMetricParams, record_backend_attempt, record_batch, record_cache_eviction,
    record_cache_lookup, record_fallback,
};
