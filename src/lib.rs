//! Review sentiment inference
//!
//! Turns free-form customer reviews into validated sentiment judgments using a
//! remote LLM backend, with:
//! - A process-wide TTL + LRU result cache
//! - Tolerant extraction of JSON verdicts from model output
//! - Linear-backoff retries and a lexicon fallback scorer
//! - Bounded-concurrency, order-preserving batch analysis

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use domain::{DomainError, LlmProvider};
use infrastructure::{
    cache::{InMemoryCacheConfig, InMemoryResultCache},
    llm::LlmProviderFactory,
    services::{BatchService, SentimentService, SentimentServiceConfig},
};

/// Services wired from one configuration, sharing a single result cache
#[derive(Debug, Clone)]
pub struct SentimentStack {
    pub service: Arc<SentimentService>,
    pub batch: BatchService,
}

/// Create the sentiment services with the configured remote backend
pub fn create_sentiment_stack(config: &AppConfig) -> Result<SentimentStack, DomainError> {
    let provider = LlmProviderFactory::create(&config.backend)?;
    create_sentiment_stack_with_provider(config, provider)
}

/// Create the sentiment services around an existing provider
pub fn create_sentiment_stack_with_provider(
    config: &AppConfig,
    provider: Arc<dyn LlmProvider>,
) -> Result<SentimentStack, DomainError> {
    config.validate()?;

    let cache = Arc::new(InMemoryResultCache::new(InMemoryCacheConfig {
        max_entries: config.cache.max_entries,
        default_ttl: config.cache.ttl(),
    })?);

    info!(
        provider = provider.provider_name(),
        base_url = provider.base_url(),
        model = %config.backend.model,
        backend_enabled = config.backend.enabled,
        cache_capacity = config.cache.max_entries,
        "Sentiment services initialized"
    );

    let service = Arc::new(SentimentService::new(
        provider,
        cache,
        SentimentServiceConfig::from(&config.backend),
    )?);

    let batch = BatchService::new(service.clone(), config.batch.concurrency_limit)?;

    Ok(SentimentStack { service, batch })
}
