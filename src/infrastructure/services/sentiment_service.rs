//! Sentiment inference client: cache, remote backend with retries, lexicon fallback

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::BackendConfig;
use crate::domain::cache::{CacheStats, ResultCache};
use crate::domain::sentiment::{
    LexiconAnalyzer, ParseError, SentimentResult, build_sentiment_prompt, parse_sentiment,
};
use crate::domain::{DomainError, LlmProvider, LlmRequest};
use crate::infrastructure::observability::{
    BackendAttemptMetricParams, record_backend_attempt, record_fallback,
};

const PREVIEW_CHARS: usize = 48;

/// Sentiment service configuration
#[derive(Debug, Clone)]
pub struct SentimentServiceConfig {
    /// Consult the remote backend; when false the lexicon analyzer answers directly
    pub use_backend: bool,
    pub model: String,
    /// Total backend attempts per call, at least 1
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `retry_delay * n` before the next one
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub temperature: f32,
}

impl Default for SentimentServiceConfig {
    fn default() -> Self {
        Self {
            use_backend: true,
            model: "gpt-oss:120b-cloud".to_string(),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            temperature: 0.1,
        }
    }
}

impl SentimentServiceConfig {
    pub fn with_use_backend(mut self, use_backend: bool) -> Self {
        self.use_backend = use_backend;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl From<&BackendConfig> for SentimentServiceConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            use_backend: config.enabled,
            model: config.model.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
            request_timeout: config.request_timeout(),
            temperature: config.temperature,
        }
    }
}

/// Snapshot of backend reachability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub available: bool,
    pub model: String,
    pub base_url: String,
}

/// Why a single backend attempt did not yield a result
#[derive(Debug, Error)]
enum AttemptFailure {
    #[error("{0}")]
    Backend(DomainError),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("unusable response: {0}")]
    Parse(ParseError),
}

impl AttemptFailure {
    fn status(&self) -> &'static str {
        match self {
            Self::Backend(_) => "backend_error",
            Self::Timeout(_) => "timeout",
            Self::Parse(_) => "parse_error",
        }
    }
}

impl From<DomainError> for AttemptFailure {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Timeout { elapsed, .. } => Self::Timeout(elapsed),
            other => Self::Backend(other),
        }
    }
}

/// Turns review text into a sentiment judgment.
///
/// `analyze` is total: for any input it returns a result, falling back to the
/// lexicon analyzer when the backend is disabled or every attempt failed.
#[derive(Debug)]
pub struct SentimentService {
    provider: Arc<dyn LlmProvider>,
    cache: Arc<dyn ResultCache>,
    fallback: LexiconAnalyzer,
    config: SentimentServiceConfig,
}

impl SentimentService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        cache: Arc<dyn ResultCache>,
        config: SentimentServiceConfig,
    ) -> Result<Self, DomainError> {
        if config.max_retries == 0 {
            return Err(DomainError::configuration("max_retries must be at least 1"));
        }

        Ok(Self {
            provider,
            cache,
            fallback: LexiconAnalyzer::new(),
            config,
        })
    }

    pub fn config(&self) -> &SentimentServiceConfig {
        &self.config
    }

    /// Analyze one review
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str, use_cache: bool) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }

        if use_cache {
            if let Some(cached) = self.cache.get(text) {
                debug!(preview = %preview(text), "Cache hit");
                return cached;
            }
        }

        let result = if !self.config.use_backend {
            record_fallback("disabled");
            debug!("Backend disabled, using lexicon analyzer");
            self.fallback.analyze(text)
        } else {
            match self.analyze_with_backend(text).await {
                Ok(result) => result,
                Err(failure) => {
                    record_fallback("exhausted");
                    warn!(
                        max_retries = self.config.max_retries,
                        error = %failure,
                        preview = %preview(text),
                        "Backend attempts exhausted, using lexicon analyzer"
                    );
                    self.fallback.analyze(text)
                }
            }
        };

        if use_cache {
            self.cache.set(text, result);
        }

        result
    }

    /// Runs the retry loop and returns the last failure once attempts run out
    async fn analyze_with_backend(&self, text: &str) -> Result<SentimentResult, AttemptFailure> {
        let prompt = build_sentiment_prompt(text);
        let max_retries = self.config.max_retries;
        let mut attempt = 1;

        loop {
            let started = Instant::now();
            let outcome = self.attempt(&prompt).await;

            record_backend_attempt(BackendAttemptMetricParams {
                provider: self.provider.provider_name(),
                model: &self.config.model,
                status: match &outcome {
                    Ok(_) => "success",
                    Err(failure) => failure.status(),
                },
                duration: started.elapsed(),
            });

            let failure = match outcome {
                Ok(result) => {
                    debug!(attempt, polarity = result.polarity(), "Backend attempt succeeded");
                    return Ok(result);
                }
                Err(failure) => failure,
            };

            warn!(attempt, max_retries, error = %failure, "Backend attempt failed");

            if attempt >= max_retries {
                return Err(failure);
            }

            tokio::time::sleep(self.backoff_delay(attempt)).await;
            attempt += 1;
        }
    }

    /// Linear backoff after the given 1-based attempt
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.config.retry_delay.saturating_mul(attempt)
    }

    async fn attempt(&self, prompt: &str) -> Result<SentimentResult, AttemptFailure> {
        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.config.temperature)
            .build();

        let response = tokio::time::timeout(
            self.config.request_timeout,
            self.provider.chat(&self.config.model, request),
        )
        .await
        .map_err(|_| AttemptFailure::Timeout(self.config.request_timeout))??;

        parse_sentiment(response.content()).map_err(AttemptFailure::Parse)
    }

    /// Lightweight reachability check; never fails
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> bool {
        let listing = tokio::time::timeout(self.config.request_timeout, self.provider.list_models());

        match listing.await {
            Ok(Ok(models)) => {
                debug!(models = models.len(), "Backend reachable");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "Backend health check timed out"
                );
                false
            }
        }
    }

    pub async fn backend_status(&self) -> BackendStatus {
        BackendStatus {
            available: self.health_check().await,
            model: self.config.model.clone(),
            base_url: self.provider.base_url().to_string(),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_clear(&self) {
        self.cache.clear();
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();

    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
