use std::time::Duration;

use serde::Deserialize;

use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Remote inference backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// When false every request goes straight to the lexicon analyzer
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub request_timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: f64,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub concurrency_limit: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_string(),
            model: "gpt-oss:120b-cloud".to_string(),
            request_timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 1.0,
            temperature: 0.1,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Saturates at `Duration::MAX` for delays too large to represent
    pub fn retry_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.retry_delay_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 5,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SENTIMENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Rejects settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.backend.enabled && self.backend.base_url.trim().is_empty() {
            return Err(DomainError::configuration("backend.base_url must not be empty"));
        }

        if self.backend.enabled && self.backend.model.trim().is_empty() {
            return Err(DomainError::configuration("backend.model must not be empty"));
        }

        if self.backend.max_retries == 0 {
            return Err(DomainError::configuration(
                "backend.max_retries must be at least 1",
            ));
        }

        if self.backend.request_timeout_seconds == 0 {
            return Err(DomainError::configuration(
                "backend.request_timeout_seconds must be greater than zero",
            ));
        }

        if !self.backend.retry_delay_seconds.is_finite() || self.backend.retry_delay_seconds < 0.0 {
            return Err(DomainError::configuration(
                "backend.retry_delay_seconds must be a non-negative number",
            ));
        }

        if Duration::try_from_secs_f64(self.backend.retry_delay_seconds).is_err() {
            return Err(DomainError::configuration(
                "backend.retry_delay_seconds is too large",
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(DomainError::configuration(
                "cache.ttl_seconds must be greater than zero",
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(DomainError::configuration(
                "cache.max_entries must be greater than zero",
            ));
        }

        if self.batch.concurrency_limit == 0 {
            return Err(DomainError::configuration(
                "batch.concurrency_limit must be greater than zero",
            ));
        }

        Ok(())
    }
}
