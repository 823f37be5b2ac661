//! Application configuration

mod app_config;

pub use app_config::{AppConfig, BackendConfig, BatchConfig, CacheConfig, LogFormat, LoggingConfig};
