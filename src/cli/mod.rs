//! CLI module for review sentiment
//!
//! Provides subcommands around the inference pipeline:
//! - `analyze`: score a single review
//! - `batch`: score one review per input line
//! - `health`: check the remote backend

pub mod analyze;
pub mod batch;
pub mod health;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Review sentiment - resilient LLM-backed sentiment scoring
#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a single review
    Analyze(analyze::AnalyzeArgs),

    /// Analyze many reviews, one per line
    Batch(batch::BatchArgs),

    /// Report backend availability
    Health,
}

/// Load `.env`, layered configuration and logging
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = config_or_default(AppConfig::load());
    logging::init_logging(&config.logging);

    if let Some(error) = load_error {
        warn!(error = %error, "Failed to load configuration, using defaults");
    }

    config
}

/// Falls back to defaults, handing the load error back so it can be logged
/// once the subscriber is installed
fn config_or_default(
    loaded: Result<AppConfig, ::config::ConfigError>,
) -> (AppConfig, Option<::config::ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(error) => (AppConfig::default(), Some(error)),
    }
}
