//! Batch command - scores one review per non-empty input line

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::create_sentiment_stack;

/// Arguments for the batch command
#[derive(Args, Clone)]
pub struct BatchArgs {
    /// File with one review per line (reads stdin when omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Maximum concurrent analyses (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let stack = create_sentiment_stack(&config)?;

    let input = read_input(args.file.as_ref()).await?;
    let texts = parse_lines(&input);
    let limit = args.concurrency.unwrap_or(stack.batch.default_limit());

    let results = stack.batch.analyze_batch(&texts, limit).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    let stats = stack.service.cache_stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        size = stats.size,
        hit_rate = stats.hit_rate,
        "Cache statistics"
    );

    Ok(())
}

async fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
