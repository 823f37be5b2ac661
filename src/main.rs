use clap::Parser;
use review_sentiment::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => cli::analyze::run(args).await,
        Command::Batch(args) => cli::batch::run(args).await,
        Command::Health => cli::health::run().await,
    }
}
