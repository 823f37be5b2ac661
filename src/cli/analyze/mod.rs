//! Analyze command - scores one review and prints it as JSON

use clap::Args;

use crate::create_sentiment_stack;

/// Arguments for the analyze command
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Review text to analyze
    pub text: String,

    /// Skip the result cache
    #[arg(long)]
    pub no_cache: bool,
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let stack = create_sentiment_stack(&config)?;

    let result = stack.service.analyze(&args.text, !args.no_cache).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
