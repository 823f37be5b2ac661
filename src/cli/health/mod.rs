//! Health command - prints backend availability as JSON

use crate::create_sentiment_stack;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap();
    let stack = create_sentiment_stack(&config)?;

    let status = stack.service.backend_status().await;
    println!("{}", serde_json::to_string_pretty(&status)?);

    if !status.available {
        tracing::warn!("Backend unavailable, analyses will use the lexicon fallback");
    }

    Ok(())
}
