/// Builds the instruction sent to the backend for a single review.
///
/// The model is asked for a bare two-field JSON object so that
/// [`parse_sentiment`](super::parse_sentiment) can decode it.
pub fn build_sentiment_prompt(review_text: &str) -> String {
    format!(
        r#"You are a sentiment analysis assistant. Analyze the sentiment of the following customer review and return ONLY a valid JSON object with exactly this format:
{{"polarity": <number between -1.0 and 1.0>, "label": "<positive or negative>"}}

Rules:
- polarity: -1.0 (very negative) to 1.0 (very positive), where 0.0 is neutral
- label: "positive" if polarity > 0, "negative" if polarity <= 0
- Return ONLY the JSON object, no additional text, no explanations

Review: {review_text}

JSON:"#
    )
}
