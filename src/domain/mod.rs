//! Domain layer - Core types, contracts and pure sentiment logic

pub mod cache;
pub mod error;
pub mod llm;
pub mod sentiment;

pub use cache::{CacheKey, CacheStats, ResultCache};
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole};
pub use sentiment::{
    LexiconAnalyzer, ParseError, SentimentLabel, SentimentResult, build_sentiment_prompt,
    extract_json_object, parse_sentiment,
};
