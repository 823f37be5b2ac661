//! Sentiment domain - results, response parsing, prompting and offline scoring

mod fallback;
mod parser;
mod prompt;
mod result;

pub use fallback::LexiconAnalyzer;
pub use parser::{ParseError, extract_json_object, parse_sentiment};
pub use prompt::build_sentiment_prompt;
pub use result::{SentimentLabel, SentimentResult};
