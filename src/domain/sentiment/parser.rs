//! Extraction of a sentiment judgment from free-form model output

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::result::{SentimentLabel, SentimentResult};

/// Reasons a model response could not be turned into a sentiment result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("response is empty")]
    Empty,

    #[error("no JSON object found in response")]
    NoObject,

    #[error("JSON object in response has no matching closing brace")]
    UnbalancedBraces,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("extracted JSON is not an object")]
    NotAnObject,

    #[error("missing required field 'polarity'")]
    MissingPolarity,

    #[error("polarity is not a finite number: {0}")]
    InvalidPolarity(String),
}

/// Locates the first balanced `{ ... }` block in `text`.
///
/// Scans from the first opening brace, counting depth, and returns the slice
/// ending at the brace that brings the depth back to zero.
pub fn extract_json_object(text: &str) -> Result<&str, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoObject)?;
    let mut depth = 0usize;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;

                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(ParseError::UnbalancedBraces)
}

/// Parses a raw model response into a validated [`SentimentResult`].
///
/// The whole trimmed text is tried first; if it is not an object carrying both
/// `polarity` and `label`, the first balanced brace block is extracted and decoded.
pub fn parse_sentiment(raw: &str) -> Result<SentimentResult, ParseError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) {
        if object.contains_key("polarity") && object.contains_key("label") {
            return validate(&object);
        }
    }

    let candidate = extract_json_object(trimmed)?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => validate(&object),
        Ok(_) => Err(ParseError::NotAnObject),
        Err(e) => Err(ParseError::InvalidJson(e.to_string())),
    }
}

fn validate(object: &Map<String, Value>) -> Result<SentimentResult, ParseError> {
    let polarity = object
        .get("polarity")
        .ok_or(ParseError::MissingPolarity)
        .and_then(coerce_polarity)?;

    let result = SentimentResult::new(polarity, 0.0);

    let reported = object.get("label").and_then(coerce_label);

    if reported != Some(result.label()) {
        debug!(
            reported = ?object.get("label"),
            derived = %result.label(),
            "Model label missing or inconsistent with polarity, using derived label"
        );
    }

    Ok(result)
}

fn coerce_polarity(value: &Value) -> Result<f64, ParseError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ParseError::InvalidPolarity(value.to_string())),
    }
}

fn coerce_label(value: &Value) -> Option<SentimentLabel> {
    match value {
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
