use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Sentiment label; always derived from the sign of the polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Positive iff polarity is strictly greater than zero
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            _ => Err(()),
        }
    }
}

/// Immutable sentiment judgment for a single text
///
/// Polarity is kept within `[-1.0, 1.0]`, subjectivity within `[0.0, 1.0]`,
/// and the label is recomputed from the polarity at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    polarity: f64,
    subjectivity: f64,
    label: SentimentLabel,
}

impl SentimentResult {
    /// Builds a result, clamping both scores into range.
    ///
    /// Non-finite inputs collapse to `0.0`.
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        let polarity = finite_or_zero(polarity).clamp(-1.0, 1.0);
        let subjectivity = finite_or_zero(subjectivity).clamp(0.0, 1.0);

        Self {
            polarity,
            subjectivity,
            label: SentimentLabel::from_polarity(polarity),
        }
    }

    /// The result returned for empty or whitespace-only input
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    pub fn subjectivity(&self) -> f64 {
        self.subjectivity
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    pub fn is_positive(&self) -> bool {
        self.label == SentimentLabel::Positive
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
