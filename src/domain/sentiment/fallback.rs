//! Lexicon-based sentiment scorer used when the remote backend is unavailable
//!
//! Each known word carries a polarity and a subjectivity weight. A preceding
//! intensifier scales the word, a negator within the preceding window flips and
//! damps it, and the text score is the mean over all scored words.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::result::SentimentResult;

/// How many tokens before a sentiment word are searched for a negator
const NEGATION_WINDOW: usize = 3;

/// Multiplier applied to a negated word's polarity
const NEGATION_FACTOR: f64 = -0.5;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        // positive
        ("good", 0.7, 0.6),
        ("great", 0.8, 0.75),
        ("excellent", 1.0, 1.0),
        ("amazing", 0.6, 0.9),
        ("awesome", 1.0, 1.0),
        ("fantastic", 0.4, 0.9),
        ("wonderful", 1.0, 1.0),
        ("perfect", 1.0, 1.0),
        ("best", 1.0, 0.3),
        ("love", 0.5, 0.6),
        ("loved", 0.7, 0.8),
        ("loves", 0.5, 0.6),
        ("like", 0.2, 0.3),
        ("nice", 0.6, 1.0),
        ("happy", 0.8, 1.0),
        ("pleased", 0.5, 0.5),
        ("satisfied", 0.5, 0.5),
        ("recommend", 0.4, 0.4),
        ("comfortable", 0.4, 0.7),
        ("beautiful", 0.85, 1.0),
        ("fast", 0.2, 0.6),
        ("quick", 0.33, 0.5),
        ("easy", 0.43, 0.83),
        ("sturdy", 0.4, 0.5),
        ("reliable", 0.5, 0.5),
        ("worth", 0.3, 0.1),
        ("fine", 0.42, 0.5),
        ("ok", 0.5, 0.5),
        ("okay", 0.5, 0.5),
        ("decent", 0.17, 0.5),
        ("cute", 0.5, 1.0),
        ("soft", 0.1, 0.3),
        ("fits", 0.2, 0.2),
        ("flattering", 0.4, 0.6),
        // negative
        ("bad", -0.7, 0.67),
        ("terrible", -1.0, 1.0),
        ("awful", -1.0, 1.0),
        ("horrible", -1.0, 1.0),
        ("worst", -1.0, 1.0),
        ("poor", -0.4, 0.6),
        ("hate", -0.8, 0.9),
        ("hated", -0.9, 0.7),
        ("disappointed", -0.75, 0.75),
        ("disappointing", -0.6, 0.7),
        ("broken", -0.4, 0.4),
        ("broke", -0.4, 0.4),
        ("cheap", -0.2, 0.7),
        ("useless", -0.5, 0.2),
        ("waste", -0.6, 0.3),
        ("return", -0.1, 0.1),
        ("returned", -0.2, 0.2),
        ("ugly", -0.7, 1.0),
        ("uncomfortable", -0.5, 0.6),
        ("slow", -0.3, 0.4),
        ("flimsy", -0.5, 0.6),
        ("defective", -0.6, 0.6),
        ("wrong", -0.5, 0.9),
        ("small", -0.25, 0.4),
        ("tight", -0.1, 0.5),
        ("scratchy", -0.3, 0.6),
        ("annoying", -0.8, 0.9),
        ("sad", -0.5, 1.0),
        ("angry", -0.5, 1.0),
        ("unfortunately", -0.5, 1.0),
        ("mediocre", -0.3, 0.5),
        ("meh", -0.1, 0.5),
    ]
    .into_iter()
    .map(|(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 1.3),
        ("extremely", 1.5),
        ("incredibly", 1.5),
        ("absolutely", 1.5),
        ("super", 1.3),
        ("so", 1.2),
        ("too", 1.2),
        ("quite", 1.1),
        ("pretty", 1.1),
        ("somewhat", 0.7),
        ("slightly", 0.5),
        ("barely", 0.4),
    ]
    .into_iter()
    .collect()
});

static NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "hardly", "cannot", "don't", "doesn't",
    "didn't", "isn't", "wasn't", "aren't", "weren't", "can't", "won't", "wouldn't", "shouldn't",
    "couldn't", "haven't", "hasn't",
];

/// Deterministic, offline sentiment scorer
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scores `text`; total over every input, including the empty string.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");
        let tokens: Vec<&str> = WORD_RE
            .find_iter(&normalized)
            .map(|m| m.as_str())
            .collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut scored = 0usize;

        for (index, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = LEXICON.get(token) else {
                continue;
            };

            let mut window_end = index;

            if let Some(factor) = index
                .checked_sub(1)
                .and_then(|prev| INTENSIFIERS.get(tokens[prev]))
            {
                polarity *= factor;
                subjectivity *= factor;
                window_end -= 1;
            }

            let window_start = window_end.saturating_sub(NEGATION_WINDOW);

            if tokens[window_start..window_end]
                .iter()
                .any(|t| NEGATORS.contains(t))
            {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            scored += 1;
        }

        if scored == 0 {
            return SentimentResult::neutral();
        }

        SentimentResult::new(
            polarity_sum / scored as f64,
            subjectivity_sum / scored as f64,
        )
    }
}
