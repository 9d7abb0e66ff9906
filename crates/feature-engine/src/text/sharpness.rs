//! Signal sharpness: concrete tokens versus hedging.
//!
//! ```text
//! sharpness = clamp(0, 1, 2 * (numbers + capitalized) / total - 2 * hedges / total)
//! ```

use super::{normalize_word, score_text, TextScorer};
use crate::result::MetricResult;

const HEDGE_WORDS: [&str; 6] = ["maybe", "perhaps", "possibly", "probably", "might", "could"];

/// Token counts behind a sharpness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub numbers: usize,
    pub capitalized: usize,
    pub hedges: usize,
}

impl TokenCounts {
    pub fn from_text(text: &str) -> Self {
        let mut counts = Self::default();
        for token in text.split_whitespace() {
            counts.total += 1;

            let numeric = is_numeric(token);
            if numeric {
                counts.numbers += 1;
            } else if is_capitalized(token) {
                counts.capitalized += 1;
            }

            if HEDGE_WORDS.contains(&normalize_word(token).as_str()) {
                counts.hedges += 1;
            }
        }
        counts
    }

    /// Unclamped sharpness; 0.0 when there are no tokens.
    pub fn raw_score(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        2.0 * (self.numbers + self.capitalized) as f64 / total - 2.0 * self.hedges as f64 / total
    }
}

// "72.5", "14:23", "16th", "3%" all count
fn is_numeric(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

fn is_capitalized(token: &str) -> bool {
    token
        .chars()
        .find(|c| c.is_alphanumeric())
        .is_some_and(char::is_uppercase)
}

/// Built-in sharpness scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharpnessScorer;

impl TextScorer for SharpnessScorer {
    fn name(&self) -> &'static str {
        "sharpness"
    }

    fn score(&self, text: &str) -> MetricResult<f64> {
        score_text(self.name(), text, |text| Ok(TokenCounts::from_text(text).raw_score()))
    }
}
