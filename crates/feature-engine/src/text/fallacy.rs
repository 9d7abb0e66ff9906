//! Fallacy indicator counting.
//!
//! Four phrase classes are counted case-insensitively on word boundaries;
//! the score is `min(total / 4, 1)`.

use lazy_static::lazy_static;
use regex::Regex;

use super::{score_text, TextScorer};
use crate::result::MetricResult;

lazy_static! {
    // Universal quantifiers
    static ref UNIVERSAL: Regex = Regex::new(r"(?i)\b(?:everyone|nobody)\b").unwrap();

    // Absolute modifiers
    static ref ABSOLUTE: Regex = Regex::new(r"(?i)\b(?:always|never)\b").unwrap();

    // Certainty markers
    static ref CERTAINTY: Regex = Regex::new(r"(?i)\b(?:obviously|clearly)\b").unwrap();

    // Causal claim: "must be ... because", shortest span, may cross lines
    static ref CAUSAL: Regex = Regex::new(r"(?is)\bmust\s+be\b.*?\bbecause\b").unwrap();
}

/// Number of indicators that saturates the score.
const SATURATION: f64 = 4.0;

/// Per-class indicator counts, for explaining a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorCounts {
    pub universal: usize,
    pub absolute: usize,
    pub certainty: usize,
    pub causal: usize,
}

impl IndicatorCounts {
    pub fn from_text(text: &str) -> Self {
        Self {
            universal: UNIVERSAL.find_iter(text).count(),
            absolute: ABSOLUTE.find_iter(text).count(),
            certainty: CERTAINTY.find_iter(text).count(),
            causal: CAUSAL.find_iter(text).count(),
        }
    }

    pub fn total(&self) -> usize {
        self.universal + self.absolute + self.certainty + self.causal
    }
}

/// Built-in fallacy scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallacyScorer;

impl TextScorer for FallacyScorer {
    fn name(&self) -> &'static str {
        "fallacy"
    }

    fn score(&self, text: &str) -> MetricResult<f64> {
        score_text(self.name(), text, |text| {
            let count = IndicatorCounts::from_text(text).total() as f64;
            Ok((count / SATURATION).min(1.0))
        })
    }
}
