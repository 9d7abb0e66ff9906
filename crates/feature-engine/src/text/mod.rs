//! Heuristic text engines.
//!
//! Four independent scorers map text to a bounded score in [0, 1]:
//!
//! | Engine          | Signal                                           |
//! |-----------------|--------------------------------------------------|
//! | `fallacy`       | indicator phrases (absolutes, certainty, causal) |
//! | `entropy`       | Shannon entropy of alphanumeric characters       |
//! | `contradiction` | negated/affirmed sentence pairs sharing words    |
//! | `sharpness`     | numbers and proper nouns versus hedge words      |
//!
//! Blank text is "no signal" and scores exactly 0.0; it is never an error.
//! Every scorer sits behind [`TextScorer`], so any of them can be replaced
//! (for instance by a model-backed implementation) without touching the
//! composite aggregator.

pub mod contradiction;
pub mod entropy;
pub mod fallacy;
pub mod sharpness;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use contradiction::ContradictionScorer;
pub use entropy::EntropyScorer;
pub use fallacy::FallacyScorer;
pub use sharpness::SharpnessScorer;

use crate::error::{ensure_finite, Result};
use crate::result::{guarded, MetricResult};

/// Capability shared by every text engine.
///
/// Implementations must be pure: the same text always yields the same
/// outcome, blank text yields `Value(0.0)`, and values stay within [0, 1].
pub trait TextScorer: Send + Sync {
    /// Canonical engine name.
    fn name(&self) -> &'static str;

    /// Score the text.
    fn score(&self, text: &str) -> MetricResult<f64>;
}

/// The four built-in text engines, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEngine {
    #[serde(alias = "fallacy_score")]
    Fallacy,
    #[serde(alias = "entropy_score")]
    Entropy,
    #[serde(alias = "contradiction_score")]
    Contradiction,
    #[serde(alias = "signal_sharpness")]
    Sharpness,
}

static FALLACY: FallacyScorer = FallacyScorer;
static ENTROPY: EntropyScorer = EntropyScorer;
static CONTRADICTION: ContradictionScorer = ContradictionScorer;
static SHARPNESS: SharpnessScorer = SharpnessScorer;

impl TextEngine {
    pub const ALL: [TextEngine; 4] = [
        TextEngine::Fallacy,
        TextEngine::Entropy,
        TextEngine::Contradiction,
        TextEngine::Sharpness,
    ];

    /// Canonical engine name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fallacy => "fallacy",
            Self::Entropy => "entropy",
            Self::Contradiction => "contradiction",
            Self::Sharpness => "sharpness",
        }
    }

    /// Key used for this engine in the composite report.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::Fallacy => "fallacy_score",
            Self::Entropy => "entropy_score",
            Self::Contradiction => "contradiction_score",
            Self::Sharpness => "signal_sharpness",
        }
    }

    /// The built-in heuristic implementation.
    pub fn scorer(&self) -> &'static dyn TextScorer {
        match self {
            Self::Fallacy => &FALLACY,
            Self::Entropy => &ENTROPY,
            Self::Contradiction => &CONTRADICTION,
            Self::Sharpness => &SHARPNESS,
        }
    }

    pub fn score(&self, text: &str) -> MetricResult<f64> {
        self.scorer().score(text)
    }
}

impl fmt::Display for TextEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEngine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|engine| engine.name() == wanted || engine.metric_name() == wanted)
            .ok_or_else(|| format!("unknown text engine: {s}"))
    }
}

/// Fallacy indicator score. See [`fallacy`].
pub fn fallacy_score(text: &str) -> MetricResult<f64> {
    FALLACY.score(text)
}

/// Normalized character entropy. See [`entropy`].
pub fn entropy_score(text: &str) -> MetricResult<f64> {
    ENTROPY.score(text)
}

/// Contradiction candidate score. See [`contradiction`].
pub fn contradiction_score(text: &str) -> MetricResult<f64> {
    CONTRADICTION.score(text)
}

/// Signal sharpness score. See [`sharpness`].
pub fn sharpness(text: &str) -> MetricResult<f64> {
    SHARPNESS.score(text)
}

/// Round to 3 decimal places, half away from zero.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Shared boundary for the built-in scorers: blank text is 0.0, the raw
/// score is checked, clamped to [0, 1] and rounded to 3 decimals.
pub(crate) fn score_text(
    engine: &'static str,
    text: &str,
    compute: impl FnOnce(&str) -> Result<f64>,
) -> MetricResult<f64> {
    guarded(engine, || {
        if text.trim().is_empty() {
            return Ok(0.0);
        }
        let raw = ensure_finite(compute(text)?, engine)?;
        Ok(round3(raw.clamp(0.0, 1.0)))
    })
}

/// Lower-cased word with surrounding punctuation removed.
///
/// Inner apostrophes survive so contractions such as "don't" stay intact.
pub(crate) fn normalize_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .replace('\u{2019}', "'")
        .to_lowercase()
}
