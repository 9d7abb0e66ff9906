//! UTRD: the composite text report.
//!
//! Runs the four text engines, combines them with a fixed weight vector and
//! emits a report with a fixed wire form:
//!
//! ```json
//! {
//!   "input": "<first 50 chars>...",
//!   "metrics": {
//!     "fallacy_score": 0.25,
//!     "entropy_score": 0.912,
//!     "contradiction_score": 0.0,
//!     "signal_sharpness": 0.4,
//!     "composite_score": 0.758
//!   },
//!   "timestamp": "2026-01-01T00:00:00Z"
//! }
//! ```
//!
//! Blank input is a domain error here, even though each sub-engine treats
//! blank text as a zero signal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EngineError, Result};
use crate::result::{guarded, DomainErrorKind, MetricResult};
use crate::text::{round3, TextEngine, TextScorer};

/// Characters of input echoed in a report before truncation.
pub const ECHO_LIMIT: usize = 50;
const ELLIPSIS: &str = "...";

/// Weights of the composite score.
///
/// ```text
/// composite = sharpness × w1 + entropy × w2 + (1 − fallacy) × w3 + (1 − contradiction) × w4
/// ```
///
/// The values (0.3 / 0.2 / 0.3 / 0.2) are a fixed policy, not a tuned
/// quantity, and cannot be changed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeWeights {
    sharpness: f64,
    entropy: f64,
    fallacy: f64,
    contradiction: f64,
}

impl CompositeWeights {
    pub const DEFAULT: CompositeWeights = CompositeWeights {
        sharpness: 0.3,
        entropy: 0.2,
        fallacy: 0.3,
        contradiction: 0.2,
    };

    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }

    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn fallacy(&self) -> f64 {
        self.fallacy
    }

    pub fn contradiction(&self) -> f64 {
        self.contradiction
    }

    /// Apply the weights to four sub-scores, clamped to [0, 1] and rounded
    /// to 3 decimals.
    pub fn combine(&self, fallacy: f64, entropy: f64, contradiction: f64, sharpness: f64) -> f64 {
        let composite = sharpness * self.sharpness
            + entropy * self.entropy
            + (1.0 - fallacy) * self.fallacy
            + (1.0 - contradiction) * self.contradiction;
        round3(composite.clamp(0.0, 1.0))
    }
}

/// The four sub-scores of a report.
///
/// `composite_score` is never stored: it is recomputed from the sub-scores
/// whenever it is read or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "WireMetrics")]
pub struct ReportMetrics {
    fallacy_score: f64,
    entropy_score: f64,
    contradiction_score: f64,
    signal_sharpness: f64,
}

impl ReportMetrics {
    /// Build from sub-scores, each of which must lie in [0, 1].
    pub fn new(
        fallacy_score: f64,
        entropy_score: f64,
        contradiction_score: f64,
        signal_sharpness: f64,
    ) -> Result<Self> {
        for (engine, value) in [
            (TextEngine::Fallacy, fallacy_score),
            (TextEngine::Entropy, entropy_score),
            (TextEngine::Contradiction, contradiction_score),
            (TextEngine::Sharpness, signal_sharpness),
        ] {
            check_bounded(engine, value)?;
        }
        Ok(Self {
            fallacy_score,
            entropy_score,
            contradiction_score,
            signal_sharpness,
        })
    }

    pub fn fallacy_score(&self) -> f64 {
        self.fallacy_score
    }

    pub fn entropy_score(&self) -> f64 {
        self.entropy_score
    }

    pub fn contradiction_score(&self) -> f64 {
        self.contradiction_score
    }

    pub fn signal_sharpness(&self) -> f64 {
        self.signal_sharpness
    }

    pub fn composite_score(&self) -> f64 {
        CompositeWeights::DEFAULT.combine(
            self.fallacy_score,
            self.entropy_score,
            self.contradiction_score,
            self.signal_sharpness,
        )
    }

    /// Sub-score for one engine.
    pub fn get(&self, engine: TextEngine) -> f64 {
        match engine {
            TextEngine::Fallacy => self.fallacy_score,
            TextEngine::Entropy => self.entropy_score,
            TextEngine::Contradiction => self.contradiction_score,
            TextEngine::Sharpness => self.signal_sharpness,
        }
    }
}

impl Serialize for ReportMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReportMetrics", 5)?;
        state.serialize_field("fallacy_score", &self.fallacy_score)?;
        state.serialize_field("entropy_score", &self.entropy_score)?;
        state.serialize_field("contradiction_score", &self.contradiction_score)?;
        state.serialize_field("signal_sharpness", &self.signal_sharpness)?;
        state.serialize_field("composite_score", &self.composite_score())?;
        state.end()
    }
}

/// Metrics exactly as they appear on the wire.
#[derive(Deserialize)]
struct WireMetrics {
    fallacy_score: f64,
    entropy_score: f64,
    contradiction_score: f64,
    signal_sharpness: f64,
    composite_score: f64,
}

impl TryFrom<WireMetrics> for ReportMetrics {
    type Error = String;

    fn try_from(wire: WireMetrics) -> std::result::Result<Self, Self::Error> {
        let metrics = ReportMetrics::new(
            wire.fallacy_score,
            wire.entropy_score,
            wire.contradiction_score,
            wire.signal_sharpness,
        )
        .map_err(|e| e.to_string())?;

        let recomputed = metrics.composite_score();
        if (recomputed - wire.composite_score).abs() > 1e-9 {
            return Err(format!(
                "composite_score {} does not match sub-scores (expected {recomputed})",
                wire.composite_score
            ));
        }
        Ok(metrics)
    }
}

/// Immutable result of one UTRD run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeReport {
    input: String,
    metrics: ReportMetrics,
    timestamp: DateTime<Utc>,
}

impl CompositeReport {
    pub fn new(text: &str, metrics: ReportMetrics, timestamp: DateTime<Utc>) -> Self {
        Self {
            input: echo(text),
            metrics,
            timestamp,
        }
    }

    /// Input echo, truncated to [`ECHO_LIMIT`] characters plus "..."
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn metrics(&self) -> &ReportMetrics {
        &self.metrics
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn composite_score(&self) -> f64 {
        self.metrics.composite_score()
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse the wire form; rejects a composite that disagrees with the
    /// sub-scores.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn echo(text: &str) -> String {
    match text.char_indices().nth(ECHO_LIMIT) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// The composite aggregator.
///
/// Holds one scorer per slot. The default uses the built-in heuristics; any
/// slot can be swapped for another [`TextScorer`].
#[derive(Clone)]
pub struct Utrd {
    fallacy: Arc<dyn TextScorer>,
    entropy: Arc<dyn TextScorer>,
    contradiction: Arc<dyn TextScorer>,
    sharpness: Arc<dyn TextScorer>,
}

impl Default for Utrd {
    fn default() -> Self {
        Self {
            fallacy: Arc::new(crate::text::FallacyScorer),
            entropy: Arc::new(crate::text::EntropyScorer),
            contradiction: Arc::new(crate::text::ContradictionScorer),
            sharpness: Arc::new(crate::text::SharpnessScorer),
        }
    }
}

impl std::fmt::Debug for Utrd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Utrd")
            .field("fallacy", &self.fallacy.name())
            .field("entropy", &self.entropy.name())
            .field("contradiction", &self.contradiction.name())
            .field("sharpness", &self.sharpness.name())
            .finish()
    }
}

lazy_static! {
    static ref BUILTIN: Utrd = Utrd::default();
}

impl Utrd {
    pub fn with_scorers(
        fallacy: Arc<dyn TextScorer>,
        entropy: Arc<dyn TextScorer>,
        contradiction: Arc<dyn TextScorer>,
        sharpness: Arc<dyn TextScorer>,
    ) -> Self {
        Self {
            fallacy,
            entropy,
            contradiction,
            sharpness,
        }
    }

    /// Replace the scorer in one slot.
    pub fn with_scorer(mut self, slot: TextEngine, scorer: Arc<dyn TextScorer>) -> Self {
        match slot {
            TextEngine::Fallacy => self.fallacy = scorer,
            TextEngine::Entropy => self.entropy = scorer,
            TextEngine::Contradiction => self.contradiction = scorer,
            TextEngine::Sharpness => self.sharpness = scorer,
        }
        self
    }

    /// The four sub-scores, computed concurrently.
    pub fn metrics(&self, text: &str) -> MetricResult<ReportMetrics> {
        guarded("utrd", || self.compute_metrics(text))
    }

    /// Full report stamped with the current time.
    pub fn report(&self, text: &str) -> MetricResult<CompositeReport> {
        self.report_at(text, Utc::now())
    }

    /// Full report with a caller-supplied timestamp.
    pub fn report_at(&self, text: &str, timestamp: DateTime<Utc>) -> MetricResult<CompositeReport> {
        guarded("utrd", || {
            let metrics = self.compute_metrics(text)?;
            let report = CompositeReport::new(text, metrics, timestamp);
            tracing::debug!(
                composite = report.composite_score(),
                chars = text.chars().count(),
                "assembled composite report"
            );
            Ok(report)
        })
    }

    fn compute_metrics(&self, text: &str) -> Result<ReportMetrics> {
        if text.trim().is_empty() {
            return Err(DomainErrorKind::EmptyInput.into());
        }

        let ((fallacy, entropy), (contradiction, sharpness)) = rayon::join(
            || rayon::join(|| self.fallacy.score(text), || self.entropy.score(text)),
            || {
                rayon::join(
                    || self.contradiction.score(text),
                    || self.sharpness.score(text),
                )
            },
        );

        ReportMetrics::new(
            sub_score(TextEngine::Fallacy, fallacy)?,
            sub_score(TextEngine::Entropy, entropy)?,
            sub_score(TextEngine::Contradiction, contradiction)?,
            sub_score(TextEngine::Sharpness, sharpness)?,
        )
    }
}

/// A sub-engine that does not produce a value is an internal failure of the
/// composite, never a domain error of the caller's input.
fn sub_score(slot: TextEngine, result: MetricResult<f64>) -> Result<f64> {
    result.into_result().map_err(|err| match err {
        EngineError::Domain(kind) => {
            EngineError::Internal(format!("{slot} scorer rejected input: {kind}"))
        }
        EngineError::Internal(message) => {
            EngineError::Internal(format!("{slot} scorer failed: {message}"))
        }
    })
}

fn check_bounded(slot: TextEngine, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::Internal(format!(
            "{} = {value} is outside [0, 1]",
            slot.metric_name()
        )))
    }
}

/// Composite report for `text` using the built-in scorers.
pub fn utrd(text: &str) -> MetricResult<CompositeReport> {
    BUILTIN.report(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed(f64);

    impl TextScorer for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn score(&self, _text: &str) -> MetricResult<f64> {
            MetricResult::Value(self.0)
        }
    }

    struct Refusing;

    impl TextScorer for Refusing {
        fn name(&self) -> &'static str {
            "refusing"
        }

        fn score(&self, _text: &str) -> MetricResult<f64> {
            MetricResult::DomainError(DomainErrorKind::EmptyInput)
        }
    }

    fn pinned() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = CompositeWeights::DEFAULT;
        let sum = w.sharpness() + w.entropy() + w.fallacy() + w.contradiction();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_combine_extremes() {
        let w = CompositeWeights::DEFAULT;
        assert_eq!(w.combine(0.0, 1.0, 0.0, 1.0), 1.0);
        assert_eq!(w.combine(1.0, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(w.combine(0.25, 0.5, 0.0, 0.75), 0.75);
    }

    #[test]
    fn test_blank_is_domain_error() {
        for text in ["", "   ", "\n"] {
            assert_eq!(
                utrd(text).domain_error(),
                Some(DomainErrorKind::EmptyInput)
            );
        }
    }

    #[test]
    fn test_echo_truncation() {
        let short = "short input";
        assert_eq!(echo(short), short);

        let exact: String = "x".repeat(ECHO_LIMIT);
        assert_eq!(echo(&exact), exact);

        let long: String = "é".repeat(ECHO_LIMIT + 5);
        let echoed = echo(&long);
        assert_eq!(echoed, format!("{}...", "é".repeat(ECHO_LIMIT)));
    }

    #[test]
    fn test_substitute_scorers() {
        let utrd = Utrd::with_scorers(
            Arc::new(Fixed(0.25)),
            Arc::new(Fixed(0.5)),
            Arc::new(Fixed(0.0)),
            Arc::new(Fixed(0.75)),
        );
        let report = utrd.report_at("anything", pinned()).into_value().unwrap();
        assert_eq!(report.composite_score(), 0.75);
        assert_eq!(report.metrics().get(TextEngine::Entropy), 0.5);
        assert_eq!(report.timestamp(), pinned());
    }

    #[test]
    fn test_failing_slot_is_internal_error() {
        let utrd = Utrd::default().with_scorer(TextEngine::Contradiction, Arc::new(Refusing));
        match utrd.metrics("Some text.") {
            MetricResult::InternalError(message) => assert!(message.contains("contradiction")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_slot_is_internal_error() {
        let utrd = Utrd::default().with_scorer(TextEngine::Sharpness, Arc::new(Fixed(1.5)));
        match utrd.metrics("Some text.") {
            MetricResult::InternalError(message) => assert!(message.contains("signal_sharpness")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_wire_rejects_tampered_composite() {
        let metrics = ReportMetrics::new(0.25, 0.5, 0.0, 0.75).unwrap();
        let report = CompositeReport::new("x", metrics, pinned());
        let json = report.to_json().unwrap();
        assert!(json.contains(r#""composite_score":0.75"#));
        assert_eq!(CompositeReport::from_json(&json).unwrap(), report);

        let tampered = json.replace(r#""composite_score":0.75"#, r#""composite_score":0.9"#);
        assert!(CompositeReport::from_json(&tampered).is_err());
    }
}
