//! Typed requests and dispatch.
//!
//! A [`MetricRequest`] names its target engine and carries that engine's
//! inputs. [`evaluate`] routes it to the engine; [`evaluate_batch`] does the
//! same for many rows, optionally across the rayon pool.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chemistry::{atomic_number, element_name};
use crate::composite::{utrd, CompositeReport};
use crate::config::BatchConfig;
use crate::geometry::distance_km;
use crate::physics::frequency;
use crate::result::MetricResult;
use crate::text::TextEngine;

/// One engine invocation, tagged by engine name.
///
/// ```
/// use feature_engine::MetricRequest;
///
/// let request: MetricRequest =
///     serde_json::from_str(r#"{"engine":"atomic_number","symbol":"Au"}"#).unwrap();
/// assert_eq!(request, MetricRequest::AtomicNumber { symbol: "Au".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum MetricRequest {
    Frequency {
        wavelength_mm: f64,
    },
    AtomicNumber {
        symbol: String,
    },
    ElementName {
        symbol: String,
    },
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    Text {
        scorer: TextEngine,
        text: String,
    },
    Utrd {
        text: String,
    },
}

impl MetricRequest {
    /// Engine name as used in the `engine` tag.
    pub fn engine(&self) -> &'static str {
        match self {
            Self::Frequency { .. } => "frequency",
            Self::AtomicNumber { .. } => "atomic_number",
            Self::ElementName { .. } => "element_name",
            Self::Distance { .. } => "distance",
            Self::Text { .. } => "text",
            Self::Utrd { .. } => "utrd",
        }
    }
}

/// Success payload of any engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(u32),
    Real(f64),
    Label(String),
    Report(CompositeReport),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Label(s) => f.write_str(s),
            Self::Report(report) => {
                let json = report.to_json().map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Run one request through its engine.
pub fn evaluate(request: &MetricRequest) -> MetricResult<MetricValue> {
    tracing::trace!(engine = request.engine(), "evaluating request");
    match request {
        MetricRequest::Frequency { wavelength_mm } => {
            frequency(*wavelength_mm).map(MetricValue::Real)
        }
        MetricRequest::AtomicNumber { symbol } => atomic_number(symbol).map(MetricValue::Integer),
        MetricRequest::ElementName { symbol } => element_name(symbol).map(MetricValue::Label),
        MetricRequest::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => distance_km(*lat1, *lon1, *lat2, *lon2).map(MetricValue::Real),
        MetricRequest::Text { scorer, text } => scorer.score(text).map(MetricValue::Real),
        MetricRequest::Utrd { text } => utrd(text).map(MetricValue::Report),
    }
}

/// Evaluate many requests, preserving input order.
///
/// Rows are independent, so large batches are spread over the rayon pool
/// without any coordination.
pub fn evaluate_batch(
    requests: &[MetricRequest],
    config: &BatchConfig,
) -> Vec<MetricResult<MetricValue>> {
    if config.should_parallelize(requests.len()) {
        tracing::debug!(rows = requests.len(), "evaluating batch in parallel");
        requests.par_iter().map(evaluate).collect()
    } else {
        requests.iter().map(evaluate).collect()
    }
}
