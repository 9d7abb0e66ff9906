//! feature-engine: pure metric engines and the composite UTRD report.
//!
//! This crate runs a fixed set of independent engines over heterogeneous
//! inputs and optionally fuses the text engines into one explainable report:
//!
//! - **Primitive engines**: wavelength → frequency, element symbol → atomic
//!   number (or name), coordinate pair → great-circle distance
//! - **Heuristic text engines**: fallacy, entropy, contradiction and signal
//!   sharpness, each bounded to [0, 1]
//! - **UTRD**: the weighted composite of the four text scores plus an
//!   auditable report with a fixed JSON wire form
//!
//! Every engine returns a [`MetricResult`]: a value, a domain-error sentinel,
//! or an internal-error marker. No engine panics across its public boundary.
//!
//! # Concurrency
//!
//! Engines hold no mutable state. The only shared data is the element table,
//! built once on first use and read-only afterwards, so calls can be fanned
//! out across threads freely (see [`evaluate_batch`]).

pub mod chemistry;
pub mod composite;
pub mod config;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod request;
pub mod result;
pub mod tables;
pub mod text;

pub use chemistry::{atomic_number, element_name};
pub use composite::{utrd, CompositeReport, CompositeWeights, ReportMetrics, Utrd};
pub use config::{BatchConfig, EngineConfig, LoggingConfig, OutputConfig};
pub use error::{ConfigError, EngineError};
pub use geometry::distance_km;
pub use physics::frequency;
pub use request::{evaluate, evaluate_batch, MetricRequest, MetricValue};
pub use result::{DomainErrorKind, MetricResult};
pub use text::{
    contradiction_score, entropy_score, fallacy_score, sharpness, TextEngine, TextScorer,
};
