//! The three-outcome result envelope shared by every engine.
//!
//! An engine call ends in exactly one of:
//! - `Value(T)`: a legitimate output
//! - `DomainError(kind)`: the input lies outside the engine's valid domain
//! - `InternalError(message)`: the computation failed unexpectedly
//!
//! Error outcomes render as `#DOMAIN!(..)` / `#ERROR!(..)` markers so a host
//! can never mistake them for a number.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Why an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainErrorKind {
    /// Zero, negative or NaN where a positive value is required
    NonPositiveInput,
    /// Symbol not present in the element table (including blank input)
    UnknownSymbol,
    /// Coordinate outside |lat| ≤ 90, |lon| ≤ 180
    OutOfRange,
    /// Blank text given to the composite engine
    EmptyInput,
}

impl DomainErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonPositiveInput => "non_positive_input",
            Self::UnknownSymbol => "unknown_symbol",
            Self::OutOfRange => "out_of_range",
            Self::EmptyInput => "empty_input",
        }
    }
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum MetricResult<T> {
    Value(T),
    DomainError(DomainErrorKind),
    InternalError(String),
}

impl<T> MetricResult<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// True for both domain and internal errors.
    pub fn is_error(&self) -> bool {
        !self.is_value()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn domain_error(&self) -> Option<DomainErrorKind> {
        match self {
            Self::DomainError(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MetricResult<U> {
        match self {
            Self::Value(v) => MetricResult::Value(f(v)),
            Self::DomainError(kind) => MetricResult::DomainError(kind),
            Self::InternalError(message) => MetricResult::InternalError(message),
        }
    }

    /// Back into a `Result` so engine bodies can compose outcomes with `?`.
    pub fn into_result(self) -> Result<T, EngineError> {
        self.into()
    }
}

impl<T> From<Result<T, EngineError>> for MetricResult<T> {
    fn from(result: Result<T, EngineError>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(EngineError::Domain(kind)) => Self::DomainError(kind),
            Err(EngineError::Internal(message)) => Self::InternalError(message),
        }
    }
}

impl<T> From<MetricResult<T>> for Result<T, EngineError> {
    fn from(result: MetricResult<T>) -> Self {
        match result {
            MetricResult::Value(v) => Ok(v),
            MetricResult::DomainError(kind) => Err(EngineError::Domain(kind)),
            MetricResult::InternalError(message) => Err(EngineError::Internal(message)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for MetricResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::DomainError(kind) => write!(f, "#DOMAIN!({kind})"),
            Self::InternalError(message) => write!(f, "#ERROR!({message})"),
        }
    }
}

/// Run an engine body at its public boundary.
///
/// Domain errors, internal errors and panics all come back as a
/// `MetricResult`; nothing unwinds past this point.
pub(crate) fn guarded<T>(
    engine: &'static str,
    body: impl FnOnce() -> Result<T, EngineError>,
) -> MetricResult<T> {
    let outcome = match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(EngineError::Internal(panic_message(payload.as_ref()))),
    };

    match outcome {
        Ok(v) => MetricResult::Value(v),
        Err(EngineError::Domain(kind)) => {
            tracing::debug!(engine, %kind, "input rejected");
            MetricResult::DomainError(kind)
        }
        Err(EngineError::Internal(message)) => {
            tracing::warn!(engine, %message, "internal error caught at engine boundary");
            MetricResult::InternalError(message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("engine panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("engine panicked: {s}")
    } else {
        "engine panicked".to_string()
    }
}
