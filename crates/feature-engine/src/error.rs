//! Error types for feature-engine

use thiserror::Error;

use crate::result::DomainErrorKind;

/// Result type alias for engine bodies
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure raised inside an engine body.
///
/// Engine bodies propagate this with `?`; the public boundary folds it into a
/// [`MetricResult`](crate::MetricResult) so it never escapes to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Input outside the engine's declared valid domain
    #[error("Domain error: {0}")]
    Domain(DomainErrorKind),

    /// Unexpected failure during computation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainErrorKind> for EngineError {
    fn from(kind: DomainErrorKind) -> Self {
        EngineError::Domain(kind)
    }
}

/// Reject NaN and infinities produced by arithmetic.
pub fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::Internal(format!("{what} is not finite: {value}")))
    }
}

/// Configuration and host-side errors (never carried in a `MetricResult`)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of its valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Input could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}
