//! Configuration for feature-engine hosts
//!
//! Covers how results are rendered, how batches are scheduled and what gets
//! logged. The composite weights and the entropy reference are compile-time
//! constants and do not appear here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Host-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output rendering settings
    pub output: OutputConfig,
    /// Batch scheduling settings
    pub batch: BatchConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Batch scheduling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Fan rows out across the rayon pool
    pub parallel: bool,
    /// Smallest batch worth parallelizing
    pub min_parallel_rows: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_rows: 64,
        }
    }
}

impl BatchConfig {
    /// Always evaluate in order on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn should_parallelize(&self, rows: usize) -> bool {
        self.parallel && rows >= self.min_parallel_rows
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Load a TOML (or `.json`) configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.min_parallel_rows == 0 {
            return Err(ConfigError::OutOfRange(
                "batch.min_parallel_rows must be at least 1".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::OutOfRange(
                "logging.filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
