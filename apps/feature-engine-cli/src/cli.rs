use std::path::PathBuf;

use clap::{Parser, Subcommand};
use feature_engine::{MetricRequest, TextEngine};

#[derive(Parser, Debug)]
#[command(
    name = "feature-engine",
    about = "Evaluate scalar metrics and composite text reports",
    version
)]
pub struct Cli {
    /// Path to a TOML or JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print bare values and sentinels instead of JSON envelopes
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Frequency in Hz of a wavelength given in millimetres
    #[command(allow_negative_numbers = true)]
    Frequency {
        /// Wavelength in millimetres
        wavelength_mm: f64,
    },

    /// Atomic number of an element symbol
    AtomicNumber {
        /// Element symbol, case-insensitive
        symbol: String,
    },

    /// English name of an element symbol
    ElementName {
        /// Element symbol, case-insensitive
        symbol: String,
    },

    /// Great-circle distance in km between two points in degrees
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },

    /// Score text with a single engine
    Score {
        /// fallacy, entropy, contradiction or sharpness
        engine: TextEngine,

        /// Text to score
        text: String,
    },

    /// Full composite report for a text
    Utrd {
        /// Text to analyze
        text: String,
    },

    /// Evaluate a JSON Lines file of requests
    Batch {
        /// Path to the requests file
        path: PathBuf,
    },
}

impl Commands {
    /// Single request for this command, `None` for `batch`.
    pub fn request(&self) -> Option<MetricRequest> {
        let request = match self {
            Self::Frequency { wavelength_mm } => MetricRequest::Frequency {
                wavelength_mm: *wavelength_mm,
            },
            Self::AtomicNumber { symbol } => MetricRequest::AtomicNumber {
                symbol: symbol.clone(),
            },
            Self::ElementName { symbol } => MetricRequest::ElementName {
                symbol: symbol.clone(),
            },
            Self::Distance {
                lat1,
                lon1,
                lat2,
                lon2,
            } => MetricRequest::Distance {
                lat1: *lat1,
                lon1: *lon1,
                lat2: *lat2,
                lon2: *lon2,
            },
            Self::Score { engine, text } => MetricRequest::Text {
                scorer: *engine,
                text: text.clone(),
            },
            Self::Utrd { text } => MetricRequest::Utrd { text: text.clone() },
            Self::Batch { .. } => return None,
        };
        Some(request)
    }
}
