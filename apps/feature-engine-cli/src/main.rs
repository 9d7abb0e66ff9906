//! feature-engine CLI: the `feature-engine` command.

mod cli;
mod commands;
mod error;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use feature_engine::{EngineConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Renderer;
use error::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(1);
        }
    };
    init_tracing(&config.logging);

    let renderer = Renderer::new(cli.plain, &config);
    match commands::run(&cli.command, &config, renderer) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    Ok(config)
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
