//! Command execution and output rendering.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use feature_engine::{
    evaluate, evaluate_batch, EngineConfig, MetricRequest, MetricResult, MetricValue,
};

use crate::cli::Commands;
use crate::error::Result;

/// Exit status across everything printed by one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    errors: usize,
}

impl Status {
    pub fn record(&mut self, result: &MetricResult<MetricValue>) {
        if result.is_error() {
            self.errors += 1;
        }
    }

    pub fn code(&self) -> u8 {
        if self.errors == 0 {
            0
        } else {
            2
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Turns outcomes into output lines.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub plain: bool,
    pub pretty: bool,
}

impl Renderer {
    pub fn new(plain: bool, config: &EngineConfig) -> Self {
        Self {
            plain,
            pretty: config.output.pretty,
        }
    }

    /// Reports always print in their wire form; everything else prints as
    /// an envelope, or as a bare value/sentinel in plain mode.
    pub fn render(&self, result: &MetricResult<MetricValue>) -> Result<String> {
        if let MetricResult::Value(MetricValue::Report(report)) = result {
            return Ok(if self.pretty {
                report.to_json_pretty()?
            } else {
                report.to_json()?
            });
        }
        if self.plain {
            return Ok(result.to_string());
        }
        Ok(if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        })
    }
}

pub fn run(command: &Commands, config: &EngineConfig, renderer: Renderer) -> Result<Status> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut status = Status::default();

    let results = match command {
        Commands::Batch { path } => run_batch(path, config)?,
        single => single.request().map(|r| vec![evaluate(&r)]).unwrap_or_default(),
    };

    for result in &results {
        status.record(result);
        writeln!(out, "{}", renderer.render(result)?)?;
    }
    out.flush()?;

    tracing::debug!(rows = results.len(), errors = status.errors, "command finished");
    Ok(status)
}

/// Evaluate a JSON Lines file. Blank lines are skipped; a line that is not a
/// valid request yields an internal error in its position.
pub fn run_batch(path: &Path, config: &EngineConfig) -> Result<Vec<MetricResult<MetricValue>>> {
    let reader = BufReader::new(File::open(path)?);
    let (slots, requests) = parse_requests(reader)?;
    tracing::info!(path = %path.display(), rows = slots.len(), "evaluating batch");

    let mut evaluated = evaluate_batch(&requests, &config.batch).into_iter();
    Ok(slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| evaluated.next()))
        .collect())
}

type Slots = Vec<Option<MetricResult<MetricValue>>>;

fn parse_requests(reader: impl BufRead) -> Result<(Slots, Vec<MetricRequest>)> {
    let mut slots = Vec::new();
    let mut requests = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<MetricRequest>(&line) {
            Ok(request) => {
                slots.push(None);
                requests.push(request);
            }
            Err(err) => {
                let line_no = index + 1;
                tracing::warn!(line = line_no, error = %err, "malformed request");
                slots.push(Some(MetricResult::InternalError(format!(
                    "line {line_no}: {err}"
                ))));
            }
        }
    }
    Ok((slots, requests))
}
