//! Analyze command implementation
//!
//! Runs one risk pipeline for the selected instruments and prints the report.

use risk_core::{Date, InstrumentId, InstrumentSet};
use risk_engine::{PipelineOutcome, RiskPipeline, RiskSession};
use tracing::info;

use crate::config::DashboardConfig;
use crate::render::{render_json, render_table, OutputFormat};
use crate::{CliError, Result};

/// Shown when the selection is empty.
pub const NOTHING_SELECTED: &str = "Please select at least one instrument to begin.";

/// Resolves the requested identifiers against the allow-list.
///
/// An empty request falls back to the configured default selection.
pub fn resolve_selection(config: &DashboardConfig, requested: &[String]) -> Result<InstrumentSet> {
    if requested.is_empty() {
        return Ok(config.default_selection.iter().cloned().collect());
    }

    let mut selection = InstrumentSet::new();
    for raw in requested {
        let id = InstrumentId::parse(raw).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        if !config.allows(&id) {
            return Err(CliError::UnknownInstrument(id.to_string()));
        }
        selection.insert(id);
    }
    Ok(selection)
}

/// Parses `--as-of`, defaulting to today.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<Date> {
    match as_of {
        Some(raw) => Date::parse(raw)
            .map_err(|e| CliError::InvalidArgument(format!("--as-of '{}': {}", raw, e))),
        None => Ok(Date::today()),
    }
}

/// Runs the pipeline and renders its outcome.
pub fn execute(
    config: &DashboardConfig,
    requested: &[String],
    as_of: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let selection = resolve_selection(config, requested)?;
    let as_of = resolve_as_of(as_of)?;

    info!(
        selection = %selection,
        as_of = %as_of,
        source = %config.source.describe(),
        "analyzing"
    );

    let pipeline = RiskPipeline::from_source(config.history_source(), config.risk.clone())?;
    let session = RiskSession::new(pipeline);
    let view = session
        .select(selection, as_of)
        .ok_or_else(|| CliError::Output("run was superseded".to_string()))?;

    match &view.outcome {
        PipelineOutcome::NothingSelected => Ok(NOTHING_SELECTED.to_string()),
        PipelineOutcome::Completed(report) => match format {
            OutputFormat::Table => Ok(render_table(report)),
            OutputFormat::Json => Ok(render_json(report)?),
        },
        PipelineOutcome::Failed(failure) => Err(failure.clone().into()),
    }
}

/// Run the analyze command
pub fn run(
    config: &DashboardConfig,
    requested: &[String],
    as_of: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let output = execute(config, requested, as_of, format)?;
    println!("{}", output);
    Ok(())
}
