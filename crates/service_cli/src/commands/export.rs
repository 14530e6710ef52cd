//! Export command implementation
//!
//! Writes the configured source's history as one CSV file per instrument,
//! in the layout the `csv` source reads back.

use adapter_prices::{CsvHistory, HistorySource};
use risk_core::{LookbackWindow, RiskError};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands::analyze::{resolve_as_of, resolve_selection};
use crate::config::DashboardConfig;
use crate::Result;

/// Exports the selection over the configured lookback window.
pub fn execute(
    config: &DashboardConfig,
    out_dir: &Path,
    requested: &[String],
    as_of: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let selection = if requested.is_empty() {
        config.instruments.iter().cloned().collect()
    } else {
        resolve_selection(config, requested)?
    };
    let window = LookbackWindow::ending(resolve_as_of(as_of)?, config.risk.lookback_days)
        .map_err(RiskError::from)?;

    let source = config.history_source();
    let target = CsvHistory::new(out_dir);
    let mut written = Vec::with_capacity(selection.len());

    for id in &selection {
        let series = source.load(id, &window)?.within(&window);
        if series.is_empty() {
            return Err(RiskError::data_unavailable(id.as_str()).into());
        }
        let path = target.write_series(id, &series)?;
        info!(instrument = %id, rows = series.len(), path = %path.display(), "exported");
        written.push(path);
    }

    Ok(written)
}

/// Run the export command
pub fn run(
    config: &DashboardConfig,
    out_dir: &Path,
    requested: &[String],
    as_of: Option<&str>,
) -> Result<()> {
    let written = execute(config, out_dir, requested, as_of)?;
    println!("Wrote {} file(s) to {}", written.len(), out_dir.display());
    Ok(())
}
