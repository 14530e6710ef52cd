//! Check command implementation
//!
//! Verifies configuration and reports the data source.

use adapter_prices::HistorySource;
use tracing::info;

use crate::config::{ConfiguredSource, DashboardConfig, SourceConfig};
use crate::Result;

/// Summarises the loaded configuration.
pub fn summary(config: &DashboardConfig) -> String {
    let source = config.history_source();
    let mut lines = vec![
        "Configuration OK".to_string(),
        format!("  Source:              {} [{}]", config.source.describe(), source.name()),
        format!("  Instruments:         {}", config.instruments.len()),
        format!(
            "  Default selection:   {}",
            config
                .default_selection
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!("  Trading days/year:   {}", config.risk.trading_days_per_year),
        format!("  VaR confidence:      {}", config.risk.confidence_level),
        format!("  Lookback (days):     {}", config.risk.lookback_days),
        format!("  Missing data:        {}", config.risk.missing_data),
        format!("  Log level:           {}", config.log_level),
    ];

    if let (SourceConfig::Csv { path }, ConfiguredSource::Csv(csv)) = (&config.source, &source) {
        if !path.is_dir() {
            lines.push(format!("  Warning: {} is not a directory", path.display()));
        } else {
            let missing: Vec<String> = config
                .instruments
                .iter()
                .filter(|id| !csv.path_for(id).is_file())
                .map(ToString::to_string)
                .collect();
            if !missing.is_empty() {
                lines.push(format!("  Warning: no CSV file for {}", missing.join(", ")));
            }
        }
    }

    lines.join("\n")
}

/// Run the check command
pub fn run(config: &DashboardConfig) -> Result<()> {
    info!("Checking configuration...");
    println!("{}", summary(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_summary_for_defaults() {
        let text = summary(&DashboardConfig::default());
        assert!(text.starts_with("Configuration OK"));
        assert!(text.contains("[synthetic]"));
        assert!(text.contains("PETR4.SA, TAEE11.SA"));
        assert!(text.contains("forward-fill"));
    }

    #[test]
    fn test_summary_warns_about_missing_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PETR4.SA.csv"), "date,close\n").unwrap();
        let config = DashboardConfig {
            source: SourceConfig::Csv {
                path: dir.path().to_path_buf(),
            },
            ..DashboardConfig::default()
        };

        let text = summary(&config);
        assert!(text.contains("no CSV file for TAEE11.SA"));
        assert!(!text.contains("for PETR4.SA"));
    }
}
