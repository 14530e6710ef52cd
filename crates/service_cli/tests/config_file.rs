//! Loading the shipped example configuration.

use risk_core::InstrumentId;
use service_cli::commands::analyze;
use service_cli::config::{build_config, CliArgs, LogLevel, SourceConfig};
use service_cli::render::OutputFormat;
use std::path::PathBuf;

fn example_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../riskscope.example.toml")
}

fn cli(config_file: PathBuf) -> CliArgs {
    CliArgs {
        config_file: Some(config_file),
        ..CliArgs::default()
    }
}

#[test]
fn test_example_file_loads_and_validates() {
    let config = build_config(&cli(example_path())).unwrap();

    assert_eq!(config.instruments.len(), 8);
    assert_eq!(config.risk.lookback_days, 365);
    match &config.source {
        SourceConfig::Synthetic { instruments, .. } => {
            assert_eq!(instruments[&InstrumentId::new("MGLU3.SA")].volatility, 0.65);
        }
        other => panic!("Expected synthetic source, got {:?}", other),
    }
}

#[test]
fn test_example_file_runs_default_selection() {
    let config = build_config(&cli(example_path())).unwrap();
    let output = analyze::execute(&config, &[], Some("2024-06-28"), OutputFormat::Json).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["selection"]["ids"], serde_json::json!(["PETR4.SA", "TAEE11.SA"]));
    assert_eq!(report["correlation"]["values"].as_array().unwrap().len(), 4);
}

#[test]
fn test_verbose_flag_raises_log_level() {
    let config = build_config(&CliArgs {
        verbose: true,
        ..cli(example_path())
    })
    .unwrap();
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_invalid_file_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "instruments = [\"A\"]\ndefault_selection = [\"B\"]\n[risk]\nlookback_days = 0\n",
    )
    .unwrap();

    let err = build_config(&cli(path)).unwrap_err().to_string();
    assert!(err.contains("default_selection entry 'B'"));
    assert!(err.contains("risk.lookback_days"));
}
