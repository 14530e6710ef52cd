//! Riskscope CLI - market risk indicators for a selection of instruments
//!
//! # Commands
//!
//! - `riskscope analyze [--instrument ID]...` - Volatility, VaR and correlation
//! - `riskscope instruments` - List selectable instruments
//! - `riskscope export --out <DIR>` - Write price history as CSV
//! - `riskscope check` - Validate configuration and report the data source
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this binary orchestrates the adapter and
//! risk layers behind a unified command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_cli::commands;
use service_cli::config::{build_config, CliArgs};
use service_cli::render::OutputFormat;

/// Riskscope market risk dashboard
#[derive(Parser)]
#[command(name = "riskscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to riskscope.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read prices from CSV files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute volatility, VaR and correlation for a selection
    Analyze {
        /// Instrument to include (repeatable); defaults to the configured selection
        #[arg(short, long = "instrument", value_name = "ID")]
        instruments: Vec<String>,

        /// Last day of the price window (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        as_of: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List selectable instruments
    Instruments,

    /// Write price history as one CSV file per instrument
    Export {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Instrument to export (repeatable); defaults to every instrument
        #[arg(short, long = "instrument", value_name = "ID")]
        instruments: Vec<String>,

        /// Last day of the price window (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        as_of: Option<String>,
    },

    /// Check configuration and data source
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        verbose: cli.verbose,
        data_dir: cli.data_dir.clone(),
    })?;

    init_tracing(config.log_level.as_filter_str());
    debug!(source = %config.source.describe(), "configuration loaded");

    match cli.command {
        Commands::Analyze {
            instruments,
            as_of,
            format,
        } => commands::analyze::run(&config, &instruments, as_of.as_deref(), format)?,
        Commands::Instruments => commands::instruments::run(&config)?,
        Commands::Export {
            out,
            instruments,
            as_of,
        } => commands::export::run(&config, &out, &instruments, as_of.as_deref())?,
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
