//! Dashboard configuration management
//!
//! Loads the presentation settings (instrument allow-list, default selection,
//! data source, log level) together with the [`RiskConfig`] used by the core.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`RISKSCOPE_*`)
//! 3. Config file (`riskscope.toml` unless `--config` is given)
//! 4. Default values

use adapter_prices::{CsvHistory, HistorySource, PriceSeries, SyntheticHistory, SyntheticInstrument};
use risk_core::{InstrumentId, LookbackWindow, RiskError};
use risk_engine::{ConfigError, RiskConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "riskscope.toml";

/// Instruments offered by default.
pub const DEFAULT_INSTRUMENTS: [&str; 8] = [
    "PETR4.SA",
    "TAEE11.SA",
    "WEGE3.SA",
    "MGLU3.SA",
    "ITUB4.SA",
    "TAEE4.SA",
    "MXRF11.SA",
    "XPML11.SA",
];

/// Instruments selected when none are given.
pub const DEFAULT_SELECTION: [&str; 2] = ["PETR4.SA", "TAEE11.SA"];

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Per-stage detail
    Debug,
    /// Run summaries
    Info,
    /// Failed runs only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::Validation(vec![format!(
                "Invalid log_level '{}'. Valid values: trace, debug, info, warn, error",
                s
            )])),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Where price history comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Deterministic GBM paths for the allow-listed instruments
    Synthetic {
        /// RNG seed
        #[serde(default = "default_seed")]
        seed: u64,
        /// Pairwise shock correlation in [0, 1]
        #[serde(default = "default_market_correlation")]
        market_correlation: f64,
        /// Per-instrument parameters; unlisted instruments use the defaults
        #[serde(default)]
        instruments: BTreeMap<InstrumentId, SyntheticInstrument>,
    },
    /// One `<ID>.csv` file per instrument
    Csv {
        /// Directory holding the files
        path: PathBuf,
    },
}

fn default_seed() -> u64 {
    42
}

fn default_market_correlation() -> f64 {
    0.3
}

impl Default for SourceConfig {
    fn default() -> Self {
        let instruments = [
            ("PETR4.SA", SyntheticInstrument::new(36.0, 0.08, 0.35)),
            ("TAEE11.SA", SyntheticInstrument::new(34.0, 0.06, 0.18)),
            ("WEGE3.SA", SyntheticInstrument::new(40.0, 0.10, 0.28)),
            ("MGLU3.SA", SyntheticInstrument::new(2.0, -0.05, 0.65)),
            ("ITUB4.SA", SyntheticInstrument::new(30.0, 0.07, 0.24)),
            ("TAEE4.SA", SyntheticInstrument::new(11.5, 0.06, 0.20)),
            ("MXRF11.SA", SyntheticInstrument::new(10.0, 0.02, 0.08)),
            ("XPML11.SA", SyntheticInstrument::new(110.0, 0.03, 0.12)),
        ]
        .into_iter()
        .map(|(id, params)| (InstrumentId::new(id), params))
        .collect();

        SourceConfig::Synthetic {
            seed: default_seed(),
            market_correlation: default_market_correlation(),
            instruments,
        }
    }
}

impl SourceConfig {
    /// Short description for logs and `check` output.
    pub fn describe(&self) -> String {
        match self {
            SourceConfig::Synthetic { seed, market_correlation, .. } => {
                format!("synthetic (seed {}, market correlation {})", seed, market_correlation)
            }
            SourceConfig::Csv { path } => format!("csv ({})", path.display()),
        }
    }

    /// Builds the history source for `universe`.
    pub fn build(&self, universe: &[InstrumentId]) -> ConfiguredSource {
        match self {
            SourceConfig::Synthetic {
                seed,
                market_correlation,
                instruments,
            } => {
                let source = universe.iter().fold(
                    SyntheticHistory::new(*seed).with_market_correlation(*market_correlation),
                    |source, id| {
                        let params = instruments.get(id).copied().unwrap_or_default();
                        source.with_instrument(id.clone(), params)
                    },
                );
                ConfiguredSource::Synthetic(source)
            }
            SourceConfig::Csv { path } => ConfiguredSource::Csv(CsvHistory::new(path.clone())),
        }
    }

    fn validate(&self, errors: &mut Vec<String>) {
        match self {
            SourceConfig::Synthetic {
                market_correlation,
                instruments,
                ..
            } => {
                if !(0.0..=1.0).contains(market_correlation) {
                    errors.push(format!(
                        "source.market_correlation must lie in [0, 1], got {}",
                        market_correlation
                    ));
                }
                for (id, params) in instruments {
                    if !(params.initial_price.is_finite() && params.initial_price > 0.0) {
                        errors.push(format!("source.instruments.{}: initial_price must be positive", id));
                    }
                    if !(params.volatility.is_finite() && params.volatility >= 0.0) {
                        errors.push(format!("source.instruments.{}: volatility must be non-negative", id));
                    }
                    if !params.drift.is_finite() {
                        errors.push(format!("source.instruments.{}: drift must be finite", id));
                    }
                }
            }
            SourceConfig::Csv { path } => {
                if path.as_os_str().is_empty() {
                    errors.push("source.path cannot be empty".to_string());
                }
            }
        }
    }
}

/// History source selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    /// Generated paths
    Synthetic(SyntheticHistory),
    /// CSV directory
    Csv(CsvHistory),
}

impl HistorySource for ConfiguredSource {
    fn name(&self) -> &str {
        match self {
            ConfiguredSource::Synthetic(s) => s.name(),
            ConfiguredSource::Csv(s) => s.name(),
        }
    }

    fn load(&self, instrument: &InstrumentId, window: &LookbackWindow) -> Result<PriceSeries, RiskError> {
        match self {
            ConfiguredSource::Synthetic(s) => s.load(instrument, window),
            ConfiguredSource::Csv(s) => s.load(instrument, window),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Instruments the user may select
    pub instruments: Vec<InstrumentId>,
    /// Selection used when none is given
    pub default_selection: Vec<InstrumentId>,
    /// Log level
    pub log_level: LogLevel,
    /// Price history source
    pub source: SourceConfig,
    /// Risk calculation parameters
    pub risk: RiskConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            instruments: DEFAULT_INSTRUMENTS.iter().map(|s| InstrumentId::new(*s)).collect(),
            default_selection: DEFAULT_SELECTION.iter().map(|s| InstrumentId::new(*s)).collect(),
            log_level: LogLevel::default(),
            source: SourceConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = lookup("RISKSCOPE_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }

        if let Some(dir) = lookup("RISKSCOPE_DATA_DIR") {
            self.source = SourceConfig::Csv {
                path: PathBuf::from(dir),
            };
        }

        if let Some(raw) = lookup("RISKSCOPE_SEED") {
            if let SourceConfig::Synthetic { seed, .. } = &mut self.source {
                *seed = raw.trim().parse().map_err(|_| {
                    ConfigError::Validation(vec![format!("RISKSCOPE_SEED '{}' is not an integer", raw)])
                })?;
            }
        }

        self.risk = self.risk.with_overrides(&lookup);
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(dir) = &cli.data_dir {
            self.source = SourceConfig::Csv { path: dir.clone() };
        }
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.instruments.is_empty() {
            errors.push("instruments cannot be empty".to_string());
        }

        for id in &self.default_selection {
            if !self.instruments.contains(id) {
                errors.push(format!(
                    "default_selection entry '{}' is not in the instrument list",
                    id
                ));
            }
        }

        self.source.validate(&mut errors);

        if let Err(ConfigError::Validation(risk_errors)) = self.risk.validate() {
            errors.extend(risk_errors.into_iter().map(|e| format!("risk.{}", e)));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Returns true if the instrument is on the allow-list
    pub fn allows(&self, id: &InstrumentId) -> bool {
        self.instruments.contains(id)
    }

    /// History source over the allow-list
    pub fn history_source(&self) -> ConfiguredSource {
        self.source.build(&self.instruments)
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path given on the command line
    pub config_file: Option<PathBuf>,
    /// Verbose logging
    pub verbose: bool,
    /// CSV directory override
    pub data_dir: Option<PathBuf>,
}

/// Build configuration from all sources
///
/// A missing default config file falls back to built-in defaults; a missing
/// file named with `--config` is an error.
pub fn build_config(cli: &CliArgs) -> Result<DashboardConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => DashboardConfig::load(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                DashboardConfig::load(default_path)?
            } else {
                DashboardConfig::default()
            }
        }
    };

    config = config.with_env_override()?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
