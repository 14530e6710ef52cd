//! Risk calculation parameters.
//!
//! [`RiskConfig`] is loaded from the `[risk]` table of a TOML file (or a
//! standalone file) and can be overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `RISKSCOPE_TRADING_DAYS` | `trading_days_per_year` |
//! | `RISKSCOPE_CONFIDENCE` | `confidence_level` |
//! | `RISKSCOPE_LOOKBACK_DAYS` | `lookback_days` |
//! | `RISKSCOPE_MISSING_DATA` | `missing_data` |

use crate::indicators::{DEFAULT_CONFIDENCE, DEFAULT_TRADING_DAYS_PER_YEAR};
use adapter_prices::MissingDataPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Default price-history lookback in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in a config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// One or more values failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Adjustable parameters of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Annualization factor for volatility
    pub trading_days_per_year: f64,
    /// VaR confidence level, strictly between 0.5 and 1
    pub confidence_level: f64,
    /// Calendar days of history ending at the as-of date
    pub lookback_days: u32,
    /// Gap handling when aligning instruments
    pub missing_data: MissingDataPolicy,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
            confidence_level: DEFAULT_CONFIDENCE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            missing_data: MissingDataPolicy::default(),
        }
    }
}

impl RiskConfig {
    /// Parses a TOML document holding the fields at top level.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Applies `RISKSCOPE_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("RISKSCOPE_TRADING_DAYS") {
            match raw.trim().parse() {
                Ok(v) => self.trading_days_per_year = v,
                Err(_) => warn!(value = %raw, "ignoring unparseable RISKSCOPE_TRADING_DAYS"),
            }
        }

        if let Some(raw) = lookup("RISKSCOPE_CONFIDENCE") {
            match raw.trim().parse() {
                Ok(v) => self.confidence_level = v,
                Err(_) => warn!(value = %raw, "ignoring unparseable RISKSCOPE_CONFIDENCE"),
            }
        }

        if let Some(raw) = lookup("RISKSCOPE_LOOKBACK_DAYS") {
            match raw.trim().parse() {
                Ok(v) => self.lookback_days = v,
                Err(_) => warn!(value = %raw, "ignoring unparseable RISKSCOPE_LOOKBACK_DAYS"),
            }
        }

        if let Some(raw) = lookup("RISKSCOPE_MISSING_DATA") {
            match raw.parse() {
                Ok(v) => self.missing_data = v,
                Err(_) => warn!(value = %raw, "ignoring unknown RISKSCOPE_MISSING_DATA"),
            }
        }

        self
    }

    /// Validates every field, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(self.trading_days_per_year.is_finite() && self.trading_days_per_year > 0.0) {
            errors.push(format!(
                "trading_days_per_year must be positive, got {}",
                self.trading_days_per_year
            ));
        }

        if !(self.confidence_level > 0.5 && self.confidence_level < 1.0) {
            errors.push(format!(
                "confidence_level must lie in (0.5, 1), got {}",
                self.confidence_level
            ));
        }

        if self.lookback_days == 0 {
            errors.push("lookback_days must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
