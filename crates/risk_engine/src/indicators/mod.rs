//! Risk indicators over a [`ReturnTable`].
//!
//! [`IndicatorEngine`] exposes three independent pure operations:
//!
//! - [`IndicatorEngine::annualized_volatility`]: sample stddev × √(trading days)
//! - [`IndicatorEngine::parametric_var`]: z(confidence) × per-period stddev
//! - [`IndicatorEngine::correlation`]: pairwise Pearson correlation
//!
//! Each accepts a single-row table and rejects a zero-row table with
//! `RiskError::EmptyReturnSet`.

mod correlation;
mod values;
mod var;
mod volatility;

pub use correlation::CorrelationMatrix;
pub use values::{as_percent, InstrumentValues};
pub use var::{validate_confidence, VaRVector};
pub use volatility::VolatilityVector;

use risk_core::{ReturnTable, RiskError};
use serde::Serialize;
use tracing::debug;

/// Default annualization factor.
pub const DEFAULT_TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default VaR confidence level.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Indicators computed for one return table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndicatorSet {
    /// Annualized volatility
    pub volatility: VolatilityVector,
    /// One-period parametric VaR
    pub var: VaRVector,
    /// Pairwise correlation
    pub correlation: CorrelationMatrix,
}

/// Stateless calculator holding the annualization factor and the VaR
/// confidence level.
///
/// # Examples
///
/// ```
/// use risk_engine::IndicatorEngine;
/// use risk_core::{Date, InstrumentId, ReturnTable};
///
/// let returns = ReturnTable::new(
///     vec![InstrumentId::new("A")],
///     vec![Date::from_ymd(2024, 1, 3).unwrap(), Date::from_ymd(2024, 1, 4).unwrap()],
///     vec![vec![0.10, -0.10]],
/// ).unwrap();
///
/// let engine = IndicatorEngine::default();
/// let vol = engine.annualized_volatility(&returns).unwrap();
/// let var = engine.parametric_var(&returns).unwrap();
///
/// let id = InstrumentId::new("A");
/// assert!((vol.get(&id).unwrap() - 2.245).abs() < 1e-3);
/// assert!((var.get(&id).unwrap() - 0.2326).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorEngine {
    trading_days_per_year: f64,
    confidence: f64,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl IndicatorEngine {
    /// Creates an engine after validating both parameters.
    ///
    /// # Errors
    /// `RiskError::InvalidInput` if `trading_days_per_year` is not a positive
    /// finite number or `confidence` is outside (0.5, 1).
    pub fn new(trading_days_per_year: f64, confidence: f64) -> Result<Self, RiskError> {
        if !(trading_days_per_year.is_finite() && trading_days_per_year > 0.0) {
            return Err(RiskError::invalid_input(format!(
                "trading days per year must be positive, got {}",
                trading_days_per_year
            )));
        }
        validate_confidence(confidence)?;
        Ok(Self {
            trading_days_per_year,
            confidence,
        })
    }

    /// Annualization factor.
    pub fn trading_days_per_year(&self) -> f64 {
        self.trading_days_per_year
    }

    /// Default VaR confidence level.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Annualized volatility of every column.
    pub fn annualized_volatility(
        &self,
        returns: &ReturnTable,
    ) -> Result<VolatilityVector, RiskError> {
        ensure_rows(returns)?;
        volatility::annualized_volatility(returns, self.trading_days_per_year)
    }

    /// Parametric VaR at the engine's confidence level.
    pub fn parametric_var(&self, returns: &ReturnTable) -> Result<VaRVector, RiskError> {
        self.parametric_var_at(returns, self.confidence)
    }

    /// Parametric VaR at an explicit confidence level.
    pub fn parametric_var_at(
        &self,
        returns: &ReturnTable,
        confidence: f64,
    ) -> Result<VaRVector, RiskError> {
        ensure_rows(returns)?;
        var::parametric_var(returns, confidence)
    }

    /// Pearson correlation matrix of the columns.
    pub fn correlation(&self, returns: &ReturnTable) -> Result<CorrelationMatrix, RiskError> {
        ensure_rows(returns)?;
        correlation::correlation(returns)
    }

    /// Runs all three operations.
    pub fn compute_all(&self, returns: &ReturnTable) -> Result<IndicatorSet, RiskError> {
        let set = IndicatorSet {
            volatility: self.annualized_volatility(returns)?,
            var: self.parametric_var(returns)?,
            correlation: self.correlation(returns)?,
        };
        debug!(
            instruments = returns.instrument_count(),
            rows = returns.row_count(),
            confidence = self.confidence,
            "computed indicators"
        );
        Ok(set)
    }
}

fn ensure_rows(returns: &ReturnTable) -> Result<(), RiskError> {
    if returns.row_count() == 0 {
        Err(RiskError::EmptyReturnSet)
    } else {
        Ok(())
    }
}
