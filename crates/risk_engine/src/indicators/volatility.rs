//! Annualized historical volatility.

use super::values::InstrumentValues;
use risk_core::math::statistics::sample_std_dev;
use risk_core::{InstrumentId, ReturnTable, RiskError};
use serde::Serialize;

/// Annualized volatility per instrument, as a fraction (0.20 = 20%).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolatilityVector {
    trading_days_per_year: f64,
    #[serde(flatten)]
    values: InstrumentValues,
}

impl VolatilityVector {
    /// Annualization factor the vector was computed with.
    pub fn trading_days_per_year(&self) -> f64 {
        self.trading_days_per_year
    }

    /// Volatilities in column order.
    pub fn by_instrument(&self) -> &InstrumentValues {
        &self.values
    }

    /// Volatility of one instrument.
    pub fn get(&self, id: &InstrumentId) -> Option<f64> {
        self.values.get(id)
    }
}

/// `sample_std_dev(column) * sqrt(trading_days_per_year)` for every column.
///
/// A single return row yields 0 for every instrument.
pub(crate) fn annualized_volatility(
    returns: &ReturnTable,
    trading_days_per_year: f64,
) -> Result<VolatilityVector, RiskError> {
    let scale = trading_days_per_year.sqrt();
    let values = per_column_std_dev(returns)?
        .into_iter()
        .map(|sd| sd * scale)
        .collect();

    Ok(VolatilityVector {
        trading_days_per_year,
        values: InstrumentValues::new(returns.instruments().to_vec(), values),
    })
}

/// Sample standard deviation of every return column.
pub(crate) fn per_column_std_dev(returns: &ReturnTable) -> Result<Vec<f64>, RiskError> {
    returns
        .iter_columns()
        .map(|(_, column)| sample_std_dev(column).ok_or(RiskError::EmptyReturnSet))
        .collect()
}
