//! Parametric (variance-covariance) value-at-risk.
//!
//! VaR is `z(confidence) * sigma` with `sigma` the per-period sample standard
//! deviation of simple returns. The annualization factor is never applied
//! and the mean return is not subtracted, so the figure is a one-period loss
//! magnitude under a zero-mean normal assumption.

use super::values::InstrumentValues;
use super::volatility::per_column_std_dev;
use risk_core::math::distributions::norm_inv;
use risk_core::{InstrumentId, ReturnTable, RiskError};
use serde::Serialize;

/// One-period parametric VaR per instrument, as a non-negative fraction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VaRVector {
    confidence: f64,
    z_score: f64,
    #[serde(flatten)]
    values: InstrumentValues,
}

impl VaRVector {
    /// Confidence level the vector was computed at.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// One-sided normal quantile applied to every instrument.
    pub fn z_score(&self) -> f64 {
        self.z_score
    }

    /// VaR figures in column order.
    pub fn by_instrument(&self) -> &InstrumentValues {
        &self.values
    }

    /// VaR of one instrument.
    pub fn get(&self, id: &InstrumentId) -> Option<f64> {
        self.values.get(id)
    }
}

/// Checks that a VaR confidence level lies strictly between 0.5 and 1.
pub fn validate_confidence(confidence: f64) -> Result<(), RiskError> {
    if confidence > 0.5 && confidence < 1.0 {
        Ok(())
    } else {
        Err(RiskError::invalid_input(format!(
            "VaR confidence must lie in (0.5, 1), got {}",
            confidence
        )))
    }
}

pub(crate) fn parametric_var(
    returns: &ReturnTable,
    confidence: f64,
) -> Result<VaRVector, RiskError> {
    validate_confidence(confidence)?;
    let z_score = norm_inv(confidence);

    let values = per_column_std_dev(returns)?
        .into_iter()
        .map(|sd| z_score * sd)
        .collect();

    Ok(VaRVector {
        confidence,
        z_score,
        values: InstrumentValues::new(returns.instruments().to_vec(), values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert!(validate_confidence(0.95).is_ok());
        assert!(validate_confidence(0.99).is_ok());
        assert!(validate_confidence(0.5).is_err());
        assert!(validate_confidence(1.0).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }
}
