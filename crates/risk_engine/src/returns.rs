//! Simple daily returns from aligned prices.

use risk_core::{PriceTable, ReturnTable, RiskError};
use tracing::debug;

/// Derives simple returns from a [`PriceTable`].
///
/// Each column is processed independently:
/// `return[d] = price[d] / price[d - 1] - 1` for every row after the first.
/// The first price row has no predecessor and is excluded, not filled.
///
/// # Examples
///
/// ```
/// use risk_engine::ReturnComputer;
/// use risk_core::{Date, InstrumentId, PriceTable};
///
/// let dates = (2..=4).map(|d| Date::from_ymd(2024, 1, d).unwrap()).collect();
/// let prices = PriceTable::new(
///     vec![InstrumentId::new("A")],
///     dates,
///     vec![vec![100.0, 110.0, 99.0]],
/// ).unwrap();
///
/// let returns = ReturnComputer::compute(&prices).unwrap();
/// let column = returns.column(0).unwrap();
/// assert!((column[0] - 0.10).abs() < 1e-12);
/// assert!((column[1] + 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnComputer;

impl ReturnComputer {
    /// Minimum number of price rows needed to define one return.
    pub const MIN_PRICE_ROWS: usize = 2;

    /// Computes the return table.
    ///
    /// # Errors
    /// `RiskError::InsufficientHistory` if `prices` has fewer than two rows.
    pub fn compute(prices: &PriceTable) -> Result<ReturnTable, RiskError> {
        let rows = prices.row_count();
        if rows < Self::MIN_PRICE_ROWS {
            return Err(RiskError::InsufficientHistory { rows });
        }

        let columns: Vec<Vec<f64>> = prices
            .iter_columns()
            .map(|(_, column)| column.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
            .collect();

        let returns = ReturnTable::new(
            prices.instruments().to_vec(),
            prices.dates()[1..].to_vec(),
            columns,
        )?;

        debug!(
            price_rows = rows,
            return_rows = returns.row_count(),
            instruments = returns.instrument_count(),
            "computed daily returns"
        );
        Ok(returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use risk_core::{Date, InstrumentId};

    fn table(columns: Vec<Vec<f64>>) -> PriceTable {
        let rows = columns.first().map_or(0, Vec::len);
        let ids = (0..columns.len())
            .map(|i| InstrumentId::new(format!("I{}", i)))
            .collect();
        let dates = (0..rows)
            .map(|r| Date::from_ymd(2024, 1, 1).unwrap().add_days(r as u64).unwrap())
            .collect();
        PriceTable::new(ids, dates, columns).unwrap()
    }

    #[test]
    fn test_shape_is_one_row_shorter() {
        let prices = table(vec![vec![10.0, 11.0, 12.0, 13.0], vec![5.0, 5.0, 4.0, 6.0]]);
        let returns = ReturnComputer::compute(&prices).unwrap();

        assert_eq!(returns.row_count(), 3);
        assert_eq!(returns.instrument_count(), 2);
        assert_eq!(returns.instruments(), prices.instruments());
        assert_eq!(returns.dates(), &prices.dates()[1..]);
    }

    #[test]
    fn test_columns_are_independent() {
        let prices = table(vec![vec![100.0, 150.0], vec![80.0, 60.0]]);
        let returns = ReturnComputer::compute(&prices).unwrap();

        assert_relative_eq!(returns.column(0).unwrap()[0], 0.5, epsilon = 1e-15);
        assert_relative_eq!(returns.column(1).unwrap()[0], -0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_constant_price_gives_exact_zero_returns() {
        let prices = table(vec![vec![42.0; 5]]);
        let returns = ReturnComputer::compute(&prices).unwrap();
        assert!(returns.column(0).unwrap().iter().all(|r| *r == 0.0));
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let prices = table(vec![vec![100.0]]);
        assert_eq!(
            ReturnComputer::compute(&prices),
            Err(RiskError::InsufficientHistory { rows: 1 })
        );
    }

    #[test]
    fn test_empty_table_is_insufficient() {
        let prices = table(vec![vec![]]);
        assert_eq!(
            ReturnComputer::compute(&prices),
            Err(RiskError::InsufficientHistory { rows: 0 })
        );
    }
}
