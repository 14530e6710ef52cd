use super::{position_of, validate_shape};
use crate::types::{Date, InstrumentId, RiskError};

#[cfg(feature = "serde")]
use super::RawTable;

/// Simple daily returns, one column per instrument.
///
/// Row `d` holds `price[d] / price[d - 1] - 1` for the price row at the same
/// date, so the table has one row fewer than the `PriceTable` it was derived
/// from. Every cell is finite. A zero-row table is representable so that the
/// indicator layer can reject it explicitly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
pub struct ReturnTable {
    instruments: Vec<InstrumentId>,
    dates: Vec<Date>,
    columns: Vec<Vec<f64>>,
}

impl ReturnTable {
    /// Builds a table from column-major data, validating shape and
    /// finiteness.
    pub fn new(
        instruments: Vec<InstrumentId>,
        dates: Vec<Date>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, RiskError> {
        validate_shape(&instruments, &dates, &columns)?;

        for (id, column) in instruments.iter().zip(&columns) {
            if let Some(row) = column.iter().position(|r| !r.is_finite()) {
                return Err(RiskError::invalid_input(format!(
                    "return for {} on {} is not finite",
                    id, dates[row]
                )));
            }
        }

        Ok(Self {
            instruments,
            dates,
            columns,
        })
    }

    /// Instruments in column order.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Row dates, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return column at `index`.
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Return column for an instrument.
    pub fn column_by_id(&self, id: &InstrumentId) -> Option<&[f64]> {
        position_of(&self.instruments, id).and_then(|i| self.column(i))
    }

    /// Iterates `(instrument, column)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&InstrumentId, &[f64])> {
        self.instruments
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Date and returns of row `index`.
    pub fn row(&self, index: usize) -> Option<(Date, Vec<f64>)> {
        let date = *self.dates.get(index)?;
        Some((date, self.columns.iter().map(|c| c[index]).collect()))
    }

    /// Number of return rows.
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Number of instrument columns.
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for ReturnTable {
    type Error = RiskError;

    fn try_from(raw: RawTable) -> Result<Self, RiskError> {
        Self::new(raw.instruments, raw.dates, raw.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_table_is_valid() {
        let table = ReturnTable::new(vec![InstrumentId::new("A")], vec![], vec![vec![]]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.instrument_count(), 1);
    }

    #[test]
    fn test_rejects_infinite_return() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let err = ReturnTable::new(
            vec![InstrumentId::new("A")],
            vec![date],
            vec![vec![f64::INFINITY]],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_negative_returns_allowed() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let table = ReturnTable::new(
            vec![InstrumentId::new("A")],
            vec![date],
            vec![vec![-0.5]],
        )
        .unwrap();
        assert_eq!(table.row(0), Some((date, vec![-0.5])));
    }
}
