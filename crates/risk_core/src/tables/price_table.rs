use super::{position_of, validate_shape};
use crate::types::{Date, InstrumentId, RiskError};

#[cfg(feature = "serde")]
use super::RawTable;

/// Aligned daily closing prices, one column per instrument.
///
/// Invariants:
/// - dates strictly ascending
/// - every column has a value for every date
/// - every price is finite and strictly positive
///
/// # Examples
///
/// ```
/// use risk_core::tables::PriceTable;
/// use risk_core::types::{Date, InstrumentId};
///
/// let dates = vec![
///     Date::from_ymd(2024, 1, 2).unwrap(),
///     Date::from_ymd(2024, 1, 3).unwrap(),
/// ];
/// let table = PriceTable::new(
///     vec![InstrumentId::new("A")],
///     dates,
///     vec![vec![100.0, 101.0]],
/// ).unwrap();
///
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.column_by_id(&InstrumentId::new("A")), Some(&[100.0, 101.0][..]));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
pub struct PriceTable {
    instruments: Vec<InstrumentId>,
    dates: Vec<Date>,
    columns: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Builds a table from column-major data, validating all invariants.
    pub fn new(
        instruments: Vec<InstrumentId>,
        dates: Vec<Date>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, RiskError> {
        validate_shape(&instruments, &dates, &columns)?;

        for (id, column) in instruments.iter().zip(&columns) {
            if let Some((row, price)) = column
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite() || **p <= 0.0)
            {
                return Err(RiskError::invalid_input(format!(
                    "price for {} on {} must be finite and positive, got {}",
                    id, dates[row], price
                )));
            }
        }

        Ok(Self {
            instruments,
            dates,
            columns,
        })
    }

    /// Builds a table from row-major data: one `(date, prices)` pair per
    /// row, prices in `instruments` order.
    pub fn from_rows(
        instruments: Vec<InstrumentId>,
        rows: Vec<(Date, Vec<f64>)>,
    ) -> Result<Self, RiskError> {
        let mut dates = Vec::with_capacity(rows.len());
        let mut columns = vec![Vec::with_capacity(rows.len()); instruments.len()];

        for (date, prices) in rows {
            if prices.len() != instruments.len() {
                return Err(RiskError::invalid_input(format!(
                    "row {} has {} prices for {} instruments",
                    date,
                    prices.len(),
                    instruments.len()
                )));
            }
            dates.push(date);
            for (column, price) in columns.iter_mut().zip(prices) {
                column.push(price);
            }
        }

        Self::new(instruments, dates, columns)
    }

    /// Instruments in column order.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Row dates, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Price column at `index`.
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Price column for an instrument.
    pub fn column_by_id(&self, id: &InstrumentId) -> Option<&[f64]> {
        position_of(&self.instruments, id).and_then(|i| self.column(i))
    }

    /// Iterates `(instrument, column)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&InstrumentId, &[f64])> {
        self.instruments
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Date and prices of row `index`.
    pub fn row(&self, index: usize) -> Option<(Date, Vec<f64>)> {
        let date = *self.dates.get(index)?;
        Some((date, self.columns.iter().map(|c| c[index]).collect()))
    }

    /// Number of dates.
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

    /// First and last dates, if any rows exist.
    pub fn date_range(&self) -> Option<(Date, Date)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for PriceTable {
    type Error = RiskError;

    fn try_from(raw: RawTable) -> Result<Self, RiskError> {
        Self::new(raw.instruments, raw.dates, raw.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 3, day).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<InstrumentId> {
        names.iter().map(|n| InstrumentId::new(*n)).collect()
    }

    #[test]
    fn test_from_rows_transposes() {
        let table = PriceTable::from_rows(
            ids(&["A", "B"]),
            vec![(d(1), vec![10.0, 20.0]), (d(4), vec![11.0, 19.0])],
        )
        .unwrap();
        assert_eq!(table.column(0), Some(&[10.0, 11.0][..]));
        assert_eq!(table.column(1), Some(&[20.0, 19.0][..]));
        assert_eq!(table.row(1), Some((d(4), vec![11.0, 19.0])));
        assert_eq!(table.date_range(), Some((d(1), d(4))));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = PriceTable::new(ids(&["A"]), vec![d(1), d(2)], vec![vec![10.0, 0.0]]);
        assert!(matches!(err, Err(RiskError::InvalidInput(msg)) if msg.contains("2024-03-02")));
    }

    #[test]
    fn test_rejects_nan_price() {
        let err = PriceTable::new(ids(&["A"]), vec![d(1)], vec![vec![f64::NAN]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let err = PriceTable::new(ids(&["A"]), vec![d(2), d(1)], vec![vec![1.0, 2.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let err = PriceTable::new(ids(&["A"]), vec![d(2), d(2)], vec![vec![1.0, 2.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = PriceTable::new(
            ids(&["A", "B"]),
            vec![d(1), d(2)],
            vec![vec![1.0, 2.0], vec![1.0]],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_duplicate_instruments() {
        let err = PriceTable::new(ids(&["A", "A"]), vec![d(1)], vec![vec![1.0], vec![1.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::new(ids(&["A"]), vec![], vec![vec![]]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.date_range(), None);
        assert_eq!(table.instrument_count(), 1);
    }
}
