//! Pairwise Pearson correlation of return columns.

use risk_core::math::statistics::pearson_correlation;
use risk_core::{InstrumentId, ReturnTable, RiskError};
use serde::Serialize;

/// Symmetric N×N correlation matrix with a unit diagonal.
///
/// Stored row-major. `get(i, j) == get(j, i)` holds bit-for-bit because the
/// upper triangle is computed once and mirrored. A column with zero variance
/// has correlation exactly 0 with every other column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    instruments: Vec<InstrumentId>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Instruments labelling both axes.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Matrix dimension N.
    pub fn dimension(&self) -> usize {
        self.instruments.len()
    }

    /// Entry (i, j), or `None` if out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.dimension();
        (i < n && j < n).then(|| self.values[i * n + j])
    }

    /// Entry for a pair of instruments.
    pub fn get_by_id(&self, a: &InstrumentId, b: &InstrumentId) -> Option<f64> {
        let i = self.instruments.iter().position(|id| id == a)?;
        let j = self.instruments.iter().position(|id| id == b)?;
        self.get(i, j)
    }

    /// Row `i` of the matrix.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let n = self.dimension();
        (i < n).then(|| &self.values[i * n..(i + 1) * n])
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.dimension().max(1))
    }

    /// Returns true if the matrix equals its transpose exactly.
    pub fn is_symmetric(&self) -> bool {
        let n = self.dimension();
        (0..n).all(|i| (0..i).all(|j| self.values[i * n + j] == self.values[j * n + i]))
    }
}

pub(crate) fn correlation(returns: &ReturnTable) -> Result<CorrelationMatrix, RiskError> {
    if returns.row_count() == 0 {
        return Err(RiskError::EmptyReturnSet);
    }

    let columns: Vec<&[f64]> = returns.iter_columns().map(|(_, c)| c).collect();
    let n = columns.len();
    let mut values = vec![0.0; n * n];

    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let rho = pearson_correlation(columns[i], columns[j]).ok_or(RiskError::EmptyReturnSet)?;
            values[i * n + j] = rho;
            values[j * n + i] = rho;
        }
    }

    Ok(CorrelationMatrix {
        instruments: returns.instruments().to_vec(),
        values,
    })
}
