//! Date-indexed, column-per-instrument tables.
//!
//! Both tables store one `Vec<f64>` per instrument (Structure of Arrays) so
//! per-instrument statistics read a contiguous slice.
//!
//! - [`PriceTable`]: aligned closing prices produced by a price repository
//! - [`ReturnTable`]: simple daily returns derived from a `PriceTable`

mod price_table;
mod return_table;

pub use price_table::PriceTable;
pub use return_table::ReturnTable;

use crate::types::{Date, InstrumentId, RiskError};
use std::collections::HashSet;

/// Checks the invariants shared by both tables: distinct instruments, one
/// column per instrument, every column as long as the date axis, and dates
/// strictly ascending.
fn validate_shape(
    instruments: &[InstrumentId],
    dates: &[Date],
    columns: &[Vec<f64>],
) -> Result<(), RiskError> {
    let mut seen = HashSet::with_capacity(instruments.len());
    for id in instruments {
        if !seen.insert(id) {
            return Err(RiskError::invalid_input(format!(
                "duplicate instrument column: {}",
                id
            )));
        }
    }

    if columns.len() != instruments.len() {
        return Err(RiskError::invalid_input(format!(
            "{} columns for {} instruments",
            columns.len(),
            instruments.len()
        )));
    }

    for (id, column) in instruments.iter().zip(columns) {
        if column.len() != dates.len() {
            return Err(RiskError::invalid_input(format!(
                "column {} has {} values for {} dates",
                id,
                column.len(),
                dates.len()
            )));
        }
    }

    if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
        return Err(RiskError::invalid_input(format!(
            "dates not strictly ascending: {} then {}",
            pair[0], pair[1]
        )));
    }

    Ok(())
}

fn position_of(instruments: &[InstrumentId], id: &InstrumentId) -> Option<usize> {
    instruments.iter().position(|i| i == id)
}

/// Serialized layout of both tables. Deserialization builds one of these
/// first and then runs the table's validating constructor.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTable {
    instruments: Vec<InstrumentId>,
    dates: Vec<Date>,
    columns: Vec<Vec<f64>>,
}
