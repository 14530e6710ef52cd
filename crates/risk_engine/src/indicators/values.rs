use risk_core::InstrumentId;
use serde::Serialize;

/// One value per instrument, in column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstrumentValues {
    instruments: Vec<InstrumentId>,
    values: Vec<f64>,
}

impl InstrumentValues {
    pub(crate) fn new(instruments: Vec<InstrumentId>, values: Vec<f64>) -> Self {
        debug_assert_eq!(instruments.len(), values.len());
        Self {
            instruments,
            values,
        }
    }

    /// Instruments in column order.
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Values in column order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value for an instrument, if present.
    pub fn get(&self, id: &InstrumentId) -> Option<f64> {
        self.instruments
            .iter()
            .position(|i| i == id)
            .map(|pos| self.values[pos])
    }

    /// Value for an instrument expressed as a percentage.
    pub fn percent(&self, id: &InstrumentId) -> Option<f64> {
        self.get(id).map(as_percent)
    }

    /// Iterates over `(instrument, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&InstrumentId, f64)> {
        self.instruments.iter().zip(self.values.iter().copied())
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no instruments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Converts a fraction to a percentage (`0.2245` -> `22.45`).
pub fn as_percent(fraction: f64) -> f64 {
    fraction * 100.0
}
