//! In-memory history source.

use crate::repository::HistorySource;
use crate::series::PriceSeries;
use risk_core::{Date, InstrumentId, LookbackWindow, RiskError};
use std::collections::HashMap;

/// History source backed by series held in memory.
///
/// Used by tests and by embedding callers that already hold the data. An
/// `offline` source simulates an outage: every load fails with
/// `SourceUnreachable`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    series: HashMap<InstrumentId, PriceSeries>,
    outage: Option<String>,
}

impl InMemoryHistory {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source whose every load fails with the given reason.
    pub fn offline(reason: impl Into<String>) -> Self {
        Self {
            series: HashMap::new(),
            outage: Some(reason.into()),
        }
    }

    /// Adds (or replaces) an instrument's observations.
    pub fn with_series(
        mut self,
        id: impl Into<InstrumentId>,
        observations: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        self.insert(id.into(), observations.into_iter().collect());
        self
    }

    /// Adds (or replaces) an instrument's series.
    pub fn insert(&mut self, id: InstrumentId, series: PriceSeries) {
        self.series.insert(id, series);
    }
}

impl HistorySource for InMemoryHistory {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(
        &self,
        instrument: &InstrumentId,
        _window: &LookbackWindow,
    ) -> Result<PriceSeries, RiskError> {
        if let Some(reason) = &self.outage {
            return Err(RiskError::source_unreachable(self.name(), reason.clone()));
        }
        self.series
            .get(instrument)
            .cloned()
            .ok_or_else(|| RiskError::data_unavailable(instrument.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> LookbackWindow {
        LookbackWindow::new(
            Date::from_ymd(2024, 1, 1).unwrap(),
            Date::from_ymd(2024, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_instrument_is_unavailable() {
        let source = InMemoryHistory::new();
        let err = source.load(&InstrumentId::new("ZZZ"), &window()).unwrap_err();
        assert_eq!(err, RiskError::data_unavailable("ZZZ"));
    }

    #[test]
    fn test_offline_source_is_unreachable() {
        let source = InMemoryHistory::offline("maintenance");
        let err = source.load(&InstrumentId::new("A"), &window()).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("maintenance"));
    }
}
