//! Raw per-instrument price observations.

use risk_core::{Date, LookbackWindow};
use std::collections::BTreeMap;

/// Closing prices of one instrument keyed by date.
///
/// Observations are kept sorted; a repeated date keeps the last value seen.
///
/// # Examples
///
/// ```
/// use adapter_prices::PriceSeries;
/// use risk_core::Date;
///
/// let d1 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d2 = Date::from_ymd(2024, 1, 3).unwrap();
/// let series: PriceSeries = vec![(d2, 11.0), (d1, 10.0), (d2, 12.0)].into_iter().collect();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.get(d2), Some(12.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    observations: BTreeMap<Date, f64>,
}

impl PriceSeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a closing price, replacing any earlier value for the date.
    pub fn insert(&mut self, date: Date, close: f64) {
        self.observations.insert(date, close);
    }

    /// Closing price on `date`, if observed.
    pub fn get(&self, date: Date) -> Option<f64> {
        self.observations.get(&date).copied()
    }

    /// Returns true if a price was observed on `date`.
    pub fn contains(&self, date: Date) -> bool {
        self.observations.contains_key(&date)
    }

    /// Observations in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.observations.iter().map(|(d, p)| (*d, *p))
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.observations.keys().copied()
    }

    /// Copy restricted to the dates inside `window`.
    pub fn within(&self, window: &LookbackWindow) -> Self {
        let observations = self
            .observations
            .range(window.start()..=window.end())
            .map(|(d, p)| (*d, *p))
            .collect();
        Self { observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl FromIterator<(Date, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (Date, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, close) in iter {
            series.insert(date, close);
        }
        series
    }
}
