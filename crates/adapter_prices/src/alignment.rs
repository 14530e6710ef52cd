//! Date alignment of independent price series into one `PriceTable`.
//!
//! Instruments trade on different calendars (holidays, suspensions, late
//! listings). [`MissingDataPolicy`] states explicitly how the gaps are
//! resolved when the series are merged onto a single date axis.

use crate::series::PriceSeries;
use risk_core::{Date, InstrumentId, PriceTable, RiskError};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How gaps between instruments' observation dates are handled.
///
/// # Examples
///
/// ```
/// use adapter_prices::MissingDataPolicy;
///
/// assert_eq!(MissingDataPolicy::default(), MissingDataPolicy::ForwardFill);
/// assert_eq!("drop-row".parse::<MissingDataPolicy>().unwrap(), MissingDataPolicy::DropRow);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MissingDataPolicy {
    /// Date axis is the union of observation dates; a gap repeats the
    /// instrument's last observed close. Leading dates before every
    /// instrument has traded once are dropped.
    #[default]
    ForwardFill,
    /// Date axis is the intersection of observation dates.
    DropRow,
    /// Any gap fails the fetch with `RiskError::MissingData`.
    Fail,
}

impl MissingDataPolicy {
    /// Configuration name of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ForwardFill => "forward-fill",
            Self::DropRow => "drop-row",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for MissingDataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MissingDataPolicy {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "forward-fill" | "ffill" => Ok(Self::ForwardFill),
            "drop-row" | "drop" => Ok(Self::DropRow),
            "fail" => Ok(Self::Fail),
            other => Err(RiskError::invalid_input(format!(
                "unknown missing-data policy '{}'. Valid values: forward-fill, drop-row, fail",
                other
            ))),
        }
    }
}

/// Merges one series per instrument onto a common date axis.
///
/// `instruments` and `series` are parallel slices; the resulting table keeps
/// their order. Prices are validated by [`PriceTable::new`].
pub fn align(
    instruments: &[InstrumentId],
    series: &[PriceSeries],
    policy: MissingDataPolicy,
) -> Result<PriceTable, RiskError> {
    if instruments.len() != series.len() {
        return Err(RiskError::invalid_input(format!(
            "{} series for {} instruments",
            series.len(),
            instruments.len()
        )));
    }

    let axis: BTreeSet<Date> = series.iter().flat_map(PriceSeries::dates).collect();
    let mut rows = Vec::with_capacity(axis.len());

    match policy {
        MissingDataPolicy::ForwardFill => {
            let mut last: Vec<Option<f64>> = vec![None; series.len()];
            for date in axis {
                for (slot, s) in last.iter_mut().zip(series) {
                    if let Some(close) = s.get(date) {
                        *slot = Some(close);
                    }
                }
                // None only before an instrument's first observation
                if let Some(prices) = last.iter().copied().collect::<Option<Vec<f64>>>() {
                    rows.push((date, prices));
                }
            }
        }
        MissingDataPolicy::DropRow => {
            for date in axis {
                if let Some(prices) = series
                    .iter()
                    .map(|s| s.get(date))
                    .collect::<Option<Vec<f64>>>()
                {
                    rows.push((date, prices));
                }
            }
        }
        MissingDataPolicy::Fail => {
            for date in axis {
                let mut prices = Vec::with_capacity(series.len());
                for (id, s) in instruments.iter().zip(series) {
                    let close = s.get(date).ok_or_else(|| RiskError::MissingData {
                        instrument: id.to_string(),
                        date: date.to_string(),
                    })?;
                    prices.push(close);
                }
                rows.push((date, prices));
            }
        }
    }

    PriceTable::from_rows(instruments.to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 4, day).unwrap()
    }

    fn ids() -> Vec<InstrumentId> {
        vec![InstrumentId::new("A"), InstrumentId::new("B")]
    }

    /// A trades on 1..=5; B starts on day 2 and skips day 4.
    fn gappy() -> Vec<PriceSeries> {
        let a: PriceSeries = (1..=5).map(|day| (d(day), 100.0 + day as f64)).collect();
        let b: PriceSeries = [2, 3, 5].iter().map(|&day| (d(day), 50.0 + day as f64)).collect();
        vec![a, b]
    }

    #[test]
    fn test_forward_fill_carries_last_close_and_drops_leading_rows() {
        let table = align(&ids(), &gappy(), MissingDataPolicy::ForwardFill).unwrap();

        assert_eq!(table.dates(), &[d(2), d(3), d(4), d(5)]);
        assert_eq!(table.column(0), Some(&[102.0, 103.0, 104.0, 105.0][..]));
        // Day 4 repeats B's day-3 close
        assert_eq!(table.column(1), Some(&[52.0, 53.0, 53.0, 55.0][..]));
    }

    #[test]
    fn test_drop_row_keeps_common_dates() {
        let table = align(&ids(), &gappy(), MissingDataPolicy::DropRow).unwrap();
        assert_eq!(table.dates(), &[d(2), d(3), d(5)]);
        assert_eq!(table.column(1), Some(&[52.0, 53.0, 55.0][..]));
    }

    #[test]
    fn test_fail_policy_names_first_gap() {
        let err = align(&ids(), &gappy(), MissingDataPolicy::Fail).unwrap_err();
        assert_eq!(
            err,
            RiskError::MissingData {
                instrument: "B".to_string(),
                date: "2024-04-01".to_string(),
            }
        );
    }

    #[test]
    fn test_fail_policy_accepts_complete_data() {
        let a: PriceSeries = (1..=3).map(|day| (d(day), 1.0)).collect();
        let b: PriceSeries = (1..=3).map(|day| (d(day), 2.0)).collect();
        let table = align(&ids(), &[a, b], MissingDataPolicy::Fail).unwrap();
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_disjoint_series_align_to_empty_table() {
        let a: PriceSeries = vec![(d(1), 1.0)].into_iter().collect();
        let b: PriceSeries = vec![(d(2), 2.0)].into_iter().collect();
        let table = align(&ids(), &[a, b], MissingDataPolicy::DropRow).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.instrument_count(), 2);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "Forward_Fill".parse::<MissingDataPolicy>().unwrap(),
            MissingDataPolicy::ForwardFill
        );
        assert_eq!("fail".parse::<MissingDataPolicy>().unwrap(), MissingDataPolicy::Fail);
        assert!("interpolate".parse::<MissingDataPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for policy in [
            MissingDataPolicy::ForwardFill,
            MissingDataPolicy::DropRow,
            MissingDataPolicy::Fail,
        ] {
            assert_eq!(policy.to_string().parse::<MissingDataPolicy>().unwrap(), policy);
        }
    }
}
