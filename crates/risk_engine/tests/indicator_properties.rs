//! Property-based checks of the indicator invariants.

use proptest::prelude::*;
use risk_core::{Date, InstrumentId, PriceTable};
use risk_engine::{IndicatorEngine, ReturnComputer};

/// Price tables with 2..=40 rows and 1..=5 instruments of positive prices.
fn price_table() -> impl Strategy<Value = PriceTable> {
    (1usize..=5, 2usize..=40).prop_flat_map(|(n, rows)| {
        prop::collection::vec(prop::collection::vec(0.5f64..500.0, rows), n).prop_map(move |columns| {
            let ids = (0..n).map(|i| InstrumentId::new(format!("I{}", i))).collect();
            let start = Date::from_ymd(2023, 1, 2).unwrap();
            let dates = (0..rows).map(|r| start.add_days(r as u64).unwrap()).collect();
            PriceTable::new(ids, dates, columns).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn returns_have_one_row_fewer_and_are_finite(prices in price_table()) {
        let returns = ReturnComputer::compute(&prices).unwrap();
        prop_assert_eq!(returns.row_count(), prices.row_count() - 1);
        prop_assert_eq!(returns.instrument_count(), prices.instrument_count());
        for (_, column) in returns.iter_columns() {
            prop_assert!(column.iter().all(|r| r.is_finite()));
        }
    }

    #[test]
    fn volatility_and_var_are_non_negative(prices in price_table()) {
        let returns = ReturnComputer::compute(&prices).unwrap();
        let engine = IndicatorEngine::default();

        let vol = engine.annualized_volatility(&returns).unwrap();
        let var = engine.parametric_var(&returns).unwrap();
        prop_assert!(vol.by_instrument().values().iter().all(|v| *v >= 0.0 && v.is_finite()));
        prop_assert!(var.by_instrument().values().iter().all(|v| *v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn correlation_is_symmetric_bounded_with_unit_diagonal(prices in price_table()) {
        let returns = ReturnComputer::compute(&prices).unwrap();
        let corr = IndicatorEngine::default().correlation(&returns).unwrap();
        let n = corr.dimension();

        prop_assert!(corr.is_symmetric());
        for i in 0..n {
            prop_assert_eq!(corr.get(i, i), Some(1.0));
            for j in 0..n {
                let rho = corr.get(i, j).unwrap();
                prop_assert!((-1.0..=1.0).contains(&rho));
                prop_assert_eq!(rho.to_bits(), corr.get(j, i).unwrap().to_bits());
            }
        }
    }

    #[test]
    fn indicators_are_deterministic(prices in price_table()) {
        let engine = IndicatorEngine::default();
        let first = engine.compute_all(&ReturnComputer::compute(&prices).unwrap()).unwrap();
        let second = engine.compute_all(&ReturnComputer::compute(&prices).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
