//! Criterion benchmarks for return computation and the indicator engine.
//!
//! Measures scaling in the number of instruments (correlation is quadratic)
//! and in the length of the price history.

use adapter_prices::{AlignedPriceRepository, MissingDataPolicy, PriceRepository};
use adapter_prices::{SyntheticHistory, SyntheticInstrument};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_core::{Date, InstrumentSet, LookbackWindow, PriceTable};
use risk_engine::{IndicatorEngine, ReturnComputer};

/// Generate a synthetic price table with `n` instruments over `days` calendar days.
fn generate_prices(n: usize, days: u32) -> PriceTable {
    let mut source = SyntheticHistory::new(2024);
    for i in 0..n {
        let vol = 0.15 + 0.05 * (i % 5) as f64;
        source = source.with_instrument(format!("SYN{:03}", i), SyntheticInstrument::new(100.0, 0.05, vol));
    }
    let selection: InstrumentSet = (0..n).map(|i| format!("SYN{:03}", i)).collect();
    let end = Date::from_ymd(2024, 12, 31).unwrap();
    let window = LookbackWindow::ending(end, days).unwrap();

    AlignedPriceRepository::new(source, MissingDataPolicy::Fail)
        .fetch(&selection, &window)
        .unwrap()
}

/// Benchmark return computation over history length.
fn bench_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("returns");

    for days in [90, 365, 1825] {
        let prices = generate_prices(10, days);
        group.bench_with_input(BenchmarkId::new("compute", days), &prices, |b, prices| {
            b.iter(|| ReturnComputer::compute(black_box(prices)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark each indicator over the number of instruments.
fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    let engine = IndicatorEngine::default();

    for n in [2, 10, 50] {
        let returns = ReturnComputer::compute(&generate_prices(n, 365)).unwrap();

        group.bench_with_input(BenchmarkId::new("volatility", n), &returns, |b, r| {
            b.iter(|| engine.annualized_volatility(black_box(r)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("var", n), &returns, |b, r| {
            b.iter(|| engine.parametric_var(black_box(r)).unwrap());
        });

        // Pairwise, O(n^2 * rows)
        group.bench_with_input(BenchmarkId::new("correlation", n), &returns, |b, r| {
            b.iter(|| engine.correlation(black_box(r)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_returns, bench_indicators);
criterion_main!(benches);
