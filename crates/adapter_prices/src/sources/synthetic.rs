//! Synthetic price history generator.
//!
//! Generates deterministic daily closes for a configured universe so the
//! pipeline can run without a market-data feed.
//!
//! ## Price Evolution Model
//!
//! Each instrument follows Geometric Brownian Motion on weekdays:
//!
//! S(t+dt) = S(t) * exp((μ - σ²/2)*dt + σ*sqrt(dt)*Z),  dt = 1/252
//!
//! with `Z = sqrt(ρ)*M + sqrt(1-ρ)*E`, where `M` is a market factor shared by
//! every instrument on a given day and `E` is instrument-specific noise. `ρ`
//! is the pairwise correlation of the shocks.
//!
//! The same seed, instrument and window always reproduce the same path.

use crate::repository::HistorySource;
use crate::series::PriceSeries;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use risk_core::{InstrumentId, LookbackWindow, RiskError};
use std::collections::HashMap;

/// Time step of one trading day in years.
const DT: f64 = 1.0 / 252.0;

/// Floor preventing a path from collapsing to zero.
const MIN_PRICE: f64 = 1e-4;

/// GBM parameters of one synthetic instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntheticInstrument {
    /// Close on the first trading day of the window
    pub initial_price: f64,
    /// Annual drift rate (μ)
    pub drift: f64,
    /// Annual volatility (σ)
    pub volatility: f64,
}

impl SyntheticInstrument {
    /// Creates instrument parameters.
    pub fn new(initial_price: f64, drift: f64, volatility: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
        }
    }

    /// One GBM step from `price` with standard normal shock `z`.
    fn evolve(&self, price: f64, z: f64) -> f64 {
        let drift_term = (self.drift - 0.5 * self.volatility * self.volatility) * DT;
        let diffusion_term = self.volatility * DT.sqrt() * z;
        (price * (drift_term + diffusion_term).exp()).max(MIN_PRICE)
    }
}

impl Default for SyntheticInstrument {
    fn default() -> Self {
        Self::new(100.0, 0.0, 0.20) // 20% annual vol, zero drift
    }
}

/// Deterministic GBM history source.
///
/// # Examples
///
/// ```
/// use adapter_prices::{HistorySource, SyntheticHistory, SyntheticInstrument};
/// use risk_core::{Date, InstrumentId, LookbackWindow};
///
/// let source = SyntheticHistory::new(7)
///     .with_instrument("SYN", SyntheticInstrument::new(50.0, 0.05, 0.25));
/// let window = LookbackWindow::new(
///     Date::from_ymd(2024, 1, 1).unwrap(),
///     Date::from_ymd(2024, 1, 31).unwrap(),
/// ).unwrap();
///
/// let series = source.load(&InstrumentId::new("SYN"), &window).unwrap();
/// assert_eq!(series.len(), 23); // weekdays in January 2024
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticHistory {
    seed: u64,
    market_correlation: f64,
    universe: HashMap<InstrumentId, SyntheticInstrument>,
}

impl SyntheticHistory {
    /// Creates an empty universe with the given seed and a 0.3 market
    /// correlation.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            market_correlation: 0.3,
            universe: HashMap::new(),
        }
    }

    /// Sets the pairwise shock correlation, clamped to [0, 1].
    pub fn with_market_correlation(mut self, correlation: f64) -> Self {
        self.market_correlation = correlation.clamp(0.0, 1.0);
        self
    }

    /// Adds (or replaces) an instrument.
    pub fn with_instrument(
        mut self,
        id: impl Into<InstrumentId>,
        params: SyntheticInstrument,
    ) -> Self {
        self.universe.insert(id.into(), params);
        self
    }

    /// Returns true if the instrument is part of the universe.
    pub fn knows(&self, id: &InstrumentId) -> bool {
        self.universe.contains_key(id)
    }

    /// Number of instruments in the universe.
    pub fn len(&self) -> usize {
        self.universe.len()
    }

    /// Returns true if the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    fn instrument_seed(&self, id: &InstrumentId) -> u64 {
        // FNV-1a, stable across runs and platforms
        let hash = id
            .as_str()
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
                (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
            });
        hash ^ self.seed
    }
}

impl HistorySource for SyntheticHistory {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn load(
        &self,
        instrument: &InstrumentId,
        window: &LookbackWindow,
    ) -> Result<PriceSeries, RiskError> {
        let params = self
            .universe
            .get(instrument)
            .ok_or_else(|| RiskError::data_unavailable(instrument.as_str()))?;

        let mut market_rng = StdRng::seed_from_u64(self.seed);
        let mut own_rng = StdRng::seed_from_u64(self.instrument_seed(instrument));
        let rho = self.market_correlation;

        let mut series = PriceSeries::new();
        let mut price = params.initial_price;
        let mut first = true;

        for date in window.days().filter(|d| d.is_weekday()) {
            let market: f64 = StandardNormal.sample(&mut market_rng);
            let own: f64 = StandardNormal.sample(&mut own_rng);
            if first {
                first = false;
            } else {
                let z = rho.sqrt() * market + (1.0 - rho).sqrt() * own;
                price = params.evolve(price, z);
            }
            series.insert(date, price);
        }

        Ok(series)
    }
}
