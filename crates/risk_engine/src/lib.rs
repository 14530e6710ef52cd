//! # risk_engine: returns, indicators and the run pipeline
//!
//! ## Service Layer Role
//!
//! risk_engine sits between the price adapters and the presentation layer:
//! - [`ReturnComputer`]: simple daily returns from a `PriceTable`
//! - [`IndicatorEngine`]: annualized volatility, parametric VaR, correlation
//! - [`RiskPipeline`]: fetch → returns → indicators, as one synchronous run
//! - [`RiskSession`]: explicit recomputation with last-write-wins publication
//! - [`RiskConfig`]: the adjustable constants of a run
//!
//! ## Conventions
//!
//! - Volatility is annualized with √(trading days per year), default 252.
//! - VaR uses the per-period (un-annualized) standard deviation and omits the
//!   mean term.
//! - A zero-variance column correlates exactly 0 with every other column.
//!
//! ## Usage
//!
//! ```rust
//! use adapter_prices::InMemoryHistory;
//! use risk_core::{Date, InstrumentSet};
//! use risk_engine::{RiskConfig, RiskPipeline};
//!
//! let d = |day| Date::from_ymd(2024, 1, day).unwrap();
//! let source = InMemoryHistory::new()
//!     .with_series("A", vec![(d(2), 100.0), (d(3), 110.0), (d(4), 99.0)]);
//! let pipeline = RiskPipeline::from_source(source, RiskConfig::default()).unwrap();
//!
//! let selection: InstrumentSet = ["A"].into_iter().collect();
//! let report = pipeline.try_run(&selection, d(5)).unwrap();
//!
//! let id = &selection.ids()[0];
//! assert!((report.volatility.get(id).unwrap() - 2.245).abs() < 1e-3);
//! assert!((report.var.get(id).unwrap() - 0.2326).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod indicators;
pub mod pipeline;
pub mod returns;
pub mod session;

pub use config::{ConfigError, RiskConfig};
pub use indicators::{
    as_percent, CorrelationMatrix, IndicatorEngine, IndicatorSet, InstrumentValues, VaRVector,
    VolatilityVector,
};
pub use pipeline::{PipelineFailure, PipelineOutcome, PipelineStage, RiskPipeline, RiskReport};
pub use returns::ReturnComputer;
pub use session::{LatestRunSlot, RiskSession, RunTicket, SessionView};
