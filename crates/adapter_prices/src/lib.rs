//! # Price Adapters
//!
//! Input side of riskscope: loads closing-price history and aligns it into a
//! [`risk_core::PriceTable`].
//!
//! ## Modules
//!
//! - [`repository`]: the [`PriceRepository`] contract and [`AlignedPriceRepository`]
//! - [`alignment`]: [`MissingDataPolicy`] and the date-axis merge
//! - [`series`]: raw per-instrument observations
//! - [`sources`]: in-memory, CSV and synthetic history sources
//!
//! ## Example
//!
//! ```
//! use adapter_prices::prelude::*;
//! use risk_core::{Date, InstrumentSet, LookbackWindow};
//!
//! let source = SyntheticHistory::new(42)
//!     .with_instrument("PETR4.SA", SyntheticInstrument::new(36.0, 0.08, 0.35))
//!     .with_instrument("TAEE11.SA", SyntheticInstrument::new(34.0, 0.05, 0.18));
//! let repo = AlignedPriceRepository::new(source, MissingDataPolicy::ForwardFill);
//!
//! let selection: InstrumentSet = ["PETR4.SA", "TAEE11.SA"].into_iter().collect();
//! let window = LookbackWindow::ending(Date::from_ymd(2024, 6, 28).unwrap(), 90).unwrap();
//! let prices = repo.fetch(&selection, &window).unwrap();
//!
//! assert_eq!(prices.instrument_count(), 2);
//! ```

#![deny(missing_docs)]

pub mod alignment;
pub mod repository;
pub mod series;
pub mod sources;

pub use alignment::{align, MissingDataPolicy};
pub use repository::{AlignedPriceRepository, HistorySource, PriceRepository};
pub use series::PriceSeries;
pub use sources::{CsvHistory, InMemoryHistory, SyntheticHistory, SyntheticInstrument};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::alignment::MissingDataPolicy;
    pub use crate::repository::{AlignedPriceRepository, HistorySource, PriceRepository};
    pub use crate::series::PriceSeries;
    pub use crate::sources::{CsvHistory, InMemoryHistory, SyntheticHistory, SyntheticInstrument};
}
