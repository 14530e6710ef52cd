//! # risk_core: Foundation for the riskscope pipeline
//!
//! ## Core Layer Role
//!
//! risk_core is the bottom layer of the workspace, providing:
//! - Instrument identifiers and selections (`types::instrument`)
//! - Calendar types: `Date`, `LookbackWindow` (`types::time`)
//! - The pipeline error taxonomy: `RiskError` (`types::error`)
//! - Column-major `PriceTable` and `ReturnTable` (`tables`)
//! - Descriptive statistics and the normal quantile function (`math`)
//!
//! ## Zero Dependency Principle
//!
//! The core layer depends on no other riskscope crate. External dependencies
//! are limited to:
//! - num-traits: generic float math for the normal quantile
//! - chrono: date arithmetic
//! - thiserror: error derivation
//! - serde: serialisation support (optional, `serde` feature)
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::math::statistics::sample_std_dev;
//! use risk_core::types::{Date, InstrumentSet, LookbackWindow};
//!
//! let selection: InstrumentSet = ["PETR4.SA", "TAEE11.SA"].into_iter().collect();
//! assert_eq!(selection.len(), 2);
//!
//! let end = Date::from_ymd(2024, 6, 28).unwrap();
//! let window = LookbackWindow::ending(end, 365).unwrap();
//! assert!(window.contains(end));
//!
//! let sd = sample_std_dev(&[0.10, -0.10]).unwrap();
//! # assert!((sd - 0.14142).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod tables;
pub mod types;

pub use tables::{PriceTable, ReturnTable};
pub use types::{Date, DateError, InstrumentId, InstrumentSet, LookbackWindow, RiskError};
