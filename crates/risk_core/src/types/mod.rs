//! Identifier, calendar, and error types.
//!
//! This module provides:
//! - `instrument`: `InstrumentId` and the ordered `InstrumentSet` selection
//! - `time`: `Date` and `LookbackWindow`
//! - `error`: `RiskError` taxonomy and `DateError`

pub mod error;
pub mod instrument;
pub mod time;

pub use error::{DateError, RiskError};
pub use instrument::{InstrumentId, InstrumentSet};
pub use time::{Date, LookbackWindow};
