//! Structured error types for the risk pipeline.
//!
//! Every failure a pipeline run can hit is a [`RiskError`] variant. Runs are
//! independent, so none of these errors is fatal to the process: the pipeline
//! boundary turns them into a named failure for the presentation layer.

use thiserror::Error;

use super::time::Date;

/// Errors raised while fetching prices, computing returns, or deriving
/// indicators.
///
/// # Examples
///
/// ```
/// use risk_core::types::RiskError;
///
/// let err = RiskError::DataUnavailable { instrument: "XYZ".to_string() };
/// assert_eq!(format!("{}", err), "No price data available for instrument: XYZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// The data source does not recognise the instrument, or has no
    /// observation for it inside the requested window.
    #[error("No price data available for instrument: {instrument}")]
    DataUnavailable {
        /// Identifier that could not be served
        instrument: String,
    },

    /// The data source could not be reached or read.
    #[error("Price source '{source_name}' unreachable: {reason}")]
    SourceUnreachable {
        /// Name of the failing source
        source_name: String,
        /// Underlying failure description
        reason: String,
    },

    /// Fewer than two price rows, so no return is defined.
    #[error("Insufficient price history: got {rows} row(s), need at least 2")]
    InsufficientHistory {
        /// Number of price rows available
        rows: usize,
    },

    /// A return table with zero rows reached the indicator layer.
    #[error("Return set is empty")]
    EmptyReturnSet,

    /// A price gap was found while the missing-data policy forbids filling.
    #[error("Missing price for instrument {instrument} on {date}")]
    MissingData {
        /// Instrument with the gap
        instrument: String,
        /// ISO-8601 date of the gap
        date: String,
    },

    /// Caller-supplied input violates a precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RiskError {
    /// Creates a [`RiskError::DataUnavailable`] for the given identifier.
    pub fn data_unavailable(instrument: impl Into<String>) -> Self {
        Self::DataUnavailable {
            instrument: instrument.into(),
        }
    }

    /// Creates a [`RiskError::SourceUnreachable`].
    pub fn source_unreachable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnreachable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`RiskError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true when retrying the same request later may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnreachable { .. })
    }
}

/// Date construction and parsing errors.
///
/// # Examples
/// ```
/// use risk_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic left chrono's supported range.
    #[error("Date out of range")]
    OutOfRange,

    /// Range whose start falls after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// First day requested
        start: Date,
        /// Last day requested
        end: Date,
    },
}

impl From<DateError> for RiskError {
    fn from(err: DateError) -> Self {
        RiskError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_display() {
        let err = RiskError::data_unavailable("PETR4.SA");
        assert_eq!(
            format!("{}", err),
            "No price data available for instrument: PETR4.SA"
        );
    }

    #[test]
    fn test_source_unreachable_display() {
        let err = RiskError::source_unreachable("csv", "connection reset");
        assert_eq!(
            format!("{}", err),
            "Price source 'csv' unreachable: connection reset"
        );
    }

    #[test]
    fn test_insufficient_history_display() {
        let err = RiskError::InsufficientHistory { rows: 1 };
        assert_eq!(
            format!("{}", err),
            "Insufficient price history: got 1 row(s), need at least 2"
        );
    }

    #[test]
    fn test_missing_data_display() {
        let err = RiskError::MissingData {
            instrument: "WEGE3.SA".to_string(),
            date: "2024-03-01".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Missing price for instrument WEGE3.SA on 2024-03-01"
        );
    }

    #[test]
    fn test_only_source_failures_are_recoverable() {
        assert!(RiskError::source_unreachable("csv", "timeout").is_recoverable());
        assert!(!RiskError::EmptyReturnSet.is_recoverable());
        assert!(!RiskError::data_unavailable("X").is_recoverable());
        assert!(!RiskError::InsufficientHistory { rows: 0 }.is_recoverable());
    }

    #[test]
    fn test_date_error_into_risk_error() {
        let err: RiskError = DateError::ParseError("bad".to_string()).into();
        match err {
            RiskError::InvalidInput(msg) => assert!(msg.contains("bad")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_invalid_range_display() {
        let err = DateError::InvalidRange {
            start: Date::from_ymd(2024, 2, 1).unwrap(),
            end: Date::from_ymd(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid date range: start 2024-02-01 is after end 2024-01-01"
        );
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(RiskError::EmptyReturnSet);
        assert!(err.to_string().contains("empty"));
    }
}
