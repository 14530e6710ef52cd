//! Calendar types for price history.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `LookbackWindow`: Inclusive calendar range a price history is fetched for
//!
//! # Examples
//!
//! ```
//! use risk_core::types::time::{Date, LookbackWindow};
//!
//! let end = Date::from_ymd(2024, 12, 31).unwrap();
//! let window = LookbackWindow::ending(end, 365).unwrap();
//! assert_eq!(window.start(), Date::from_ymd(2024, 1, 1).unwrap());
//! assert!(window.contains(Date::from_ymd(2024, 6, 15).unwrap()));
//! ```

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing/formatting and the day arithmetic the price
/// pipeline needs.
///
/// # Examples
///
/// ```
/// use risk_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 14).unwrap();
/// let parsed: Date = "2024-06-14".parse().unwrap();
/// assert_eq!(date, parsed);
/// assert!(date.is_weekday());
///
/// let next = date.add_days(3).unwrap();
/// assert_eq!(next - date, 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns true for Monday through Friday.
    pub fn is_weekday(&self) -> bool {
        !matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the date `days` calendar days later.
    pub fn add_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .ok_or(DateError::OutOfRange)
    }

    /// Returns the date `days` calendar days earlier.
    pub fn sub_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_sub_days(Days::new(days))
            .map(Date)
            .ok_or(DateError::OutOfRange)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Inclusive calendar range over which price history is requested.
///
/// Invariant: `start <= end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WindowBounds"))]
pub struct LookbackWindow {
    start: Date,
    end: Date,
}

impl LookbackWindow {
    /// Creates a window from explicit bounds.
    ///
    /// Fails with `DateError::InvalidRange` if `start > end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DateError> {
        if start > end {
            return Err(DateError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `lookback_days` calendar days ending on (and including) `end`.
    ///
    /// A lookback of 0 yields the single day `end`.
    pub fn ending(end: Date, lookback_days: u32) -> Result<Self, DateError> {
        let start = end.sub_days(u64::from(lookback_days))?;
        Ok(Self { start, end })
    }

    /// First day of the window.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day of the window.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns true if `date` lies inside the window (inclusive).
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates over every calendar day in the window, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.start
            .0
            .iter_days()
            .take_while(move |d| *d <= self.end.0)
            .map(Date)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WindowBounds {
    start: Date,
    end: Date,
}

#[cfg(feature = "serde")]
impl TryFrom<WindowBounds> for LookbackWindow {
    type Error = DateError;

    fn try_from(bounds: WindowBounds) -> Result<Self, DateError> {
        Self::new(bounds.start, bounds.end)
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
