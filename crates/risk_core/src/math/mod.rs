//! Numerical building blocks for the indicator layer.
//!
//! - `statistics`: mean, sample variance/standard deviation, Pearson correlation
//! - `distributions`: standard normal quantile function

pub mod distributions;
pub mod statistics;
