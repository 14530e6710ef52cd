//! Riskscope command-line dashboard.
//!
//! As part of the **S**ervice layer, this crate injects the presentation
//! configuration (instrument allow-list, default selection, data source) and
//! renders the core's risk report as text or JSON.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use error::{CliError, Result};
