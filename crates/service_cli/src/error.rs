//! CLI error types

use risk_engine::{ConfigError, PipelineFailure};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Instrument outside the configured allow-list
    #[error("Instrument '{0}' is not available; run `riskscope instruments` to list choices")]
    UnknownInstrument(String),

    /// A pipeline stage failed
    #[error(transparent)]
    Pipeline(#[from] PipelineFailure),

    /// Price data could not be read or written
    #[error("Price data error: {0}")]
    Data(#[from] risk_core::RiskError),

    /// Rendering output failed
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
