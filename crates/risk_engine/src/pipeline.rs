//! One risk run: fetch → returns → indicators.
//!
//! [`RiskPipeline::run`] never fails past its boundary. Every error is
//! converted into [`PipelineOutcome::Failed`] tagged with the
//! [`PipelineStage`] that raised it, and an empty selection short-circuits
//! to [`PipelineOutcome::NothingSelected`] before any data is requested.

use crate::config::{ConfigError, RiskConfig};
use crate::indicators::{CorrelationMatrix, IndicatorEngine, VaRVector, VolatilityVector};
use crate::returns::ReturnComputer;
use adapter_prices::{AlignedPriceRepository, HistorySource, PriceRepository};
use risk_core::{Date, InstrumentSet, LookbackWindow, PriceTable, ReturnTable, RiskError};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pipeline processing stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PipelineStage {
    /// Loading and aligning prices
    Fetch,
    /// Deriving daily returns
    Returns,
    /// Computing volatility, VaR and correlation
    Indicators,
}

impl PipelineStage {
    /// Stage name for display
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Returns => "Returns",
            Self::Indicators => "Indicators",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{stage} stage failed: {error}")]
pub struct PipelineFailure {
    /// Stage that failed
    pub stage: PipelineStage,
    /// Underlying error
    #[source]
    pub error: RiskError,
}

impl PipelineFailure {
    fn at(stage: PipelineStage) -> impl FnOnce(RiskError) -> Self {
        move |error| Self { stage, error }
    }

    /// Returns true if retrying the same run may succeed.
    pub fn is_recoverable(&self) -> bool {
        self.error.is_recoverable()
    }
}

/// Everything one completed run hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    /// Selection the run was computed for
    pub selection: InstrumentSet,
    /// Requested history window
    pub window: LookbackWindow,
    /// Aligned closing prices
    pub prices: PriceTable,
    /// Daily simple returns
    pub returns: ReturnTable,
    /// Annualized volatility
    pub volatility: VolatilityVector,
    /// One-period parametric VaR
    pub var: VaRVector,
    /// Pairwise return correlation
    pub correlation: CorrelationMatrix,
}

/// Result of [`RiskPipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The selection was empty; nothing was fetched
    NothingSelected,
    /// Every stage succeeded
    Completed(RiskReport),
    /// A stage failed
    Failed(PipelineFailure),
}

impl PipelineOutcome {
    /// The report, if the run completed.
    pub fn report(&self) -> Option<&RiskReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// The failure, if the run failed.
    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns true for a completed run.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Synchronous risk pipeline over a [`PriceRepository`].
///
/// # Examples
///
/// ```
/// use adapter_prices::{SyntheticHistory, SyntheticInstrument};
/// use risk_core::{Date, InstrumentSet};
/// use risk_engine::{PipelineOutcome, RiskConfig, RiskPipeline};
///
/// let source = SyntheticHistory::new(42)
///     .with_instrument("PETR4.SA", SyntheticInstrument::new(36.0, 0.08, 0.35))
///     .with_instrument("TAEE11.SA", SyntheticInstrument::new(34.0, 0.05, 0.18));
/// let pipeline = RiskPipeline::from_source(source, RiskConfig::default()).unwrap();
///
/// let selection: InstrumentSet = ["PETR4.SA", "TAEE11.SA"].into_iter().collect();
/// let outcome = pipeline.run(&selection, Date::from_ymd(2024, 6, 28).unwrap());
///
/// let report = outcome.report().unwrap();
/// assert_eq!(report.correlation.dimension(), 2);
///
/// let nothing = pipeline.run(&InstrumentSet::new(), Date::from_ymd(2024, 6, 28).unwrap());
/// assert_eq!(nothing, PipelineOutcome::NothingSelected);
/// ```
#[derive(Debug, Clone)]
pub struct RiskPipeline<R> {
    repository: R,
    config: RiskConfig,
    engine: IndicatorEngine,
}

impl<S: HistorySource> RiskPipeline<AlignedPriceRepository<S>> {
    /// Builds a pipeline aligning `source` with the configured
    /// missing-data policy.
    pub fn from_source(source: S, config: RiskConfig) -> Result<Self, ConfigError> {
        let repository = AlignedPriceRepository::new(source, config.missing_data);
        Self::new(repository, config)
    }
}

impl<R: PriceRepository> RiskPipeline<R> {
    /// Creates a pipeline after validating `config`.
    pub fn new(repository: R, config: RiskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = IndicatorEngine::new(config.trading_days_per_year, config.confidence_level)
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))?;
        Ok(Self {
            repository,
            config,
            engine,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// History window ending at `as_of`.
    pub fn window_ending(&self, as_of: Date) -> Result<LookbackWindow, RiskError> {
        Ok(LookbackWindow::ending(as_of, self.config.lookback_days)?)
    }

    /// Runs every stage, converting errors into an outcome.
    pub fn run(&self, selection: &InstrumentSet, as_of: Date) -> PipelineOutcome {
        if selection.is_empty() {
            debug!("empty selection, skipping run");
            return PipelineOutcome::NothingSelected;
        }

        match self.try_run(selection, as_of) {
            Ok(report) => PipelineOutcome::Completed(report),
            Err(failure) => {
                warn!(
                    stage = %failure.stage,
                    error = %failure.error,
                    recoverable = failure.is_recoverable(),
                    "risk run failed"
                );
                PipelineOutcome::Failed(failure)
            }
        }
    }

    /// Runs every stage, returning the first failure.
    ///
    /// An empty selection fails at the fetch stage.
    pub fn try_run(
        &self,
        selection: &InstrumentSet,
        as_of: Date,
    ) -> Result<RiskReport, PipelineFailure> {
        let started = Instant::now();
        let window = self
            .window_ending(as_of)
            .map_err(PipelineFailure::at(PipelineStage::Fetch))?;

        info!(selection = %selection, window = %window, "starting risk run");

        let prices = self
            .repository
            .fetch(selection, &window)
            .map_err(PipelineFailure::at(PipelineStage::Fetch))?;

        let report = self.analyze(selection.clone(), window, prices)?;

        info!(
            instruments = report.prices.instrument_count(),
            price_rows = report.prices.row_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "risk run completed"
        );
        Ok(report)
    }

    /// Runs the return and indicator stages on an already fetched table.
    pub fn analyze(
        &self,
        selection: InstrumentSet,
        window: LookbackWindow,
        prices: PriceTable,
    ) -> Result<RiskReport, PipelineFailure> {
        let returns =
            ReturnComputer::compute(&prices).map_err(PipelineFailure::at(PipelineStage::Returns))?;

        let indicators = self
            .engine
            .compute_all(&returns)
            .map_err(PipelineFailure::at(PipelineStage::Indicators))?;

        Ok(RiskReport {
            selection,
            window,
            prices,
            returns,
            volatility: indicators.volatility,
            var: indicators.var,
            correlation: indicators.correlation,
        })
    }
}
