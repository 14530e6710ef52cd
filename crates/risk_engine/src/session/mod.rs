//! Explicit recomputation on selection change.
//!
//! A [`RiskSession`] owns a pipeline and the latest result. Every call to
//! [`RiskSession::select`] runs the pipeline from scratch; when calls overlap
//! the most recently started one wins.

mod latest;

pub use latest::{LatestRunSlot, RunTicket};

use crate::pipeline::{PipelineOutcome, RiskPipeline};
use adapter_prices::PriceRepository;
use risk_core::{Date, InstrumentSet};
use std::sync::Arc;
use tracing::debug;

/// Result of one selection, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// Run sequence number
    pub run_id: u64,
    /// Selection the run was computed for
    pub selection: InstrumentSet,
    /// As-of date of the run
    pub as_of: Date,
    /// Run outcome
    pub outcome: PipelineOutcome,
}

/// Selection-driven front end to a [`RiskPipeline`].
///
/// # Examples
///
/// ```
/// use adapter_prices::{SyntheticHistory, SyntheticInstrument};
/// use risk_core::{Date, InstrumentSet};
/// use risk_engine::{RiskConfig, RiskPipeline, RiskSession};
///
/// let source = SyntheticHistory::new(1)
///     .with_instrument("WEGE3.SA", SyntheticInstrument::new(40.0, 0.1, 0.3));
/// let session = RiskSession::new(RiskPipeline::from_source(source, RiskConfig::default()).unwrap());
///
/// let selection: InstrumentSet = ["WEGE3.SA"].into_iter().collect();
/// let view = session.select(selection, Date::from_ymd(2024, 6, 28).unwrap()).unwrap();
/// assert!(view.outcome.is_completed());
/// assert_eq!(session.current().unwrap().run_id, view.run_id);
/// ```
#[derive(Debug)]
pub struct RiskSession<R> {
    pipeline: RiskPipeline<R>,
    slot: LatestRunSlot<SessionView>,
}

impl<R: PriceRepository> RiskSession<R> {
    /// Creates a session with no result yet.
    pub fn new(pipeline: RiskPipeline<R>) -> Self {
        Self {
            pipeline,
            slot: LatestRunSlot::new(),
        }
    }

    /// Underlying pipeline.
    pub fn pipeline(&self) -> &RiskPipeline<R> {
        &self.pipeline
    }

    /// Recomputes for `selection` as of `as_of`.
    ///
    /// Returns the new view if it became current, or `None` if a newer
    /// selection was started while this one was running.
    pub fn select(&self, selection: InstrumentSet, as_of: Date) -> Option<Arc<SessionView>> {
        let ticket = self.slot.begin();
        let run_id = ticket.id();
        let outcome = self.pipeline.run(&selection, as_of);

        let view = SessionView {
            run_id,
            selection,
            as_of,
            outcome,
        };

        let published = self.slot.publish(ticket, view);
        if published.is_none() {
            debug!(run_id, "discarding result of superseded run");
        }
        published
    }

    /// Latest accepted view.
    pub fn current(&self) -> Option<Arc<SessionView>> {
        self.slot.current()
    }
}
