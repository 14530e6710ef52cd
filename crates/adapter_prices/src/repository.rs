//! The price repository contract and its source-backed implementation.
//!
//! A [`HistorySource`] knows how to load one instrument's raw closes. The
//! [`AlignedPriceRepository`] turns any source into a [`PriceRepository`] by
//! loading every requested instrument and merging the series under a
//! [`MissingDataPolicy`].

use crate::alignment::{align, MissingDataPolicy};
use crate::series::PriceSeries;
use risk_core::{InstrumentId, InstrumentSet, LookbackWindow, PriceTable, RiskError};
use tracing::{debug, info};

/// Fetches aligned closing-price history for a selection of instruments.
///
/// Implementations guarantee that every requested instrument yields exactly
/// one column (in selection order) and that all columns share the same
/// ascending dates inside `window`.
///
/// # Errors
/// - `RiskError::InvalidInput` for an empty selection
/// - `RiskError::DataUnavailable` naming an unknown instrument, or one with
///   no observation in the window
/// - `RiskError::SourceUnreachable` when the backing source fails
/// - `RiskError::MissingData` under [`MissingDataPolicy::Fail`]
pub trait PriceRepository {
    /// Fetches the aligned price table.
    fn fetch(
        &self,
        instruments: &InstrumentSet,
        window: &LookbackWindow,
    ) -> Result<PriceTable, RiskError>;
}

impl<R: PriceRepository + ?Sized> PriceRepository for &R {
    fn fetch(
        &self,
        instruments: &InstrumentSet,
        window: &LookbackWindow,
    ) -> Result<PriceTable, RiskError> {
        (**self).fetch(instruments, window)
    }
}

impl<R: PriceRepository + ?Sized> PriceRepository for Box<R> {
    fn fetch(
        &self,
        instruments: &InstrumentSet,
        window: &LookbackWindow,
    ) -> Result<PriceTable, RiskError> {
        (**self).fetch(instruments, window)
    }
}

/// Backing store for one instrument's closing prices.
pub trait HistorySource {
    /// Human-readable name used in logs and `SourceUnreachable` errors.
    fn name(&self) -> &str;

    /// Loads the closes of `instrument` covering `window`.
    ///
    /// Sources may return observations outside the window; callers clip.
    /// An unknown instrument must fail with `RiskError::DataUnavailable`.
    fn load(
        &self,
        instrument: &InstrumentId,
        window: &LookbackWindow,
    ) -> Result<PriceSeries, RiskError>;
}

/// [`PriceRepository`] over any [`HistorySource`].
///
/// # Examples
///
/// ```
/// use adapter_prices::{AlignedPriceRepository, InMemoryHistory, MissingDataPolicy, PriceRepository};
/// use risk_core::{Date, InstrumentSet, LookbackWindow};
///
/// let d1 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d2 = Date::from_ymd(2024, 1, 3).unwrap();
/// let source = InMemoryHistory::new()
///     .with_series("A", vec![(d1, 10.0), (d2, 11.0)]);
///
/// let repo = AlignedPriceRepository::new(source, MissingDataPolicy::ForwardFill);
/// let selection: InstrumentSet = ["A"].into_iter().collect();
/// let window = LookbackWindow::new(d1, d2).unwrap();
///
/// let table = repo.fetch(&selection, &window).unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AlignedPriceRepository<S> {
    source: S,
    policy: MissingDataPolicy,
}

impl<S: HistorySource> AlignedPriceRepository<S> {
    /// Wraps a source with the given gap policy.
    pub fn new(source: S, policy: MissingDataPolicy) -> Self {
        Self { source, policy }
    }

    /// The gap policy applied on fetch.
    pub fn policy(&self) -> MissingDataPolicy {
        self.policy
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: HistorySource> PriceRepository for AlignedPriceRepository<S> {
    fn fetch(
        &self,
        instruments: &InstrumentSet,
        window: &LookbackWindow,
    ) -> Result<PriceTable, RiskError> {
        if instruments.is_empty() {
            return Err(RiskError::invalid_input(
                "price fetch requires at least one instrument",
            ));
        }

        let mut series = Vec::with_capacity(instruments.len());
        for id in instruments {
            let loaded = self.source.load(id, window)?.within(window);
            if loaded.is_empty() {
                return Err(RiskError::data_unavailable(id.as_str()));
            }
            debug!(
                source = self.source.name(),
                instrument = %id,
                observations = loaded.len(),
                "loaded price series"
            );
            series.push(loaded);
        }

        let table = align(instruments.ids(), &series, self.policy)?;
        info!(
            source = self.source.name(),
            instruments = instruments.len(),
            rows = table.row_count(),
            policy = %self.policy,
            window = %window,
            "fetched price table"
        );
        Ok(table)
    }
}
