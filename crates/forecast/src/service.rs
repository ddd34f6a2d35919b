//! High-level forecast service.
//!
//! The `ForecastService` ties together run resolution, fetching with
//! fallback, differentiation and valid-time selection. This is the interface
//! the briefing figures use.
//!
//! # Example
//!
//! ```rust,ignore
//! let events = Arc::new(EventLog::new());
//! let service = ForecastService::new(source, ForecastConfig::from_env(), events.clone())?;
//!
//! let request = ForecastRequest::new("ttr", briefing_time, "036h".parse()?)
//!     .differentiate(TimeUnit::Seconds)
//!     .within_domain(Domain::Orcestra);
//!
//! let (run, olr) = service.get_forecast(&request, Utc::now()).await?;
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, Stream};
use tracing::{debug, instrument, warn};

use briefing_common::{EventLog, RunId};

use crate::config::{ForecastConfig, OnMissing};
use crate::differentiate::to_instantaneous;
use crate::error::{ForecastError, Result};
use crate::request::ForecastRequest;
use crate::resolver::IssueTimeResolver;
use crate::source::DatasetSource;
use crate::store::ForecastStore;
use crate::types::{ForecastSlice, Product};

/// Operational and ensemble forecasts for the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedForecast {
    pub operational: (RunId, ForecastSlice),
    pub ensemble: (RunId, ForecastSlice),
    /// Whether both products came from the same run.
    pub consistent: bool,
}

/// Resolves, fetches and aligns forecasts for briefing figures.
///
/// Holds no per-request state: every call resolves and fetches afresh, so
/// one service can be shared by concurrent producers.
pub struct ForecastService {
    resolver: IssueTimeResolver,
    store: ForecastStore,
    config: ForecastConfig,
    events: Arc<EventLog>,
}

impl ForecastService {
    /// Create a new ForecastService.
    ///
    /// # Arguments
    /// * `source` - Capability that fetches one product/run dataset
    /// * `config` - Cadence, publish lag and fallback settings
    /// * `events` - Caller-owned log that receives warnings (fallbacks,
    ///   skipped runs, run mismatches)
    pub fn new(
        source: Arc<dyn DatasetSource>,
        config: ForecastConfig,
        events: Arc<EventLog>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: IssueTimeResolver::from_config(&config),
            store: ForecastStore::new(source, &config),
            config,
            events,
        })
    }

    pub fn resolver(&self) -> &IssueTimeResolver {
        &self.resolver
    }

    pub fn store(&self) -> &ForecastStore {
        &self.store
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn events(&self) -> &Arc<EventLog> {
        &self.events
    }

    /// Forecast for the request's valid time from the newest usable run.
    ///
    /// Returns the run actually used with the selected slice.
    ///
    /// # Errors
    /// * `NoForecastAvailable` when no run within the attempt budget exists
    /// * `FieldNotFound` / `ValidTimeNotFound` for requests the run cannot serve
    /// * differentiation errors when `differentiate` is set on a bad field
    #[instrument(skip(self, request), fields(variable = %request.variable, lead = %request.lead, product = %request.product))]
    pub async fn get_forecast(
        &self,
        request: &ForecastRequest,
        current_time: DateTime<Utc>,
    ) -> Result<(RunId, ForecastSlice)> {
        self.forecast_for(request, request.briefing_time, current_time)
            .await
    }

    /// The request's valid time as forecast by each of `count` runs ending at
    /// `reference`, oldest first.
    ///
    /// The stream is lazy: a run is resolved and fetched only when the next
    /// element is polled. `on_missing` decides what happens when a run has no
    /// forecast; any other error is always yielded.
    pub fn get_previous_forecasts<'a>(
        &'a self,
        request: &'a ForecastRequest,
        current_time: DateTime<Utc>,
        reference: RunId,
        count: usize,
        on_missing: OnMissing,
    ) -> impl Stream<Item = Result<(RunId, ForecastSlice)>> + 'a {
        let runs = self.store.previous_runs(reference, count);
        debug!(count = runs.len(), reference = %reference, "Streaming previous forecasts");

        stream::unfold(
            (runs.into_iter(), false),
            move |(mut runs, finished)| async move {
                if finished {
                    return None;
                }
                loop {
                    let run = runs.next()?;
                    match self
                        .forecast_for(request, run.init_time_utc(), current_time)
                        .await
                    {
                        Ok(item) => return Some((Ok(item), (runs, false))),
                        Err(e) if e.is_no_forecast() => match on_missing {
                            OnMissing::Yield => return Some((Err(e), (runs, false))),
                            OnMissing::Skip => {
                                self.events.warning(format!(
                                    "Skipping previous forecast of '{}' for run {run}: {e}",
                                    request.variable
                                ));
                            }
                            OnMissing::Abort => return Some((Err(e), (runs, true))),
                        },
                        Err(e) => return Some((Err(e), (runs, false))),
                    }
                }
            },
        )
    }

    /// Same as [`get_previous_forecasts`](Self::get_previous_forecasts) with
    /// the configured missing-run policy.
    pub fn get_previous_forecasts_default<'a>(
        &'a self,
        request: &'a ForecastRequest,
        current_time: DateTime<Utc>,
        reference: RunId,
        count: usize,
    ) -> impl Stream<Item = Result<(RunId, ForecastSlice)>> + 'a {
        self.get_previous_forecasts(request, current_time, reference, count, self.config.on_missing)
    }

    /// Warn when two streams that should share an initialization do not.
    ///
    /// A mismatch is a data-quality signal only. Returns whether the runs agree.
    pub fn consistency_check(&self, run_a: RunId, run_b: RunId) -> bool {
        if run_a == run_b {
            return true;
        }
        warn!(run_a = %run_a, run_b = %run_b, "Forecast issue times disagree");
        self.events.warning(format!(
            "Issue times of paired forecasts disagree: {run_a} vs {run_b}"
        ));
        false
    }

    /// Operational and ensemble forecasts for one request, checked for a
    /// common initialization.
    pub async fn get_paired_forecasts(
        &self,
        request: &ForecastRequest,
        current_time: DateTime<Utc>,
    ) -> Result<PairedForecast> {
        let operational = self
            .get_forecast(&request.clone().product(Product::Operational), current_time)
            .await?;
        let ensemble = self
            .get_forecast(&request.clone().product(Product::Ensemble), current_time)
            .await?;
        let consistent = self.consistency_check(operational.0, ensemble.0);

        Ok(PairedForecast {
            operational,
            ensemble,
            consistent,
        })
    }

    /// Resolve, fetch, differentiate and select, treating `briefing_time` as
    /// the nominal time for run resolution. The valid time always comes from
    /// the request.
    async fn forecast_for(
        &self,
        request: &ForecastRequest,
        briefing_time: DateTime<Utc>,
        current_time: DateTime<Utc>,
    ) -> Result<(RunId, ForecastSlice)> {
        let candidate = self.resolver.expected_issue_time(briefing_time, current_time);
        let (run, dataset) = self
            .store
            .fetch_with_fallback(request.product, candidate)
            .await?;

        let field = dataset
            .field(&request.variable)
            .ok_or_else(|| ForecastError::FieldNotFound {
                variable: request.variable.clone(),
                product: request.product,
                run,
            })?;

        let field = match request.differentiate {
            Some(unit) => Cow::Owned(to_instantaneous(field, run, unit)?),
            None => Cow::Borrowed(field),
        };

        let valid_time = request.valid_time().naive_utc();
        let slice = field
            .slice_at(valid_time)
            .ok_or_else(|| ForecastError::ValidTimeNotFound {
                variable: request.variable.clone(),
                run,
                valid_time,
            })?;

        let slice = match &request.region {
            Some(bbox) => slice.within(bbox),
            None => slice,
        };

        debug!(run = %run, cells = slice.len(), "Selected forecast slice");
        Ok((run, slice))
    }
}
