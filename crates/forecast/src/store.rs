//! Run-level access to forecast datasets with fallback to earlier runs.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use briefing_common::RunId;

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::source::{DatasetSource, SourceError};
use crate::types::{Dataset, Product};

/// Fetches run datasets from a [`DatasetSource`].
///
/// Catalogs lag behind or occasionally drop a run, so
/// [`ForecastStore::fetch_with_fallback`] walks back one cycle at a time
/// until a published run is found or the attempt budget is spent.
#[derive(Clone)]
pub struct ForecastStore {
    source: Arc<dyn DatasetSource>,
    step_hours: u32,
    max_attempts: u32,
}

impl ForecastStore {
    pub fn new(source: Arc<dyn DatasetSource>, config: &ForecastConfig) -> Self {
        Self {
            source,
            step_hours: config.publish_cadence_hours,
            max_attempts: config.max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn step_hours(&self) -> u32 {
        self.step_hours
    }

    /// Fetch exactly one run.
    pub async fn fetch_run(&self, product: Product, run: RunId) -> Result<Dataset> {
        match self.source.fetch(product, run).await {
            Ok(dataset) => Ok(dataset),
            Err(SourceError::RunNotFound { .. }) => {
                Err(ForecastError::RunUnavailable { product, run })
            }
            Err(SourceError::Unavailable(message)) => Err(ForecastError::Source(message)),
        }
    }

    /// Fetch `candidate`, or the newest earlier run that is published.
    ///
    /// At most `max_attempts` runs are tried, counting the candidate. Only a
    /// missing run triggers the next attempt; other source failures are
    /// returned immediately. Returns the run actually used.
    #[instrument(skip(self))]
    pub async fn fetch_with_fallback(
        &self,
        product: Product,
        candidate: RunId,
    ) -> Result<(RunId, Dataset)> {
        let mut run = candidate;

        for attempt in 1..=self.max_attempts {
            match self.fetch_run(product, run).await {
                Ok(dataset) => {
                    if run != candidate {
                        warn!(
                            %product,
                            run = %run,
                            attempt,
                            "Expected run not published, using earlier run"
                        );
                    } else {
                        debug!(%product, run = %run, "Fetched expected run");
                    }
                    return Ok((run, dataset));
                }
                Err(e) if e.is_retryable() => {
                    debug!(%product, run = %run, attempt, "Run not available, stepping back");
                    run = run.earlier_by(self.step_hours);
                }
                Err(e) => return Err(e),
            }
        }

        Err(ForecastError::NoForecastAvailable {
            product,
            candidate,
            attempts: self.max_attempts,
        })
    }

    /// The `count` runs ending at `reference`, oldest first.
    pub fn previous_runs(&self, reference: RunId, count: usize) -> Vec<RunId> {
        previous_runs(reference, count, self.step_hours)
    }
}

/// `[reference - (count-1)*step, ..., reference - step, reference]`.
pub fn previous_runs(reference: RunId, count: usize, step_hours: u32) -> Vec<RunId> {
    let mut runs: Vec<RunId> = std::iter::successors(Some(reference), |run| {
        Some(run.earlier_by(step_hours))
    })
    .take(count)
    .collect();
    runs.reverse();
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run(day: u32, hour: u32) -> RunId {
        RunId::new(NaiveDate::from_ymd_opt(2024, 8, day).unwrap().and_hms_opt(hour, 0, 0).unwrap())
    }

    #[test]
    fn test_previous_runs_oldest_first() {
        let runs = previous_runs(run(7, 0), 3, 12);
        assert_eq!(runs, vec![run(6, 0), run(6, 12), run(7, 0)]);
    }

    #[test]
    fn test_previous_runs_edge_counts() {
        assert!(previous_runs(run(7, 0), 0, 12).is_empty());
        assert_eq!(previous_runs(run(7, 0), 1, 12), vec![run(7, 0)]);
    }
}
