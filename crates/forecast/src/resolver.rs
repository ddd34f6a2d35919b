//! Decides which model run a briefing should ask for.

use chrono::{DateTime, Duration, Utc};

use briefing_common::{floor_to_cadence, RunId};

use crate::config::ForecastConfig;

/// Picks the expected run for a briefing time given the wall-clock time.
///
/// The result is only a candidate: the store confirms it exists and walks
/// back through earlier runs when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueTimeResolver {
    cadence_hours: u32,
    publish_lag_hours: u32,
}

impl Default for IssueTimeResolver {
    fn default() -> Self {
        Self::new(12)
    }
}

impl IssueTimeResolver {
    pub fn new(cadence_hours: u32) -> Self {
        Self {
            cadence_hours,
            publish_lag_hours: 0,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            cadence_hours: config.publish_cadence_hours,
            publish_lag_hours: config.publish_lag_hours,
        }
    }

    /// Subtract `hours` from the wall-clock time before flooring, so a run
    /// that is initialized but not yet published is not requested.
    pub fn with_publish_lag(mut self, hours: u32) -> Self {
        self.publish_lag_hours = hours;
        self
    }

    pub fn cadence_hours(&self) -> u32 {
        self.cadence_hours
    }

    pub fn publish_lag_hours(&self) -> u32 {
        self.publish_lag_hours
    }

    /// Expected run for a briefing produced at `current_time`.
    ///
    /// A briefing produced at or after its own nominal time asks for the run
    /// initialized at the briefing time. A briefing prepared ahead of time
    /// asks for the latest cycle before `current_time` (less the publish lag).
    pub fn expected_issue_time(
        &self,
        briefing_time: DateTime<Utc>,
        current_time: DateTime<Utc>,
    ) -> RunId {
        if current_time >= briefing_time {
            return RunId::from_utc(briefing_time);
        }

        let published_by = current_time - Duration::hours(i64::from(self.publish_lag_hours));
        RunId::from_utc(floor_to_cadence(published_by, self.cadence_hours))
    }
}
