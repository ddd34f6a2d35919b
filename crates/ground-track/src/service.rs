//! Track lookup for briefing figures.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, instrument};

use briefing_common::{valid_time, LeadOffset};

use crate::config::TrackConfig;
use crate::error::Result;
use crate::segment::{filter_by_direction, segment};
use crate::source::GroundTrackSource;
use crate::types::{OrbitDirection, TrackSegment};

/// Fetches and segments the ground track overlapping a forecast valid time.
pub struct TrackService {
    source: Arc<dyn GroundTrackSource>,
    config: TrackConfig,
}

impl TrackService {
    pub fn new(source: Arc<dyn GroundTrackSource>, config: TrackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Passes of `satellite` on the UTC day of `briefing_time + lead`,
    /// restricted to `directions`.
    #[instrument(skip(self, directions))]
    pub async fn segments_for_valid_time(
        &self,
        satellite: &str,
        briefing_time: DateTime<Utc>,
        lead: LeadOffset,
        directions: &[OrbitDirection],
    ) -> Result<Vec<TrackSegment>> {
        let day = valid_day(briefing_time, lead);
        let track = self.source.track_for_day(satellite, day).await?;
        let segments = segment(&track.samples, self.config.gap())?;
        let total = segments.len();
        let segments = filter_by_direction(segments, directions);

        debug!(%day, total, kept = segments.len(), "Segmented ground track");
        Ok(segments)
    }
}

fn valid_day(briefing_time: DateTime<Utc>, lead: LeadOffset) -> NaiveDate {
    valid_time(briefing_time, lead).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_day_crosses_midnight() {
        let briefing = Utc.with_ymd_and_hms(2024, 8, 7, 0, 0, 0).unwrap();
        assert_eq!(
            valid_day(briefing, LeadOffset::from_hours(36)),
            NaiveDate::from_ymd_opt(2024, 8, 8).unwrap()
        );
        assert_eq!(
            valid_day(briefing, LeadOffset::from_hours(0)),
            NaiveDate::from_ymd_opt(2024, 8, 7).unwrap()
        );
    }
}
