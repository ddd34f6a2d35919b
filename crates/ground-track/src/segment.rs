//! Splitting tracks into passes and classifying orbit direction.

use chrono::Duration;
use tracing::debug;

use crate::error::{Result, TrackError};
use crate::types::{GroundTrackSample, OrbitDirection, TrackPass, TrackSegment};

/// Gap above which two consecutive samples belong to different passes.
pub const DEFAULT_GAP_SECONDS: i64 = 20;

/// Cut a time-ordered track into passes.
///
/// A new pass starts after every pair of consecutive samples more than `gap`
/// apart; a gap exactly equal to `gap` does not split. The last pass ends at
/// the final sample. Samples are assumed sorted by time.
pub fn split(track: &[GroundTrackSample], gap: Duration) -> Vec<TrackPass<'_>> {
    let mut passes = Vec::new();
    if track.is_empty() {
        return passes;
    }

    let mut start = 0;
    for i in 1..track.len() {
        if track[i].time - track[i - 1].time > gap {
            passes.push(TrackPass::new(&track[start..i]));
            start = i;
        }
    }
    passes.push(TrackPass::new(&track[start..]));

    debug!(samples = track.len(), passes = passes.len(), "Split ground track");
    passes
}

/// Direction of a pass from the sign of every latitude step.
///
/// All steps negative is descending, all positive is ascending. A pass
/// without steps (a lone sample) is descending. A zero or sign-changing step
/// is [`TrackError::AmbiguousOrbit`].
pub fn classify_orbit(pass: &[GroundTrackSample]) -> Result<OrbitDirection> {
    if pass.len() < 2 {
        return Ok(OrbitDirection::Descending);
    }

    let mut deltas = pass.windows(2).map(|w| w[1].lat - w[0].lat);
    if deltas.clone().all(|d| d < 0.0) {
        Ok(OrbitDirection::Descending)
    } else if deltas.all(|d| d > 0.0) {
        Ok(OrbitDirection::Ascending)
    } else {
        Err(TrackError::AmbiguousOrbit {
            start: pass[0].time,
            samples: pass.len(),
        })
    }
}

/// Split and classify. The first ambiguous pass fails the whole track.
pub fn segment(track: &[GroundTrackSample], gap: Duration) -> Result<Vec<TrackSegment>> {
    split(track, gap)
        .into_iter()
        .map(|pass| {
            let direction = classify_orbit(&pass)?;
            Ok(TrackSegment {
                samples: pass.to_vec(),
                direction,
            })
        })
        .collect()
}

/// Keep the segments travelling in one of `directions`.
pub fn filter_by_direction(
    segments: Vec<TrackSegment>,
    directions: &[OrbitDirection],
) -> Vec<TrackSegment> {
    segments
        .into_iter()
        .filter(|s| directions.contains(&s.direction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t(seconds: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 7)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
            + Duration::seconds(seconds)
    }

    fn samples(points: &[(i64, f64)]) -> Vec<GroundTrackSample> {
        points
            .iter()
            .map(|&(s, lat)| GroundTrackSample::new(t(s), lat, -30.0))
            .collect()
    }

    fn lats(values: &[f64]) -> Vec<GroundTrackSample> {
        let points: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, &lat)| (5 * i as i64, lat))
            .collect();
        samples(&points)
    }

    #[test]
    fn test_split_empty() {
        assert!(split(&[], Duration::seconds(20)).is_empty());
    }

    #[test]
    fn test_split_single_sample() {
        let track = lats(&[3.0]);
        let passes = split(&track, Duration::seconds(20));
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].len(), 1);
    }

    #[test]
    fn test_split_gap_equal_to_threshold_stays_together() {
        let track = samples(&[(0, 1.0), (20, 2.0), (41, 3.0)]);
        let passes = split(&track, Duration::seconds(20));
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].len(), 2);
        assert_eq!(passes[1][0].time, t(41));
    }

    #[test]
    fn test_classify_directions() {
        assert_eq!(classify_orbit(&lats(&[1.0, 2.0, 3.0, 4.0])).unwrap(), OrbitDirection::Ascending);
        assert_eq!(classify_orbit(&lats(&[4.0, 3.0, 2.0, 1.0])).unwrap(), OrbitDirection::Descending);
    }

    #[test]
    fn test_classify_non_monotonic() {
        let err = classify_orbit(&lats(&[1.0, 3.0, 2.0, 4.0])).unwrap_err();
        assert_eq!(
            err,
            TrackError::AmbiguousOrbit {
                start: t(0),
                samples: 4,
            }
        );
    }

    #[test]
    fn test_classify_flat_step_is_ambiguous() {
        assert!(classify_orbit(&lats(&[1.0, 2.0, 2.0])).is_err());
    }

    #[test]
    fn test_classify_lone_sample_is_descending() {
        assert_eq!(classify_orbit(&lats(&[1.0])).unwrap(), OrbitDirection::Descending);
        assert_eq!(classify_orbit(&[]).unwrap(), OrbitDirection::Descending);
    }

    #[test]
    fn test_segment_keeps_passes_around_lone_sample() {
        let track = samples(&[(0, 1.0), (5, 2.0), (10, 3.0), (3600, 7.0), (7200, 4.0), (7205, 3.0)]);
        let segments = segment(&track, Duration::seconds(20)).unwrap();

        let sizes: Vec<_> = segments.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![3, 1, 2]);
        assert_eq!(segments[0].direction, OrbitDirection::Ascending);
        assert_eq!(segments[1].direction, OrbitDirection::Descending);
    }

    #[test]
    fn test_segment_fails_on_first_ambiguity() {
        let track = samples(&[(0, 1.0), (5, 2.0), (100, 5.0), (105, 7.0), (110, 6.0)]);
        assert!(matches!(
            segment(&track, Duration::seconds(20)),
            Err(TrackError::AmbiguousOrbit { samples: 3, .. })
        ));
    }

    #[test]
    fn test_filter_by_direction() {
        let track = samples(&[(0, 1.0), (5, 2.0), (100, 5.0), (105, 4.0)]);
        let segments = segment(&track, Duration::seconds(20)).unwrap();

        let descending = filter_by_direction(segments.clone(), &[OrbitDirection::Descending]);
        assert_eq!(descending.len(), 1);
        assert_eq!(descending[0].start(), Some(t(100)));

        assert_eq!(filter_by_direction(segments.clone(), OrbitDirection::all()).len(), 2);
        assert!(filter_by_direction(segments, &[]).is_empty());
    }
}
