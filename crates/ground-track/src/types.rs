//! Ground-track samples, passes and segments.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// One sub-satellite point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTrackSample {
    /// UTC time of the sample.
    pub time: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
}

impl GroundTrackSample {
    pub fn new(time: NaiveDateTime, lat: f64, lon: f64) -> Self {
        Self { time, lat, lon }
    }
}

impl From<(NaiveDateTime, f64, f64)> for GroundTrackSample {
    fn from((time, lat, lon): (NaiveDateTime, f64, f64)) -> Self {
        Self::new(time, lat, lon)
    }
}

/// Raw, possibly discontinuous track of one satellite, ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTrack {
    pub satellite: String,
    pub samples: Vec<GroundTrackSample>,
}

impl GroundTrack {
    pub fn new(satellite: impl Into<String>, samples: Vec<GroundTrackSample>) -> Self {
        Self {
            satellite: satellite.into(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<GroundTrackSample> for GroundTrack {
    fn from_iter<I: IntoIterator<Item = GroundTrackSample>>(iter: I) -> Self {
        Self::new(String::new(), iter.into_iter().collect())
    }
}

/// Contiguous run of samples with no gap above the split threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPass<'a> {
    samples: &'a [GroundTrackSample],
}

impl<'a> TrackPass<'a> {
    pub(crate) fn new(samples: &'a [GroundTrackSample]) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &'a [GroundTrackSample] {
        self.samples
    }
}

impl Deref for TrackPass<'_> {
    type Target = [GroundTrackSample];

    fn deref(&self) -> &Self::Target {
        self.samples
    }
}

/// Direction of travel in latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitDirection {
    /// Moving north.
    Ascending,
    /// Moving south.
    Descending,
}

impl OrbitDirection {
    pub fn all() -> &'static [OrbitDirection] {
        &[OrbitDirection::Ascending, OrbitDirection::Descending]
    }
}

impl FromStr for OrbitDirection {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(OrbitDirection::Ascending),
            "descending" | "desc" => Ok(OrbitDirection::Descending),
            other => Err(TrackError::Config(format!("unknown orbit direction '{other}'"))),
        }
    }
}

impl fmt::Display for OrbitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitDirection::Ascending => f.write_str("ascending"),
            OrbitDirection::Descending => f.write_str("descending"),
        }
    }
}

/// A classified pass.
///
/// Latitude is strictly monotonic over `samples` in the sense given by
/// `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub samples: Vec<GroundTrackSample>,
    pub direction: OrbitDirection,
}

impl TrackSegment {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|s| s.time)
    }

    /// `(lat, lon)` pairs for drawing.
    pub fn coordinates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.lat, s.lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_direction_parse() {
        assert_eq!("Ascending".parse::<OrbitDirection>().unwrap(), OrbitDirection::Ascending);
        assert_eq!("desc".parse::<OrbitDirection>().unwrap(), OrbitDirection::Descending);
        assert!("sideways".parse::<OrbitDirection>().is_err());
    }

    #[test]
    fn test_orbit_direction_display() {
        assert_eq!(OrbitDirection::Descending.to_string(), "descending");
    }
}
