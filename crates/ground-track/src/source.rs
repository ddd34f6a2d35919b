//! The ground-track fetch capability and an in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Result, TrackError};
use crate::types::GroundTrack;

/// Something that can deliver one satellite's ground track for a UTC day.
#[async_trait]
pub trait GroundTrackSource: Send + Sync {
    async fn track_for_day(&self, satellite: &str, day: NaiveDate) -> Result<GroundTrack>;
}

#[async_trait]
impl<T: GroundTrackSource + ?Sized> GroundTrackSource for Arc<T> {
    async fn track_for_day(&self, satellite: &str, day: NaiveDate) -> Result<GroundTrack> {
        (**self).track_for_day(satellite, day).await
    }
}

/// Tracks held in memory, keyed by satellite and day.
#[derive(Debug, Default)]
pub struct MemoryTrackSource {
    tracks: HashMap<(String, NaiveDate), GroundTrack>,
}

impl MemoryTrackSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, day: NaiveDate, track: GroundTrack) -> Self {
        self.insert(day, track);
        self
    }

    pub fn insert(&mut self, day: NaiveDate, track: GroundTrack) {
        self.tracks.insert((track.satellite.clone(), day), track);
    }
}

#[async_trait]
impl GroundTrackSource for MemoryTrackSource {
    async fn track_for_day(&self, satellite: &str, day: NaiveDate) -> Result<GroundTrack> {
        self.tracks
            .get(&(satellite.to_string(), day))
            .cloned()
            .ok_or_else(|| TrackError::TrackNotFound {
                satellite: satellite.to_string(),
                day,
            })
    }
}
