//! Error types for ground-track handling.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors that can occur while fetching or segmenting ground tracks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Latitude within a pass is not strictly monotonic.
    #[error("pass starting at {start} ({samples} samples) is neither ascending nor descending")]
    AmbiguousOrbit { start: NaiveDateTime, samples: usize },

    #[error("no ground track for {satellite} on {day}")]
    TrackNotFound { satellite: String, day: NaiveDate },

    #[error("ground track source error: {0}")]
    Source(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for ground-track operations.
pub type Result<T> = std::result::Result<T, TrackError>;
