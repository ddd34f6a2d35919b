//! Satellite ground-track segmentation.
//!
//! A day of ground track pulled from an orbit service holds several
//! disjoint overflights. [`split`] cuts it into passes wherever consecutive
//! samples are further apart than a gap threshold, and [`classify_orbit`]
//! labels each pass ascending or descending so figures can draw only the
//! passes they care about.
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use ground_track::{segment, GroundTrackSample, OrbitDirection};
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 8, 7).unwrap().and_hms_opt(14, 0, 0).unwrap();
//! let samples: Vec<_> = [(0, 1.0), (5, 2.0), (10, 3.0), (600, 9.0), (605, 8.0)]
//!     .into_iter()
//!     .map(|(s, lat)| GroundTrackSample::new(t0 + Duration::seconds(s), lat, -30.0))
//!     .collect();
//!
//! let segments = segment(&samples, Duration::seconds(20)).unwrap();
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].direction, OrbitDirection::Ascending);
//! assert_eq!(segments[1].direction, OrbitDirection::Descending);
//! ```

pub mod config;
pub mod error;
pub mod segment;
pub mod service;
pub mod source;
pub mod types;

pub use config::TrackConfig;
pub use error::{Result, TrackError};
pub use segment::{classify_orbit, filter_by_direction, segment, split, DEFAULT_GAP_SECONDS};
pub use service::TrackService;
pub use source::{GroundTrackSource, MemoryTrackSource};
pub use types::{GroundTrack, GroundTrackSample, OrbitDirection, TrackPass, TrackSegment};
