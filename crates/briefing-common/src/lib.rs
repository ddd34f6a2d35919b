//! Common types and utilities shared across the briefing crates.

pub mod bbox;
pub mod error;
pub mod events;
pub mod time;

pub use bbox::{BoundingBox, Domain};
pub use error::{DomainParseError, TimeParseError};
pub use events::{EventLevel, EventLog, LoggedEvent};
pub use time::{floor_to_cadence, valid_time, LeadOffset, RunId, TimeUnit};
