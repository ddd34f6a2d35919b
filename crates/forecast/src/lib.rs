//! Forecast acquisition and temporal alignment for weather briefings.
//!
//! NWP runs are published on a fixed cadence with a lag, and a catalog may
//! not (yet) hold the run a briefing expects. This crate works out which run
//! to use, falls back to earlier runs when needed, turns accumulated fields
//! into rates and picks out the slice valid at the briefing's lead time.
//!
//! # Architecture
//!
//! ```text
//! ForecastService::get_forecast(request, now)
//!      │
//!      ├─► IssueTimeResolver: candidate run from briefing time and now
//!      │
//!      ├─► ForecastStore::fetch_with_fallback(candidate)
//!      │         │
//!      │         ├─► DatasetSource::fetch(product, run)
//!      │         │
//!      │         └─► RunNotFound: step back one cycle (bounded attempts)
//!      │
//!      ├─► to_instantaneous (optional): accumulation → rate
//!      │
//!      └─► slice at briefing time + lead, optionally cropped to a domain
//!               │
//!               ▼
//!          (RunId actually used, ForecastSlice)
//! ```

pub mod config;
pub mod differentiate;
pub mod error;
pub mod request;
pub mod resolver;
pub mod service;
pub mod source;
pub mod store;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{ForecastConfig, OnMissing};
pub use differentiate::to_instantaneous;
pub use error::{ForecastError, Result};
pub use request::ForecastRequest;
pub use resolver::IssueTimeResolver;
pub use service::{ForecastService, PairedForecast};
pub use source::{DatasetSource, MemorySource, SourceError};
pub use store::{previous_runs, ForecastStore};
pub use types::{Accumulation, CellCoords, Dataset, ForecastField, ForecastSlice, Product};
