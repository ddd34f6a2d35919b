//! Error types shared by the briefing crates.

use thiserror::Error;

/// Failure to interpret a time-related label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Invalid lead offset '{0}', expected e.g. '036h'")]
    InvalidLeadOffset(String),

    #[error("Invalid time unit '{0}', expected seconds, hours or days")]
    InvalidUnit(String),
}

/// Failure to interpret a named geographic domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainParseError {
    #[error("Unknown domain '{0}', valid domains are: orcestra, goes, surface_wind, water_vapour")]
    UnknownDomain(String),
}
