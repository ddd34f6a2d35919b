//! Error types for forecast acquisition.

use chrono::NaiveDateTime;
use thiserror::Error;

use briefing_common::RunId;

use crate::types::Product;

/// Errors that can occur while acquiring and aligning forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// One specific run has no published data.
    #[error("{product} run {run} is not available")]
    RunUnavailable { product: Product, run: RunId },

    /// The fallback walk over earlier runs found nothing.
    #[error("no {product} forecast available: tried {attempts} runs back from {candidate}")]
    NoForecastAvailable {
        product: Product,
        candidate: RunId,
        attempts: u32,
    },

    /// A cumulative field without any time step.
    #[error("field '{0}' has no time steps")]
    EmptyField(String),

    /// Differentiation requested on a field that does not accumulate.
    #[error("field '{0}' is not a cumulative field")]
    NotCumulative(String),

    /// Valid times are not strictly increasing after the run start.
    #[error("invalid time axis for field '{field}': {message}")]
    InvalidTimeAxis { field: String, message: String },

    /// Values do not line up with the cell coordinates.
    #[error("invalid shape for field '{field}': {message}")]
    InvalidShape { field: String, message: String },

    #[error("field '{variable}' not found in {product} run {run}")]
    FieldNotFound {
        variable: String,
        product: Product,
        run: RunId,
    },

    #[error("valid time {valid_time} not found in field '{variable}' of run {run}")]
    ValidTimeNotFound {
        variable: String,
        run: RunId,
        valid_time: NaiveDateTime,
    },

    /// The dataset source failed for a reason other than a missing run.
    #[error("dataset source error: {0}")]
    Source(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ForecastError {
    /// Create an InvalidTimeAxis error.
    pub fn invalid_time_axis(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTimeAxis {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidShape error.
    pub fn invalid_shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Only a missing run is recovered locally (by stepping back a cycle).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RunUnavailable { .. })
    }

    /// Whether the fallback over earlier runs was exhausted.
    pub fn is_no_forecast(&self) -> bool {
        matches!(self, Self::NoForecastAvailable { .. })
    }

    /// Errors caused by the request or by a data-contract violation.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyField(_)
                | Self::NotCumulative(_)
                | Self::InvalidTimeAxis { .. }
                | Self::InvalidShape { .. }
                | Self::FieldNotFound { .. }
                | Self::ValidTimeNotFound { .. }
        )
    }
}

/// Result type for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;
