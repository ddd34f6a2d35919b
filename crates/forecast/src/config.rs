//! Configuration for forecast acquisition.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ForecastError, Result};

/// What to do when one of several historical runs has no forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMissing {
    /// Hand the error to the consumer and keep going.
    #[default]
    Yield,
    /// Drop the run (a warning is recorded) and keep going.
    Skip,
    /// Hand the error to the consumer and end the sequence.
    Abort,
}

impl OnMissing {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yield" | "propagate" => Some(Self::Yield),
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Configuration for resolving and fetching forecast runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Hours between successive model runs.
    pub publish_cadence_hours: u32,

    /// Hours between a run's initialization and its data becoming queryable.
    ///
    /// Operational values have been observed anywhere between 6 and 9 hours,
    /// so this is set per deployment.
    pub publish_lag_hours: u32,

    /// Runs tried by the fallback walk, counting the first.
    pub max_attempts: u32,

    /// Policy for historical runs without a forecast.
    pub on_missing: OnMissing,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            publish_cadence_hours: 12,
            publish_lag_hours: 0,
            max_attempts: 6,
            on_missing: OnMissing::Yield,
        }
    }
}

impl ForecastConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("FORECAST_PUBLISH_CADENCE_HOURS") {
            if let Ok(hours) = val.parse() {
                config.publish_cadence_hours = hours;
            }
        }

        if let Ok(val) = std::env::var("FORECAST_PUBLISH_LAG_HOURS") {
            if let Ok(hours) = val.parse() {
                config.publish_lag_hours = hours;
            }
        }

        if let Ok(val) = std::env::var("FORECAST_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                config.max_attempts = attempts;
            }
        }

        if let Ok(val) = std::env::var("FORECAST_ON_MISSING") {
            if let Some(policy) = OnMissing::from_str(&val) {
                config.on_missing = policy;
            }
        }

        config
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> AnyResult<Self> {
        let config: ForecastConfig =
            serde_yaml::from_str(yaml).context("Failed to parse forecast config")?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> AnyResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded forecast config");
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.publish_cadence_hours == 0 {
            return Err(ForecastError::config("publish_cadence_hours must be > 0"));
        }

        if self.max_attempts == 0 {
            return Err(ForecastError::config("max_attempts must be > 0"));
        }

        Ok(())
    }
}
