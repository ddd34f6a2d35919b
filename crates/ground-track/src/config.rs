//! Configuration for ground-track segmentation.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackError};
use crate::segment::DEFAULT_GAP_SECONDS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Seconds between samples above which a new pass starts.
    pub gap_seconds: i64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            gap_seconds: DEFAULT_GAP_SECONDS,
        }
    }
}

impl TrackConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SATTRACK_GAP_SECONDS") {
            if let Ok(seconds) = val.parse() {
                config.gap_seconds = seconds;
            }
        }

        config
    }

    pub fn from_yaml_str(yaml: &str) -> AnyResult<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse track config")
    }

    pub fn load(path: &Path) -> AnyResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded track config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gap_seconds < 0 {
            return Err(TrackError::Config("gap_seconds must be >= 0".to_string()));
        }
        Ok(())
    }

    pub fn gap(&self) -> Duration {
        Duration::seconds(self.gap_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gap() {
        let config = TrackConfig::default();
        assert_eq!(config.gap(), Duration::seconds(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config = TrackConfig::from_yaml_str("gap_seconds: 45").unwrap();
        assert_eq!(config.gap_seconds, 45);
        assert_eq!(TrackConfig::from_yaml_str("{}").unwrap(), TrackConfig::default());
    }

    #[test]
    fn test_negative_gap_rejected() {
        let config = TrackConfig { gap_seconds: -1 };
        assert!(matches!(config.validate(), Err(TrackError::Config(_))));
    }
}
