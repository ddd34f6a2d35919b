//! Common test fixtures for briefing tests.
//!
//! Pre-defined values that represent common scenarios of the field campaign
//! the briefings were produced for.

/// Map extents as (min_lon, min_lat, max_lon, max_lat).
pub mod bbox {
    /// Integrated water vapour map extent.
    pub const WATER_VAPOUR: (f64, f64, f64, f64) = (-70.0, -25.0, 0.0, 25.0);

    /// Default campaign map extent.
    pub const ORCESTRA: (f64, f64, f64, f64) = (-65.0, -10.0, -5.0, 25.0);
}

/// Ground stations as (lat, lon).
pub mod locations {
    pub const SAL: (f64, f64) = (16.73883, -22.942);
    pub const BARBADOS: (f64, f64) = (13.075418, -59.493768);
}

/// Common time values for testing.
pub mod time {
    /// Briefing at 00Z.
    pub const BRIEFING_TIME: &str = "2024-08-07T00:00:00Z";

    /// Generation well after the briefing (re-running a past briefing).
    pub const LATE_CURRENT_TIME: &str = "2024-08-15T00:00:00Z";

    /// Generation the evening before the briefing.
    pub const EARLY_CURRENT_TIME: &str = "2024-08-06T17:45:00Z";

    /// Lead-time labels rendered for every internal figure.
    pub const LEAD_LABELS: [&str; 6] = ["000h", "012h", "036h", "060h", "084h", "108h"];

    /// Hours between model runs.
    pub const PUBLISH_CADENCE_HOURS: u32 = 12;

    /// Publish lags seen across deployments.
    pub const OBSERVED_PUBLISH_LAGS: [u32; 3] = [6, 8, 9];
}

/// Catalog variable codes.
pub mod variables {
    /// Total column water vapour (instantaneous).
    pub const TCWV: &str = "tcwv";

    /// Total precipitation (accumulated, m).
    pub const TP: &str = "tp";

    /// Top net thermal radiation (accumulated, J m**-2).
    pub const TTR: &str = "ttr";

    /// 10 m wind components.
    pub const U10: &str = "10u";
    pub const V10: &str = "10v";
}

/// Satellites with ground tracks.
pub mod satellites {
    pub const EARTHCARE: &str = "EARTHCARE";

    /// Gap above which consecutive track samples belong to different passes.
    pub const PASS_GAP_SECONDS: i64 = 20;
}

/// Parse a fixture timestamp.
pub fn parse_utc(s: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|e| panic!("invalid fixture time '{s}': {e}"))
}
