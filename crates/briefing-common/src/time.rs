//! Time handling utilities for forecast briefings.
//!
//! Briefing and wall-clock times are timezone-aware (`DateTime<Utc>`), while
//! model runs are identified by naive UTC instants because the forecast
//! catalogs are keyed without a timezone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

/// Truncate an instant down to a multiple of `cadence_hours` since the Unix epoch.
///
/// Because the epoch starts at 00:00 UTC, a 12 hour cadence lands on the
/// 00Z and 12Z cycles. Sub-second precision is dropped. A zero cadence leaves
/// the instant untouched.
pub fn floor_to_cadence(instant: DateTime<Utc>, cadence_hours: u32) -> DateTime<Utc> {
    if cadence_hours == 0 {
        return instant;
    }
    let cadence_secs = i64::from(cadence_hours) * 3600;
    let offset = instant.timestamp().rem_euclid(cadence_secs);
    instant
        - Duration::seconds(offset)
        - Duration::nanoseconds(i64::from(instant.nanosecond()))
}

/// Instant a briefing product applies to: briefing time plus lead offset.
pub fn valid_time(briefing_time: DateTime<Utc>, lead: LeadOffset) -> DateTime<Utc> {
    briefing_time + lead.duration()
}

/// Hours after the briefing time that a forecast value is valid for.
///
/// Parsed from labels like `"036h"`, `"108H"` or `"12H"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeadOffset {
    hours: u32,
}

impl LeadOffset {
    pub fn from_hours(hours: u32) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(i64::from(self.hours))
    }
}

impl FromStr for LeadOffset {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('h')
            .or_else(|| trimmed.strip_suffix('H'))
            .ok_or_else(|| TimeParseError::InvalidLeadOffset(s.to_string()))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeParseError::InvalidLeadOffset(s.to_string()));
        }

        let hours = digits
            .parse()
            .map_err(|_| TimeParseError::InvalidLeadOffset(s.to_string()))?;
        Ok(Self { hours })
    }
}

impl fmt::Display for LeadOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}h", self.hours)
    }
}

/// Identifier of one numerical weather prediction run (its initialization time).
///
/// Runs are normally derived by the issue-time resolver and the store's
/// fallback walk rather than built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(NaiveDateTime);

impl RunId {
    pub fn new(init_time: NaiveDateTime) -> Self {
        Self(init_time)
    }

    /// Run initialized at the given UTC instant.
    pub fn from_utc(init_time: DateTime<Utc>) -> Self {
        Self(init_time.naive_utc())
    }

    pub fn init_time(&self) -> NaiveDateTime {
        self.0
    }

    /// Initialization time interpreted as UTC.
    pub fn init_time_utc(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }

    /// Run initialized `hours` earlier.
    pub fn earlier_by(&self, hours: u32) -> Self {
        Self(self.0 - Duration::hours(i64::from(hours)))
    }

    /// Whether the initialization time sits on a cycle of the given cadence.
    pub fn is_aligned(&self, cadence_hours: u32) -> bool {
        floor_to_cadence(self.init_time_utc(), cadence_hours) == self.init_time_utc()
    }

    /// Catalog reference date, e.g. `2024-08-07`.
    pub fn refdate(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Catalog reference hour, e.g. `12`.
    pub fn reftime(&self) -> String {
        self.0.format("%H").to_string()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%HUTC"))
    }
}

/// Unit used as the denominator when turning accumulations into rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Per second (e.g. J/m² → W/m²).
    #[default]
    Seconds,
    Hours,
    /// Per day (e.g. m → m/day).
    Days,
}

impl TimeUnit {
    /// Length of `duration` expressed in this unit.
    pub fn count(&self, duration: Duration) -> f64 {
        let secs = duration.num_milliseconds() as f64 / 1000.0;
        match self {
            TimeUnit::Seconds => secs,
            TimeUnit::Hours => secs / 3600.0,
            TimeUnit::Days => secs / 86_400.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "day",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "s" | "S" => Ok(TimeUnit::Seconds),
            "h" | "H" => Ok(TimeUnit::Hours),
            "d" | "D" => Ok(TimeUnit::Days),
            other => match other.to_lowercase().as_str() {
                "seconds" | "second" | "sec" => Ok(TimeUnit::Seconds),
                "hours" | "hour" => Ok(TimeUnit::Hours),
                "days" | "day" => Ok(TimeUnit::Days),
                _ => Err(TimeParseError::InvalidUnit(s.to_string())),
            },
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_floor_to_twelve_hours() {
        let t = utc(2024, 8, 7, 17, 42, 13);
        assert_eq!(floor_to_cadence(t, 12), utc(2024, 8, 7, 12, 0, 0));

        let t = utc(2024, 8, 7, 11, 59, 59);
        assert_eq!(floor_to_cadence(t, 12), utc(2024, 8, 7, 0, 0, 0));
    }

    #[test]
    fn test_floor_keeps_aligned_instant() {
        let t = utc(2024, 8, 7, 12, 0, 0);
        assert_eq!(floor_to_cadence(t, 12), t);
    }

    #[test]
    fn test_floor_drops_subseconds() {
        let t = utc(2024, 8, 7, 12, 0, 0) + Duration::milliseconds(250);
        assert_eq!(floor_to_cadence(t, 12), utc(2024, 8, 7, 12, 0, 0));
    }

    #[test]
    fn test_floor_before_epoch() {
        let t = utc(1969, 12, 31, 13, 0, 0);
        assert_eq!(floor_to_cadence(t, 12), utc(1969, 12, 31, 12, 0, 0));
    }

    #[test]
    fn test_floor_zero_cadence() {
        let t = utc(2024, 8, 7, 17, 42, 13);
        assert_eq!(floor_to_cadence(t, 0), t);
    }

    #[test]
    fn test_valid_time() {
        let briefing = utc(2024, 8, 7, 0, 0, 0);
        let lead: LeadOffset = "036h".parse().unwrap();
        assert_eq!(valid_time(briefing, lead), utc(2024, 8, 8, 12, 0, 0));
    }

    #[test]
    fn test_parse_lead_offset() {
        assert_eq!("036h".parse::<LeadOffset>().unwrap().hours(), 36);
        assert_eq!("108H".parse::<LeadOffset>().unwrap().hours(), 108);
        assert_eq!("000h".parse::<LeadOffset>().unwrap().hours(), 0);
        assert!("36".parse::<LeadOffset>().is_err());
        assert!("h".parse::<LeadOffset>().is_err());
        assert!("-12h".parse::<LeadOffset>().is_err());
        assert!("1.5h".parse::<LeadOffset>().is_err());
    }

    #[test]
    fn test_lead_offset_display() {
        assert_eq!(LeadOffset::from_hours(12).to_string(), "012h");
        assert_eq!(LeadOffset::from_hours(108).to_string(), "108h");
    }

    #[test]
    fn test_run_id_format() {
        let run = RunId::from_utc(utc(2024, 8, 7, 12, 0, 0));
        assert_eq!(run.to_string(), "2024-08-07T12UTC");
        assert_eq!(run.refdate(), "2024-08-07");
        assert_eq!(run.reftime(), "12");
        assert!(run.is_aligned(12));
        assert!(!RunId::from_utc(utc(2024, 8, 7, 6, 0, 0)).is_aligned(12));
    }

    #[test]
    fn test_run_id_earlier_by() {
        let run = RunId::from_utc(utc(2024, 8, 7, 0, 0, 0));
        assert_eq!(run.earlier_by(12), RunId::from_utc(utc(2024, 8, 6, 12, 0, 0)));
    }

    #[test]
    fn test_time_unit_count() {
        let d = Duration::hours(6);
        assert_eq!(TimeUnit::Seconds.count(d), 21_600.0);
        assert_eq!(TimeUnit::Hours.count(d), 6.0);
        assert_eq!(TimeUnit::Days.count(d), 0.25);
    }

    #[test]
    fn test_parse_time_unit() {
        assert_eq!("s".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert_eq!("D".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!("Hours".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
        assert!("fortnight".parse::<TimeUnit>().is_err());
    }
}
