//! Lifecycle dates and process flags of a bulletin.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::reading::Reading;

/// A date entered on the bulletin form.
///
/// Forms supply plain days, naive timestamps or full RFC 3339 instants. All of
/// them reduce to a calendar day in the reference timezone via [`SampleDate::day_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDate {
    Day(NaiveDate),
    /// Wall-clock time, interpreted in the reference timezone.
    Local(NaiveDateTime),
    Instant(DateTime<FixedOffset>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDateError(String);

impl fmt::Display for SampleDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid date '{}': expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339",
            self.0
        )
    }
}

impl std::error::Error for SampleDateError {}

impl SampleDate {
    /// Start-of-day in the given reference timezone.
    pub fn day_in(&self, offset: FixedOffset) -> NaiveDate {
        match self {
            SampleDate::Day(day) => *day,
            SampleDate::Local(dt) => dt.date(),
            SampleDate::Instant(dt) => dt.with_timezone(&offset).date_naive(),
        }
    }
}

impl From<NaiveDate> for SampleDate {
    fn from(day: NaiveDate) -> Self {
        SampleDate::Day(day)
    }
}

impl From<DateTime<FixedOffset>> for SampleDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        SampleDate::Instant(dt)
    }
}

impl FromStr for SampleDate {
    type Err = SampleDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(SampleDate::Instant(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Ok(SampleDate::Local(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(SampleDate::Local(dt));
        }
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(SampleDate::Day(day));
        }
        Err(SampleDateError(trimmed.to_string()))
    }
}

impl fmt::Display for SampleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleDate::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            SampleDate::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            SampleDate::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for SampleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SampleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Dates of the bulletin lifecycle, filled in as each one becomes known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_receipt: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_analysis: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulletin_issue: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_receipt: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<SampleDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_review: Option<SampleDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    #[default]
    Normal,
    /// Results implemented without the critical review step.
    WithoutValidation,
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessType::Normal => write!(f, "normal"),
            ProcessType::WithoutValidation => write!(f, "without validation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalDecision {
    Validated,
    ValidatedWithRestrictions,
    NotValidated,
}

/// Line conditions at the sampling point, used for AGA-8 method selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingConditions {
    /// Absolute pressure, kPa.
    #[serde(default)]
    pub pressure_kpa: Reading,
    /// Temperature, °C.
    #[serde(default)]
    pub temperature_c: Reading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert!(matches!(
            "2024-03-01".parse::<SampleDate>(),
            Ok(SampleDate::Day(_))
        ));
        assert!(matches!(
            "2024-03-01T10:00:00".parse::<SampleDate>(),
            Ok(SampleDate::Local(_))
        ));
        assert!(matches!(
            "2024-03-01T10:00:00Z".parse::<SampleDate>(),
            Ok(SampleDate::Instant(_))
        ));
        assert!("01/03/2024".parse::<SampleDate>().is_err());
    }

    #[test]
    fn test_instant_normalizes_to_reference_day() {
        // 01:30 UTC on the 2nd is still the 1st in UTC-3.
        let date: SampleDate = "2024-03-02T01:30:00Z".parse().unwrap();
        assert_eq!(
            date.day_in(brt()),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            date.day_in(FixedOffset::east_opt(0).unwrap()),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_local_time_keeps_its_day() {
        let date: SampleDate = "2024-03-02T23:59:00".parse().unwrap();
        assert_eq!(
            date.day_in(brt()),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }
}
