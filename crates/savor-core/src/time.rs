//! # Time Module
//!
//! Local time-of-day and opening-interval primitives.
//!
//! The engine is zone-naive: callers localize "now" to the restaurant's zone
//! and pass a `chrono::NaiveDateTime`. Weekdays are `chrono::Weekday`.
//!
//! ```text
//!   00:00          09:00                     17:00               23:59
//!     │──── closed ───[████████ open █████████)───── closed ────────│
//!                     ▲ inclusive             ▲ exclusive
//! ```

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ScheduleError;

const MINUTES_PER_DAY: u16 = 24 * 60;

// =============================================================================
// Time Of Day
// =============================================================================

/// A wall-clock time with minute precision, 00:00 through 23:59.
///
/// Stored as minutes since midnight; serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day, rejecting anything outside 00:00-23:59.
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::time::TimeOfDay;
    ///
    /// let t = TimeOfDay::new(9, 30).unwrap();
    /// assert_eq!(t.to_string(), "09:30");
    /// assert!(TimeOfDay::new(24, 0).is_err());
    /// ```
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTimeOfDay {
                value: format!("{:02}:{:02}", hour, minute),
            });
        }
        Ok(TimeOfDay(hour as u16 * 60 + minute as u16))
    }

    /// Midnight (00:00).
    #[inline]
    pub const fn midnight() -> Self {
        TimeOfDay(0)
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Minutes elapsed since midnight.
    #[inline]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    /// Time-of-day of a local instant. Seconds are truncated, so 16:59:59
    /// still reads as 16:59.
    #[inline]
    pub fn of_instant(instant: &NaiveDateTime) -> Self {
        TimeOfDay::from(instant.time())
    }

    /// Converts back to a chrono time (seconds = 0).
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        // hour() <= 23 and minute() <= 59 by construction
        TimeOfDay((time.hour() * 60 + time.minute()) as u16 % MINUTES_PER_DAY)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    /// Parses `"HH:MM"` (a single-digit hour such as `"9:00"` is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTimeOfDay {
            value: s.to_string(),
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&h.len()) || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Time Range
// =============================================================================

/// One open interval within a day: `[open, close)`.
///
/// ## Invariants
/// - `open < close` (no zero-length or cross-midnight ranges)
///
/// Values built with [`TimeRange::new`] always hold the invariant. Ranges that
/// arrive through deserialization are checked by
/// [`BusinessHours::validate`](crate::schedule::BusinessHours::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeRange {
    #[ts(as = "String")]
    pub open: TimeOfDay,
    #[ts(as = "String")]
    pub close: TimeOfDay,
}

impl TimeRange {
    /// Creates a range, rejecting `open >= close`.
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Result<Self, ScheduleError> {
        let range = TimeRange { open, close };
        range.check()?;
        Ok(range)
    }

    /// Convenience constructor from `"HH:MM"` strings.
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::time::TimeRange;
    ///
    /// let lunch = TimeRange::parse("11:30", "14:00").unwrap();
    /// assert_eq!(lunch.to_string(), "11:30-14:00");
    /// assert!(TimeRange::parse("14:00", "11:30").is_err());
    /// ```
    pub fn parse(open: &str, close: &str) -> Result<Self, ScheduleError> {
        TimeRange::new(open.parse()?, close.parse()?)
    }

    /// Returns an error when `open >= close`.
    pub fn check(&self) -> Result<(), ScheduleError> {
        if self.open >= self.close {
            return Err(ScheduleError::InvalidRange {
                open: self.open.to_string(),
                close: self.close.to_string(),
            });
        }
        Ok(())
    }

    /// Lower-inclusive, upper-exclusive membership test.
    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.open <= time && time < self.close
    }

    /// Two half-open ranges overlap when each starts before the other ends.
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.open < other.close && other.open < self.close
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.open, self.close)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(t("09:00").minutes_since_midnight(), 540);
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("23:59").to_string(), "23:59");

        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12:5".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_parse_rejects_signs_and_padding() {
        assert!("+9:00".parse::<TimeOfDay>().is_err());
        assert!("09:+5".parse::<TimeOfDay>().is_err());
        assert!(":00".parse::<TimeOfDay>().is_err());
        assert!("009:00".parse::<TimeOfDay>().is_err());
        assert!(serde_json::from_str::<TimeOfDay>("\"+9:00\"").is_err());
    }

    #[test]
    fn test_of_instant_truncates_seconds() {
        let instant = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(16, 59, 59)
            .unwrap();
        assert_eq!(TimeOfDay::of_instant(&instant), t("16:59"));
    }

    #[test]
    fn test_range_bounds() {
        let range = TimeRange::parse("09:00", "17:00").unwrap();
        assert!(range.contains(t("09:00")));
        assert!(range.contains(t("16:59")));
        assert!(!range.contains(t("17:00")));
        assert!(!range.contains(t("08:59")));
    }

    #[test]
    fn test_range_rejects_inverted_and_empty() {
        assert!(matches!(
            TimeRange::parse("17:00", "09:00"),
            Err(ScheduleError::InvalidRange { .. })
        ));
        assert!(TimeRange::parse("09:00", "09:00").is_err());
    }

    #[test]
    fn test_overlaps() {
        let morning = TimeRange::parse("08:00", "12:00").unwrap();
        let lunch = TimeRange::parse("11:00", "14:00").unwrap();
        let evening = TimeRange::parse("12:00", "22:00").unwrap();

        assert!(morning.overlaps(&lunch));
        // touching at 12:00 is not an overlap for half-open ranges
        assert!(!morning.overlaps(&evening));
    }

    #[test]
    fn test_serde_as_string() {
        let range = TimeRange::parse("11:30", "14:00").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"open":"11:30","close":"14:00"}"#);

        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);

        assert!(serde_json::from_str::<TimeRange>(r#"{"open":"25:00","close":"26:00"}"#).is_err());
    }
}
