//! # Schedule Resolver
//!
//! Answers "is this restaurant open at this local instant?".
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_open_at(hours, instant)                                             │
//! │                                                                         │
//! │  special_hours for instant.date()?                                      │
//! │     ├── yes, closed ─────────────────────────────────► CLOSED           │
//! │     ├── yes, own ranges ──► test time against them ──► OPEN / CLOSED    │
//! │     └── no ──► weekday ranges (empty = closed all day)                  │
//! │                   └── open <= time < close for any? ─► OPEN / CLOSED    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver never reads the clock: "now" is an argument, already
//! localized to the restaurant's zone by the caller.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::error::ScheduleError;
use crate::time::{TimeOfDay, TimeRange};

/// How many days past the instant's own date `next_opening` looks ahead.
pub const NEXT_OPENING_HORIZON_DAYS: i64 = 7;

// =============================================================================
// Special Hours
// =============================================================================

/// A one-day override of the weekly schedule (holiday, private event).
///
/// When `date` matches the evaluation date it replaces that day's weekday
/// ranges entirely. `closed` wins over any `hours` listed alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpecialHours {
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub hours: Vec<TimeRange>,
}

impl SpecialHours {
    /// Closed for the whole of `date`.
    pub fn closed_on(date: NaiveDate) -> Self {
        SpecialHours {
            date,
            closed: true,
            hours: Vec::new(),
        }
    }

    /// Open only during `hours` on `date`.
    pub fn hours_on(date: NaiveDate, hours: Vec<TimeRange>) -> Self {
        SpecialHours {
            date,
            closed: false,
            hours,
        }
    }

    #[inline]
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

// =============================================================================
// Business Hours
// =============================================================================

/// A restaurant's weekly opening hours plus an optional special-day override.
///
/// ## Invariants (checked by [`BusinessHours::validate`])
/// - every range has `open < close`
/// - ranges within one day do not overlap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    #[serde(default)]
    pub monday: Vec<TimeRange>,
    #[serde(default)]
    pub tuesday: Vec<TimeRange>,
    #[serde(default)]
    pub wednesday: Vec<TimeRange>,
    #[serde(default)]
    pub thursday: Vec<TimeRange>,
    #[serde(default)]
    pub friday: Vec<TimeRange>,
    #[serde(default)]
    pub saturday: Vec<TimeRange>,
    #[serde(default)]
    pub sunday: Vec<TimeRange>,
    #[serde(default)]
    pub special_hours: Option<SpecialHours>,
}

impl BusinessHours {
    /// Decodes a JSON document and validates it.
    ///
    /// This is the load-time gate: a record that comes out of here is safe to
    /// hand to [`is_open_at`].
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        let hours: BusinessHours = serde_json::from_str(json)?;
        hours.validate()?;
        Ok(hours)
    }

    /// Same ranges every day of the week.
    pub fn every_day(ranges: Vec<TimeRange>) -> Self {
        let mut hours = BusinessHours::default();
        for day in ALL_WEEKDAYS {
            *hours.day_mut(day) = ranges.clone();
        }
        hours
    }

    /// Replaces one weekday's ranges.
    pub fn with_day(mut self, day: Weekday, ranges: Vec<TimeRange>) -> Self {
        *self.day_mut(day) = ranges;
        self
    }

    pub fn with_special_hours(mut self, special: SpecialHours) -> Self {
        self.special_hours = Some(special);
        self
    }

    /// The regular ranges for a weekday, ignoring special hours.
    pub fn ranges_for(&self, day: Weekday) -> &[TimeRange] {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn day_mut(&mut self, day: Weekday) -> &mut Vec<TimeRange> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Checks every day and the special override; first problem wins.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for day in ALL_WEEKDAYS {
            validate_day(&weekday_name(day), self.ranges_for(day))?;
        }
        if let Some(special) = &self.special_hours {
            validate_day(&special.date.to_string(), &special.hours)?;
        }
        Ok(())
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> String {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
    .to_string()
}

fn validate_day(label: &str, ranges: &[TimeRange]) -> Result<(), ScheduleError> {
    for range in ranges {
        if range.check().is_err() {
            return Err(ScheduleError::InvalidDayRange {
                day: label.to_string(),
                open: range.open.to_string(),
                close: range.close.to_string(),
            });
        }
    }

    // Sorted by open time, only neighbours can overlap.
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.open);
    for pair in sorted.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(ScheduleError::OverlappingRanges {
                day: label.to_string(),
                first: pair[0].to_string(),
                second: pair[1].to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Resolution
// =============================================================================

/// The ranges that govern `date` once special hours are applied.
///
/// Empty means closed all day.
pub fn effective_ranges(hours: &BusinessHours, date: NaiveDate) -> &[TimeRange] {
    if let Some(special) = hours.special_hours.as_ref().filter(|s| s.applies_to(date)) {
        if special.closed {
            return &[];
        }
        return &special.hours;
    }
    hours.ranges_for(date.weekday())
}

/// Is the restaurant open at `instant`?
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use savor_core::schedule::{is_open_at, BusinessHours};
/// use savor_core::time::TimeRange;
///
/// let hours = BusinessHours::every_day(vec![TimeRange::parse("09:00", "17:00").unwrap()]);
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
///
/// assert!(is_open_at(&hours, day.and_hms_opt(9, 0, 0).unwrap()));
/// assert!(!is_open_at(&hours, day.and_hms_opt(17, 0, 0).unwrap()));
/// ```
pub fn is_open_at(hours: &BusinessHours, instant: NaiveDateTime) -> bool {
    let date = instant.date();
    let time = TimeOfDay::of_instant(&instant);

    if let Some(special) = hours.special_hours.as_ref().filter(|s| s.applies_to(date)) {
        if special.closed {
            debug!(%date, "Special hours: closed all day");
            return false;
        }
        let open = special.hours.iter().any(|r| r.contains(time));
        trace!(%date, %time, open, "Resolved against special hours");
        return open;
    }

    let weekday = date.weekday();
    let open = hours.ranges_for(weekday).iter().any(|r| r.contains(time));
    trace!(%weekday, %time, open, "Resolved against weekday hours");
    open
}

/// Earliest instant at or after `instant` when the restaurant is open.
///
/// Returns `instant` itself if already open. Looks at the rest of today and
/// the next [`NEXT_OPENING_HORIZON_DAYS`] days; `None` if nothing opens in
/// that window.
pub fn next_opening(hours: &BusinessHours, instant: NaiveDateTime) -> Option<NaiveDateTime> {
    if is_open_at(hours, instant) {
        return Some(instant);
    }

    let today = instant.date();
    let now = TimeOfDay::of_instant(&instant);

    (0..=NEXT_OPENING_HORIZON_DAYS).find_map(|offset| {
        let date = today + Duration::days(offset);
        effective_ranges(hours, date)
            .iter()
            .map(|r| r.open)
            .filter(|open| offset > 0 || *open > now)
            .min()
            .map(|open| date.and_time(open.to_naive_time()))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
