//! Wall-clock slot time
//!
//! The calendar works on local wall-clock minutes, no timezone handling.
//! A slot is a 15-minute boundary rendered as `"HH:MM"`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Slot granularity in minutes
pub const SLOT_MINUTES: u16 = 15;

/// First renderable slot of the calendar day (06:00)
pub const DAY_START: SlotTime = SlotTime(6 * 60);

/// End of the calendar day (22:00, exclusive)
pub const DAY_END: SlotTime = SlotTime(22 * 60);

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Invalid time-of-day string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day '{0}', expected HH:MM")]
pub struct InvalidSlotTime(pub String);

/// Minute of the day, `0..=1440`
///
/// `24:00` is accepted so that a schedule ending at midnight can be
/// expressed as an exclusive end bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(u16);

impl SlotTime {
    pub const MIDNIGHT: SlotTime = SlotTime(0);
    /// `24:00`, the exclusive end of a calendar day
    pub const END_OF_DAY: SlotTime = SlotTime(MINUTES_PER_DAY);

    /// Build from hour and minute
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Time of day of a timestamp, seconds dropped
    pub fn of(datetime: &NaiveDateTime) -> Self {
        Self::from(datetime.time())
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Whether this time sits on a slot boundary
    pub fn is_slot_boundary(self) -> bool {
        self.0 % SLOT_MINUTES == 0
    }

    /// Round down to the enclosing slot boundary
    pub fn floor_to_slot(self) -> Self {
        Self(self.0 - self.0 % SLOT_MINUTES)
    }

    /// Add minutes, `None` past the end of the day
    pub fn add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }

    /// Minutes from `earlier` to `self`, negative when `self` is earlier
    pub fn minutes_since(self, earlier: SlotTime) -> i32 {
        i32::from(self.0) - i32::from(earlier.0)
    }

    /// The next slot boundary after this one
    pub fn next_slot(self) -> Option<Self> {
        self.floor_to_slot().add_minutes(u32::from(SLOT_MINUTES))
    }

    /// Convert back to a chrono time; `24:00` saturates to `23:59:59`
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
    }

    /// Combine with a date into a timestamp
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl From<NaiveTime> for SlotTime {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = InvalidSlotTime;

    /// Accepts `HH:MM` and the backend's `HH:MM:SS` (seconds ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSlotTime(s.to_string());
        let mut parts = s.trim().split(':');

        let hour: u16 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u16 = parts
            .next()
            .filter(|m| m.len() == 2)
            .and_then(|m| m.parse().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next()
            && seconds.parse::<u16>().map_or(true, |sec| sec >= 60)
        {
            return Err(invalid());
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Every slot boundary in `[start, end)`
///
/// A start that is not on a boundary is rounded up to the next one.
pub fn slots_between(start: SlotTime, end: SlotTime) -> impl Iterator<Item = SlotTime> {
    let first = if start.is_slot_boundary() {
        start.0
    } else {
        start.0 - start.0 % SLOT_MINUTES + SLOT_MINUTES
    };
    (first..end.0)
        .step_by(usize::from(SLOT_MINUTES))
        .map(SlotTime)
}

/// All slots of the renderable day, `06:00..22:00`
pub fn day_slots() -> impl Iterator<Item = SlotTime> {
    slots_between(DAY_START, DAY_END)
}

/// Day of week with Sunday = 0 .. Saturday = 6
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
}
