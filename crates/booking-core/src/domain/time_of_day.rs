//! Minute-granularity wall-clock time.
//!
//! A [`TimeOfDay`] is stored as minutes since midnight (`0..1440`).  The
//! canonical text form, used for persistence and on the wire, is 24-hour
//! `"HH:MM"`.  The dashboard shows the 12-hour form (`"8:05 PM"`), produced by
//! [`TimeOfDay::to_12_hour`] and parsed back by [`TimeOfDay::parse_12_hour`].
//!
//! Seconds are never stored.  Conversion to and from `chrono::NaiveTime`
//! truncates them, so two times that render the same compare equal.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when a string is not a valid time of day.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeParseError {
    /// The text does not have the expected `HH:MM` (or `h:MM AM`) shape.
    #[error("invalid time format '{0}': expected HH:MM")]
    Format(String),

    /// Hours or minutes are out of range.
    #[error("time out of range: '{0}'")]
    OutOfRange(String),
}

/// A wall-clock time with minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay::from_hm_const(0, 0);

    /// Compile-time constructor for fixed times such as default opening hours.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `minute >= 60`.  In a `const` item that
    /// panic is a compile error.
    pub const fn from_hm_const(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self {
            minutes: hour as u16 * 60 + minute as u16,
        }
    }

    /// Builds a time from hour (`0..24`) and minute (`0..60`).
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError::OutOfRange`] for an invalid hour or minute.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeParseError> {
        if hour >= 24 || minute >= 60 {
            return Err(TimeParseError::OutOfRange(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    /// Builds a time from minutes since midnight.
    ///
    /// Returns `None` when `minutes` does not fall inside a single day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self { minutes })
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Adds `minutes`, returning `None` if the result passes midnight.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        self.minutes
            .checked_add(minutes)
            .and_then(Self::from_minutes)
    }

    /// Formats as 12-hour clock text, e.g. `"10:00 AM"`, `"12:30 PM"`.
    pub fn to_12_hour(self) -> String {
        let hour = self.hour();
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{display_hour}:{:02} {suffix}", self.minute())
    }

    /// Parses 12-hour clock text such as `"9:30 am"` or `"12:00 PM"`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError`] if the text is malformed or out of range.
    pub fn parse_12_hour(text: &str) -> Result<Self, TimeParseError> {
        let trimmed = text.trim();
        let (clock, suffix) = trimmed
            .rsplit_once(' ')
            .ok_or_else(|| TimeParseError::Format(text.to_string()))?;
        let is_pm = match suffix.to_ascii_uppercase().as_str() {
            "AM" => false,
            "PM" => true,
            _ => return Err(TimeParseError::Format(text.to_string())),
        };
        let (hour, minute) = split_clock(clock.trim(), text)?;
        if !(1..=12).contains(&hour) {
            return Err(TimeParseError::OutOfRange(text.to_string()));
        }
        let hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Self::new(hour, minute).map_err(|_| TimeParseError::OutOfRange(text.to_string()))
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + Duration::minutes(i64::from(self.minutes))
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds.
    fn from(time: NaiveTime) -> Self {
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }
}

fn split_clock(clock: &str, original: &str) -> Result<(u8, u8), TimeParseError> {
    let (h, m) = clock
        .split_once(':')
        .ok_or_else(|| TimeParseError::Format(original.to_string()))?;
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
        return Err(TimeParseError::Format(original.to_string()));
    }
    let hour = h
        .parse::<u8>()
        .map_err(|_| TimeParseError::Format(original.to_string()))?;
    let minute = m
        .parse::<u8>()
        .map_err(|_| TimeParseError::Format(original.to_string()))?;
    Ok((hour, minute))
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Parses the canonical 24-hour `HH:MM` form (a single-digit hour is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = split_clock(s.trim(), s)?;
        Self::new(hour, minute).map_err(|_| TimeParseError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
