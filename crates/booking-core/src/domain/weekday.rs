//! Weekday names and numbering used by the business-hours record.
//!
//! Two conventions meet here:
//!
//! - The `daysOpen` map is keyed by lowercase English names (`"monday"`).
//! - The derived `daysOff` list uses JavaScript-style day numbers, where
//!   `0 = Sunday` and `6 = Saturday`.
//!
//! [`Weekday`] converts between both and `chrono::Weekday`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text or a number does not name a weekday.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeekdayParseError {
    #[error("unknown weekday '{0}'")]
    UnknownName(String),
    #[error("weekday number {0} out of range (0=Sunday..6=Saturday)")]
    NumberOutOfRange(u8),
}

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in the order the settings screen lists them (Monday first).
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase English name, as used for `daysOpen` keys.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Day number with `0 = Sunday` .. `6 = Saturday`.
    pub fn number(self) -> u8 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    /// Inverse of [`Weekday::number`].
    ///
    /// # Errors
    ///
    /// Returns [`WeekdayParseError::NumberOutOfRange`] for numbers above 6.
    pub fn from_number(number: u8) -> Result<Self, WeekdayParseError> {
        match number {
            0 => Ok(Weekday::Sunday),
            1 => Ok(Weekday::Monday),
            2 => Ok(Weekday::Tuesday),
            3 => Ok(Weekday::Wednesday),
            4 => Ok(Weekday::Thursday),
            5 => Ok(Weekday::Friday),
            6 => Ok(Weekday::Saturday),
            n => Err(WeekdayParseError::NumberOutOfRange(n)),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl FromStr for Weekday {
    type Err = WeekdayParseError;

    /// Case-insensitive full name (`"Friday"`) or three-letter form (`"fri"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == lower || (lower.len() == 3 && day.name().starts_with(&lower)))
            .ok_or_else(|| WeekdayParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
