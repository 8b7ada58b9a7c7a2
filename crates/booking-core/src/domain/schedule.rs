//! Weekly business-hours schedule.
//!
//! [`WeeklySchedule`] is the single record that decides which weekdays accept
//! appointments and during which hours.  It is persisted as JSON:
//!
//! ```json
//! {
//!   "daysOpen": {
//!     "monday": { "open": true, "start": "10:00", "end": "20:00" },
//!     "friday": { "open": false, "start": "10:00", "end": "20:00" }
//!   },
//!   "workingHours": { "start": "10:00", "end": "20:00", "daysOff": [5] }
//! }
//! ```
//!
//! # Invariants
//!
//! - `daysOpen` has exactly one entry per weekday.  [`DaysOpen`] has one field
//!   per day, so a missing or duplicated day cannot exist in memory; a stored
//!   record that omits a day gets that day's built-in default.
//! - `workingHours.daysOff` is derived from `daysOpen`.  Only
//!   [`WeeklySchedule::recompute_days_off`] writes it.
//! - Every open day has `start < end`, checked by [`WeeklySchedule::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time_of_day::TimeOfDay;
use super::weekday::Weekday;

/// Errors raised when a schedule violates its invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// An open day closes at or before it opens.
    #[error("{day}: opening time {start} must be earlier than closing time {end}")]
    InvalidWindow {
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_START: TimeOfDay = TimeOfDay::from_hm_const(10, 0);
const DEFAULT_END: TimeOfDay = TimeOfDay::from_hm_const(20, 0);

fn default_start() -> TimeOfDay {
    DEFAULT_START
}

fn default_end() -> TimeOfDay {
    DEFAULT_END
}

fn default_open_day() -> DayHours {
    DayHours {
        open: true,
        start: default_start(),
        end: default_end(),
    }
}

fn default_closed_day() -> DayHours {
    DayHours {
        open: false,
        ..default_open_day()
    }
}

// ── Schema types ──────────────────────────────────────────────────────────────

/// Opening flag and hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Per-weekday entries, serialized as a map keyed by lowercase day name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysOpen {
    #[serde(default = "default_open_day")]
    pub monday: DayHours,
    #[serde(default = "default_open_day")]
    pub tuesday: DayHours,
    #[serde(default = "default_open_day")]
    pub wednesday: DayHours,
    #[serde(default = "default_open_day")]
    pub thursday: DayHours,
    #[serde(default = "default_closed_day")]
    pub friday: DayHours,
    #[serde(default = "default_open_day")]
    pub saturday: DayHours,
    #[serde(default = "default_open_day")]
    pub sunday: DayHours,
}

impl DaysOpen {
    pub fn get(&self, day: Weekday) -> &DayHours {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut DayHours {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// Iterates `(day, hours)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }
}

impl Default for DaysOpen {
    /// Every day open 10:00–20:00 except Friday.
    fn default() -> Self {
        Self {
            monday: default_open_day(),
            tuesday: default_open_day(),
            wednesday: default_open_day(),
            thursday: default_open_day(),
            friday: default_closed_day(),
            saturday: default_open_day(),
            sunday: default_open_day(),
        }
    }
}

/// Shared opening window plus the derived list of closed day numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    #[serde(default = "default_start")]
    pub start: TimeOfDay,
    #[serde(default = "default_end")]
    pub end: TimeOfDay,
    /// Weekday numbers (`0 = Sunday`) whose `open` flag is `false`, ascending.
    #[serde(default)]
    pub days_off: Vec<u8>,
}

impl Default for WorkingHours {
    /// 10:00–20:00 with no days off.  `daysOff` is filled in by the owning
    /// [`WeeklySchedule`].
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            days_off: Vec::new(),
        }
    }
}

/// The full business-hours configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    #[serde(default)]
    pub days_open: DaysOpen,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        let mut schedule = Self {
            days_open: DaysOpen::default(),
            working_hours: WorkingHours::default(),
        };
        schedule.recompute_days_off();
        schedule
    }
}

impl WeeklySchedule {
    /// Entry for `day`.
    pub fn day(&self, day: Weekday) -> &DayHours {
        self.days_open.get(day)
    }

    pub fn is_open_on(&self, day: Weekday) -> bool {
        self.day(day).open
    }

    /// Flips the `open` flag of one weekday and refreshes `daysOff`.
    ///
    /// Returns the new `open` value.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        let entry = self.days_open.get_mut(day);
        entry.open = !entry.open;
        let open = entry.open;
        self.recompute_days_off();
        open
    }

    /// Sets the shared opening window.
    ///
    /// Per-day hours are untouched until [`WeeklySchedule::apply_shared_window`].
    pub fn set_window(&mut self, start: TimeOfDay, end: TimeOfDay) {
        self.working_hours.start = start;
        self.working_hours.end = end;
    }

    /// Copies the shared window into every weekday's `start`/`end`.
    ///
    /// This overwrites any distinct per-day hours, open or closed.
    pub fn apply_shared_window(&mut self) {
        let (start, end) = (self.working_hours.start, self.working_hours.end);
        for day in Weekday::ALL {
            let entry = self.days_open.get_mut(day);
            entry.start = start;
            entry.end = end;
        }
    }

    /// Day numbers whose `open` flag is `false`, in ascending order.
    pub fn derive_days_off(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self
            .days_open
            .iter()
            .filter(|(_, hours)| !hours.open)
            .map(|(day, _)| day.number())
            .collect();
        days.sort_unstable();
        days
    }

    /// Overwrites `workingHours.daysOff` from `daysOpen`.
    ///
    /// Returns `true` if the stored list differed.
    pub fn recompute_days_off(&mut self) -> bool {
        let derived = self.derive_days_off();
        let changed = derived != self.working_hours.days_off;
        self.working_hours.days_off = derived;
        changed
    }

    /// Checks that every open day closes after it opens.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWindow`] for the first offending day,
    /// Monday first.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for (day, hours) in self.days_open.iter() {
            if hours.open && hours.start >= hours.end {
                return Err(ScheduleError::InvalidWindow {
                    day,
                    start: hours.start,
                    end: hours.end,
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if the business is open on `day` at `time`.
    ///
    /// The window is half-open: the closing minute itself is not open.
    pub fn is_open_at(&self, day: Weekday, time: TimeOfDay) -> bool {
        let hours = self.day(day);
        hours.open && hours.start <= time && time < hours.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_schedule_closes_friday_only() {
        let schedule = WeeklySchedule::default();
        for (day, hours) in schedule.days_open.iter() {
            assert_eq!(hours.open, day != Weekday::Friday, "{day}");
            assert_eq!(hours.start, t("10:00"));
            assert_eq!(hours.end, t("20:00"));
        }
        assert_eq!(schedule.working_hours.days_off, vec![5]);
    }

    #[test]
    fn test_days_open_iter_yields_seven_distinct_days() {
        let schedule = WeeklySchedule::default();
        let days: Vec<Weekday> = schedule.days_open.iter().map(|(d, _)| d).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
    }

    // ── toggle_day ────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_day_opens_friday_and_updates_days_off() {
        let mut schedule = WeeklySchedule::default();
        assert!(schedule.toggle_day(Weekday::Friday));
        assert!(schedule.is_open_on(Weekday::Friday));
        assert!(schedule.working_hours.days_off.is_empty());
    }

    #[test]
    fn test_toggle_day_twice_restores_original() {
        let original = WeeklySchedule::default();
        let mut schedule = original.clone();
        schedule.toggle_day(Weekday::Friday);
        schedule.toggle_day(Weekday::Friday);
        assert_eq!(schedule, original);
    }

    #[test]
    fn test_days_off_sorted_with_sunday_first() {
        let mut schedule = WeeklySchedule::default();
        schedule.toggle_day(Weekday::Saturday);
        schedule.toggle_day(Weekday::Sunday);
        assert_eq!(schedule.working_hours.days_off, vec![0, 5, 6]);
    }

    // ── Shared window ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_window_does_not_touch_day_entries() {
        let mut schedule = WeeklySchedule::default();
        schedule.set_window(t("09:00"), t("17:00"));
        assert_eq!(schedule.day(Weekday::Monday).start, t("10:00"));
        assert_eq!(schedule.working_hours.start, t("09:00"));
    }

    #[test]
    fn test_apply_shared_window_overwrites_custom_day_hours() {
        let mut schedule = WeeklySchedule::default();
        schedule.days_open.tuesday.start = t("12:00");
        schedule.days_open.tuesday.end = t("14:00");
        schedule.set_window(t("09:00"), t("17:00"));

        schedule.apply_shared_window();

        for (_, hours) in schedule.days_open.iter() {
            assert_eq!((hours.start, hours.end), (t("09:00"), t("17:00")));
        }
    }

    // ── recompute / validate ──────────────────────────────────────────────────

    #[test]
    fn test_recompute_days_off_heals_desynced_list() {
        let mut schedule = WeeklySchedule::default();
        schedule.working_hours.days_off = vec![1, 2];
        assert!(schedule.recompute_days_off());
        assert_eq!(schedule.working_hours.days_off, vec![5]);
        assert!(!schedule.recompute_days_off());
    }

    #[test]
    fn test_validate_rejects_inverted_window_on_open_day() {
        let mut schedule = WeeklySchedule::default();
        schedule.days_open.monday.start = t("18:00");
        schedule.days_open.monday.end = t("09:00");
        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::InvalidWindow {
                day: Weekday::Monday,
                start: t("18:00"),
                end: t("09:00"),
            })
        );
    }

    #[test]
    fn test_validate_ignores_closed_days() {
        let mut schedule = WeeklySchedule::default();
        schedule.days_open.friday.start = t("20:00");
        schedule.days_open.friday.end = t("20:00");
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_is_open_at_uses_half_open_window() {
        let schedule = WeeklySchedule::default();
        assert!(schedule.is_open_at(Weekday::Monday, t("10:00")));
        assert!(schedule.is_open_at(Weekday::Monday, t("19:59")));
        assert!(!schedule.is_open_at(Weekday::Monday, t("20:00")));
        assert!(!schedule.is_open_at(Weekday::Friday, t("12:00")));
    }

    // ── JSON shape ────────────────────────────────────────────────────────────

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_value(WeeklySchedule::default()).unwrap();
        assert_eq!(json["daysOpen"]["friday"]["open"], false);
        assert_eq!(json["daysOpen"]["monday"]["start"], "10:00");
        assert_eq!(json["workingHours"]["daysOff"], serde_json::json!([5]));
    }

    #[test]
    fn test_missing_days_fall_back_to_defaults() {
        let json = r#"{
            "daysOpen": { "monday": { "open": false, "start": "09:00", "end": "17:00" } },
            "workingHours": { "start": "09:00", "end": "17:00", "daysOff": [1] }
        }"#;
        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();
        assert!(!schedule.is_open_on(Weekday::Monday));
        assert!(!schedule.is_open_on(Weekday::Friday));
        assert!(schedule.is_open_on(Weekday::Sunday));
    }

    #[test]
    fn test_missing_working_hours_keeps_stored_days() {
        let json = r#"{
            "daysOpen": {
                "monday": { "open": false, "start": "10:00", "end": "20:00" },
                "friday": { "open": true, "start": "10:00", "end": "20:00" }
            }
        }"#;

        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();

        assert!(!schedule.is_open_on(Weekday::Monday));
        assert!(schedule.is_open_on(Weekday::Friday));
        assert_eq!(schedule.working_hours.start, t("10:00"));
        assert_eq!(schedule.working_hours.end, t("20:00"));
    }
}
