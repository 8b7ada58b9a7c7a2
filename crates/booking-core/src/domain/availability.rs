//! Bookable-slot computation for the calendar and service-availability views.
//!
//! Given a [`WeeklySchedule`], a date and an appointment length, the functions
//! here list every start time at which the appointment fits entirely inside
//! the day's opening window.
//!
//! ```text
//!   start 10:00                                   end 20:00
//!     |----|----|----|----|--- ... ---|----|----|----|
//!     ^slot     ^slot                      ^last slot: 19:00 for a 60 min service
//! ```
//!
//! Slots are spaced `step` minutes apart starting at the opening time.  A
//! slot is bookable when `slot + duration <= end`.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use super::catalog::EmployeeData;
use super::schedule::WeeklySchedule;
use super::time_of_day::TimeOfDay;
use super::weekday::Weekday;

/// Start times on `date` for an appointment of `duration` minutes.
///
/// Returns an empty list when the day is closed or when `duration` or
/// `step` is zero.
pub fn bookable_slots(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    duration: u16,
    step: u16,
) -> Vec<TimeOfDay> {
    let day = Weekday::from(date.weekday());
    let hours = schedule.day(day);
    if !hours.open || duration == 0 || step == 0 {
        return Vec::new();
    }

    let close = hours.end.minutes_since_midnight() as u32;
    let mut slots = Vec::new();
    let mut cursor = hours.start.minutes_since_midnight() as u32;
    while cursor + duration as u32 <= close {
        if let Some(slot) = u16::try_from(cursor).ok().and_then(TimeOfDay::from_minutes) {
            slots.push(slot);
        }
        cursor += step as u32;
    }
    slots
}

/// Like [`bookable_slots`], restricted to the days `employee` works.
pub fn employee_slots(
    schedule: &WeeklySchedule,
    employee: &EmployeeData,
    date: NaiveDate,
    duration: u16,
    step: u16,
) -> Vec<TimeOfDay> {
    if !employee.works_on(Weekday::from(date.weekday())) {
        return Vec::new();
    }
    bookable_slots(schedule, date, duration, step)
}

/// Returns `true` if an appointment of `duration` minutes starting at `at`
/// lies entirely within the opening window of that day.
pub fn is_bookable(schedule: &WeeklySchedule, at: NaiveDateTime, duration: u16) -> bool {
    let day = Weekday::from(at.date().weekday());
    let start = TimeOfDay::from(at.time());
    if duration == 0 || !schedule.is_open_at(day, start) {
        return false;
    }
    start
        .checked_add_minutes(duration)
        .is_some_and(|finish| finish <= schedule.day(day).end)
}

/// First date on or after `from` whose weekday is open.
///
/// Returns `None` when every weekday is closed.
pub fn next_open_date(schedule: &WeeklySchedule, from: NaiveDate) -> Option<NaiveDate> {
    (0..7)
        .map(|offset| from + Duration::days(offset))
        .find(|date| schedule.is_open_on(Weekday::from(date.weekday())))
}
