//! Integration tests for the weekly schedule through the public API.
//!
//! These exercise the schedule editing rules together with slot computation,
//! the way the calendar view consumes a freshly saved schedule.

use booking_core::{bookable_slots, TimeOfDay, Weekday, WeeklySchedule};
use chrono::NaiveDate;

fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid time")
}

/// Applies the same steps the settings screen performs on save.
fn finalize(mut schedule: WeeklySchedule) -> WeeklySchedule {
    schedule.apply_shared_window();
    schedule.recompute_days_off();
    schedule
}

#[test]
fn test_days_off_matches_closed_days_for_every_toggle_combination() {
    // Every subset of the seven weekdays, toggled from the default schedule.
    for mask in 0u8..128 {
        let mut schedule = WeeklySchedule::default();
        for (bit, day) in Weekday::ALL.into_iter().enumerate() {
            if mask & (1 << bit) != 0 {
                schedule.toggle_day(day);
            }
        }
        let schedule = finalize(schedule);

        let mut expected: Vec<u8> = Weekday::ALL
            .into_iter()
            .filter(|day| !schedule.day(*day).open)
            .map(Weekday::number)
            .collect();
        expected.sort_unstable();
        assert_eq!(schedule.working_hours.days_off, expected, "mask {mask:#09b}");
    }
}

#[test]
fn test_opening_friday_makes_it_bookable() {
    let mut schedule = WeeklySchedule::default();
    schedule.toggle_day(Weekday::Friday);
    let schedule = finalize(schedule);

    let friday = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();
    assert!(!schedule.working_hours.days_off.contains(&5));
    assert_eq!(bookable_slots(&schedule, friday, 60, 60).len(), 10);
}

#[test]
fn test_json_round_trip_preserves_finalized_schedule() {
    let mut schedule = WeeklySchedule::default();
    schedule.toggle_day(Weekday::Sunday);
    schedule.set_window(t("08:30"), t("16:45"));
    let schedule = finalize(schedule);

    let json = serde_json::to_string(&schedule).expect("serialize");
    let restored: WeeklySchedule = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored, schedule);
}
