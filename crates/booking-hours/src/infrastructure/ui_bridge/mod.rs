//! Command bridge: exposes the business-hours use cases to the dashboard UI.
//!
//! Every command takes the shared [`AppState`], delegates to the application
//! layer, and returns a [`CommandResult`] so the frontend always receives the
//! same `{ success, data, error }` shape.
//!
//! # Data Transfer Objects
//!
//! The DTOs here are flat, JSON-friendly mirrors of the domain types.  Times
//! are sent twice: the canonical `"HH:MM"` value the inputs bind to, and the
//! 12-hour `"h:MM AM"` text the settings screen displays.

use std::sync::Arc;

use booking_core::{bookable_slots, is_bookable, TimeOfDay, Weekday, WeeklySchedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::application::availability_config::{AvailabilityConfig, AvailabilityError};
use crate::application::key_value::KeyValueStore;
use crate::infrastructure::storage::config::BookingConfig;

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all commands.
///
/// The settings service sits behind an async Tokio mutex: a `save` holds the
/// lock across the storage write, so no other command can edit the draft
/// until it resolves.
pub struct AppState {
    pub hours: Mutex<AvailabilityConfig>,
    pub booking: BookingConfig,
}

impl AppState {
    /// Builds the state and loads the persisted schedule from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::Persistence`] if the store cannot be read.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        booking: BookingConfig,
    ) -> Result<Arc<Self>, AvailabilityError> {
        let mut hours = AvailabilityConfig::new(store);
        hours.load().await?;
        Ok(Arc::new(Self {
            hours: Mutex::new(hours),
            booking,
        }))
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// One weekday row of the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayHoursDto {
    pub day: String,
    pub day_number: u8,
    pub open: bool,
    pub start: String,
    pub end: String,
    pub start_display: String,
    pub end_display: String,
}

/// The whole settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHoursDto {
    pub days: Vec<DayHoursDto>,
    pub window_start: String,
    pub window_end: String,
    pub window_start_display: String,
    pub window_end_display: String,
    pub days_off: Vec<u8>,
    /// `daysOff` as day names, Sunday first.
    pub days_off_names: Vec<String>,
    /// `true` while the draft has unsaved edits.
    pub dirty: bool,
}

impl BusinessHoursDto {
    fn from_schedule(schedule: &WeeklySchedule, dirty: bool) -> Self {
        let days = schedule
            .days_open
            .iter()
            .map(|(day, hours)| DayHoursDto {
                day: day.name().to_string(),
                day_number: day.number(),
                open: hours.open,
                start: hours.start.to_string(),
                end: hours.end.to_string(),
                start_display: hours.start.to_12_hour(),
                end_display: hours.end.to_12_hour(),
            })
            .collect();
        let window = &schedule.working_hours;
        Self {
            days,
            window_start: window.start.to_string(),
            window_end: window.end.to_string(),
            window_start_display: window.start.to_12_hour(),
            window_end_display: window.end.to_12_hour(),
            days_off: window.days_off.clone(),
            days_off_names: window
                .days_off
                .iter()
                .filter_map(|n| Weekday::from_number(*n).ok())
                .map(|day| day.name().to_string())
                .collect(),
            dirty,
        }
    }
}

/// One bookable start time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub time: String,
    pub display: String,
}

impl From<TimeOfDay> for SlotDto {
    fn from(time: TimeOfDay) -> Self {
        Self {
            time: time.to_string(),
            display: time.to_12_hour(),
        }
    }
}

/// Unified response wrapper used by all commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

fn parse_date_input(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{text}': {e}"))
}

/// Accepts either `"HH:MM"` or the 12-hour display form.
fn parse_time_input(text: &str) -> Result<TimeOfDay, String> {
    text.parse::<TimeOfDay>()
        .or_else(|_| TimeOfDay::parse_12_hour(text))
        .map_err(|e| e.to_string())
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the draft schedule currently being edited.
pub async fn get_business_hours(state: Arc<AppState>) -> CommandResult<BusinessHoursDto> {
    let hours = state.hours.lock().await;
    CommandResult::ok(BusinessHoursDto::from_schedule(hours.draft(), hours.is_dirty()))
}

/// Flips one weekday open/closed in the draft.
pub async fn toggle_business_day(
    state: Arc<AppState>,
    day: String,
) -> CommandResult<BusinessHoursDto> {
    let day: Weekday = match day.parse() {
        Ok(day) => day,
        Err(e) => return CommandResult::err(format!("{e}")),
    };
    let mut hours = state.hours.lock().await;
    hours.toggle_day(day);
    CommandResult::ok(BusinessHoursDto::from_schedule(hours.draft(), hours.is_dirty()))
}

/// Sets the shared opening window in the draft.
pub async fn set_business_window(
    state: Arc<AppState>,
    start: String,
    end: String,
) -> CommandResult<BusinessHoursDto> {
    let (start, end) = match (parse_time_input(&start), parse_time_input(&end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => return CommandResult::err(e),
    };
    let mut hours = state.hours.lock().await;
    hours.set_window(start, end);
    CommandResult::ok(BusinessHoursDto::from_schedule(hours.draft(), hours.is_dirty()))
}

/// Persists the draft.  On failure the draft stays dirty so the user can retry.
pub async fn save_business_hours(state: Arc<AppState>) -> CommandResult<BusinessHoursDto> {
    let mut hours = state.hours.lock().await;
    match hours.save().await {
        Ok(()) => CommandResult::ok(BusinessHoursDto::from_schedule(hours.persisted(), false)),
        Err(e) => {
            warn!("save_business_hours failed: {e}");
            CommandResult::err(e.to_string())
        }
    }
}

/// Drops unsaved edits.
pub async fn discard_business_hours(state: Arc<AppState>) -> CommandResult<BusinessHoursDto> {
    let mut hours = state.hours.lock().await;
    hours.discard();
    CommandResult::ok(BusinessHoursDto::from_schedule(hours.draft(), false))
}

/// Bookable start times on `date` (`YYYY-MM-DD`) from the saved schedule.
///
/// `duration` defaults to the configured service length.
pub async fn get_bookable_slots(
    state: Arc<AppState>,
    date: String,
    duration: Option<u16>,
) -> CommandResult<Vec<SlotDto>> {
    let date = match parse_date_input(&date) {
        Ok(date) => date,
        Err(e) => return CommandResult::err(e),
    };
    let duration = duration.unwrap_or(state.booking.default_service_minutes);
    let hours = state.hours.lock().await;
    let slots = bookable_slots(
        hours.persisted(),
        date,
        duration,
        state.booking.slot_step_minutes,
    );
    CommandResult::ok(slots.into_iter().map(SlotDto::from).collect())
}

/// Whether an appointment of `duration` minutes (default: the configured
/// service length) starting at `time` on `date` fits the saved schedule.
pub async fn check_appointment_time(
    state: Arc<AppState>,
    date: String,
    time: String,
    duration: Option<u16>,
) -> CommandResult<bool> {
    let (date, time) = match (parse_date_input(&date), parse_time_input(&time)) {
        (Ok(date), Ok(time)) => (date, time),
        (Err(e), _) | (_, Err(e)) => return CommandResult::err(e),
    };
    let duration = duration.unwrap_or(state.booking.default_service_minutes);
    let hours = state.hours.lock().await;
    CommandResult::ok(is_bookable(
        hours.persisted(),
        date.and_time(time.to_naive_time()),
        duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::MemoryStore;

    async fn state_with(store: Arc<MemoryStore>) -> Arc<AppState> {
        AppState::open(store, BookingConfig::default())
            .await
            .expect("state must open")
    }

    #[tokio::test]
    async fn test_get_business_hours_returns_defaults_with_display_strings() {
        let state = state_with(Arc::new(MemoryStore::new())).await;

        let result = get_business_hours(state).await;

        assert!(result.success);
        let dto = result.data.unwrap();
        assert_eq!(dto.days.len(), 7);
        assert_eq!(dto.days[0].day, "monday");
        assert_eq!(dto.days[0].start_display, "10:00 AM");
        assert_eq!(dto.days[0].end_display, "8:00 PM");
        assert_eq!(dto.days_off, vec![5]);
        assert_eq!(dto.days_off_names, vec!["friday".to_string()]);
        assert!(!dto.dirty);
    }

    #[tokio::test]
    async fn test_toggle_unknown_day_returns_error() {
        let state = state_with(Arc::new(MemoryStore::new())).await;

        let result = toggle_business_day(state, "someday".to_string()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("someday"));
    }

    #[tokio::test]
    async fn test_toggle_marks_dto_dirty() {
        let state = state_with(Arc::new(MemoryStore::new())).await;

        let dto = toggle_business_day(state, "Friday".to_string())
            .await
            .data
            .unwrap();

        assert!(dto.dirty);
        assert!(dto.days[4].open);
    }

    #[tokio::test]
    async fn test_set_window_accepts_12_hour_input() {
        let state = state_with(Arc::new(MemoryStore::new())).await;

        let dto = set_business_window(state, "9:00 AM".to_string(), "17:30".to_string())
            .await
            .data
            .unwrap();

        assert_eq!(dto.window_start, "09:00");
        assert_eq!(dto.window_end_display, "5:30 PM");
    }

    #[tokio::test]
    async fn test_set_window_rejects_garbage() {
        let state = state_with(Arc::new(MemoryStore::new())).await;
        let result = set_business_window(state, "nine".to_string(), "17:00".to_string()).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_save_failure_reports_error_and_keeps_draft() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(Arc::clone(&store)).await;
        toggle_business_day(Arc::clone(&state), "friday".to_string()).await;
        store.set_unavailable(true);

        let result = save_business_hours(Arc::clone(&state)).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("storage unavailable"));
        let dto = get_business_hours(state).await.data.unwrap();
        assert!(dto.dirty);
        assert!(dto.days[4].open);
    }

    #[tokio::test]
    async fn test_slots_reflect_saved_schedule_only() {
        let state = state_with(Arc::new(MemoryStore::new())).await;
        let friday = "2026-10-23".to_string();

        toggle_business_day(Arc::clone(&state), "friday".to_string()).await;
        let before = get_bookable_slots(Arc::clone(&state), friday.clone(), None).await;
        save_business_hours(Arc::clone(&state)).await;
        let after = get_bookable_slots(state, friday, None).await;

        assert!(before.data.unwrap().is_empty());
        let after = after.data.unwrap();
        assert_eq!(after.first().map(|s| s.display.as_str()), Some("10:00 AM"));
        assert_eq!(after.last().map(|s| s.time.as_str()), Some("19:00"));
    }

    #[tokio::test]
    async fn test_slots_reject_invalid_date() {
        let state = state_with(Arc::new(MemoryStore::new())).await;
        let result = get_bookable_slots(state, "23/10/2026".to_string(), None).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_check_appointment_time_respects_closing_time() {
        // 2026-10-19 is a Monday, open 10:00 to 20:00.
        let state = state_with(Arc::new(MemoryStore::new())).await;
        let monday = || "2026-10-19".to_string();

        let fits =
            check_appointment_time(Arc::clone(&state), monday(), "7:00 PM".into(), None).await;
        let overruns =
            check_appointment_time(Arc::clone(&state), monday(), "19:30".into(), None).await;
        let short = check_appointment_time(state, monday(), "19:30".into(), Some(30)).await;

        assert_eq!(fits.data, Some(true));
        assert_eq!(overruns.data, Some(false));
        assert_eq!(short.data, Some(true));
    }

    #[tokio::test]
    async fn test_check_appointment_time_closed_day_and_bad_input() {
        let state = state_with(Arc::new(MemoryStore::new())).await;
        let friday = "2026-10-23".to_string();

        let closed =
            check_appointment_time(Arc::clone(&state), friday, "12:00".into(), None).await;
        let garbage =
            check_appointment_time(state, "2026-10-19".into(), "noon".into(), None).await;

        assert_eq!(closed.data, Some(false));
        assert!(!garbage.success);
    }

    #[test]
    fn test_discard_resets_dirty_flag() {
        tokio_test::block_on(async {
            let state = state_with(Arc::new(MemoryStore::new())).await;
            toggle_business_day(Arc::clone(&state), "monday".to_string()).await;

            let dto = discard_business_hours(state).await.data.unwrap();

            assert!(!dto.dirty);
            assert!(dto.days[0].open);
        });
    }
}
