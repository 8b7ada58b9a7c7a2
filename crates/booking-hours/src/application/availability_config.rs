//! AvailabilityConfig: the business-hours settings use case.
//!
//! This is the single source of truth for which weekdays accept appointments
//! and during which hours.  It owns three things:
//!
//! - the **persisted** schedule (last successful load or save),
//! - an in-memory **draft** the settings screen edits,
//! - the [`ChangeBus`] that tells interested views about saved changes.
//!
//! # Draft lifecycle
//!
//! ```text
//!             toggle_day / set_window
//!   Clean  ───────────────────────────►  Dirty
//!     ▲                                    │
//!     └──────── save() succeeds ◄──────────┘
//!               load() / discard()
//! ```
//!
//! A failed `save` leaves the draft and the `Dirty` state untouched so the
//! user can retry, and no event is published.  The schedule record and the
//! refresh flag are written in that order; if only the flag write fails the
//! record is already on disk, and a retry rewrites the same record before
//! raising the flag.
//!
//! # Save semantics
//!
//! Saving copies the shared opening window into **every** weekday's
//! `start`/`end`, overwriting distinct per-day hours, then re-derives
//! `daysOff`, validates, persists, raises the appointment-list refresh flag
//! and publishes `businessHoursChanged`.
//!
//! `save` takes `&mut self`, so no other edit can interleave while the store
//! write is pending.

use std::sync::Arc;

use booking_core::{ScheduleError, TimeOfDay, Weekday, WeeklySchedule};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::appointment_refresh::AppointmentRefreshFlag;
use super::change_bus::{ChangeBus, ScheduleChanged, SubscriptionId};
use super::key_value::{KeyValueStore, StoreError, BUSINESS_HOURS_KEY};

/// Error type for business-hours operations.
#[derive(Debug, Error)]
pub enum AvailabilityError {
    /// Reading or writing the storage backend failed.
    #[error("failed to persist business hours: {0}")]
    Persistence(#[from] StoreError),

    /// The schedule violates an invariant (e.g. an open day closing before it opens).
    #[error("invalid business hours: {0}")]
    Validation(#[from] ScheduleError),

    /// The schedule could not be encoded as JSON.
    #[error("failed to encode business hours: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Whether the draft has unsaved edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Clean,
    Dirty,
}

/// Business-hours settings service with an injectable storage backend.
pub struct AvailabilityConfig {
    store: Arc<dyn KeyValueStore>,
    refresh_flag: AppointmentRefreshFlag,
    persisted: WeeklySchedule,
    draft: WeeklySchedule,
    state: DraftState,
    bus: ChangeBus,
}

impl AvailabilityConfig {
    /// Creates the service holding built-in defaults.  Call [`load`](Self::load)
    /// to pick up the persisted record.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            refresh_flag: AppointmentRefreshFlag::new(Arc::clone(&store)),
            store,
            persisted: WeeklySchedule::default(),
            draft: WeeklySchedule::default(),
            state: DraftState::Clean,
            bus: ChangeBus::new(),
        }
    }

    /// Reads the persisted schedule, falling back to defaults when absent.
    ///
    /// An unreadable record is treated as absent.  A stored `daysOff` list
    /// that disagrees with `daysOpen` is recomputed.  The draft is replaced by
    /// the loaded schedule and the state becomes [`DraftState::Clean`].
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::Persistence`] if the store cannot be read.
    pub async fn load(&mut self) -> Result<WeeklySchedule, AvailabilityError> {
        let schedule = match self.store.get(BUSINESS_HOURS_KEY).await? {
            None => {
                debug!("no stored business hours; using defaults");
                WeeklySchedule::default()
            }
            Some(raw) => match serde_json::from_str::<WeeklySchedule>(&raw) {
                Ok(mut schedule) => {
                    if schedule.recompute_days_off() {
                        warn!("stored daysOff disagreed with daysOpen; recomputed");
                    }
                    schedule
                }
                Err(e) => {
                    warn!("stored business hours are unreadable ({e}); using defaults");
                    WeeklySchedule::default()
                }
            },
        };

        self.persisted = schedule.clone();
        self.draft = schedule.clone();
        self.state = DraftState::Clean;
        Ok(schedule)
    }

    /// Flips `open` for `day` in the draft.  Not persisted.
    pub fn toggle_day(&mut self, day: Weekday) -> &WeeklySchedule {
        let open = self.draft.toggle_day(day);
        debug!("draft: {day} is now {}", if open { "open" } else { "closed" });
        self.state = DraftState::Dirty;
        &self.draft
    }

    /// Sets the shared opening window applied to every day on save.  Not persisted.
    pub fn set_window(&mut self, start: TimeOfDay, end: TimeOfDay) -> &WeeklySchedule {
        self.draft.set_window(start, end);
        debug!("draft: shared window set to {start}-{end}");
        self.state = DraftState::Dirty;
        &self.draft
    }

    /// Propagates the shared window, persists the draft and notifies subscribers.
    ///
    /// # Errors
    ///
    /// - [`AvailabilityError::Validation`] if an open day would close at or
    ///   before it opens.  Nothing is written.
    /// - [`AvailabilityError::Persistence`] if writing the record or raising
    ///   the refresh flag fails.  The draft stays dirty and no event is
    ///   published.
    pub async fn save(&mut self) -> Result<(), AvailabilityError> {
        let mut next = self.draft.clone();
        next.apply_shared_window();
        next.recompute_days_off();
        next.validate()?;

        let encoded = serde_json::to_string(&next)?;
        if let Err(e) = self.store.set(BUSINESS_HOURS_KEY, &encoded).await {
            warn!("saving business hours failed: {e}");
            return Err(e.into());
        }

        if let Err(e) = self.refresh_flag.raise().await {
            warn!("business hours written but the appointment refresh flag was not: {e}");
            return Err(e.into());
        }

        self.persisted = next.clone();
        self.draft = next;
        self.state = DraftState::Clean;

        let delivered = self.bus.publish(&self.persisted);
        info!(
            "business hours saved (days off: {:?}); notified {delivered} subscriber(s)",
            self.persisted.working_hours.days_off
        );
        Ok(())
    }

    /// Replaces the draft with the built-in defaults.  Not persisted.
    pub fn reset_to_defaults(&mut self) -> &WeeklySchedule {
        self.draft = WeeklySchedule::default();
        self.state = DraftState::Dirty;
        &self.draft
    }

    /// Throws away unsaved edits.
    pub fn discard(&mut self) -> &WeeklySchedule {
        self.draft = self.persisted.clone();
        self.state = DraftState::Clean;
        &self.draft
    }

    /// Registers a listener for saved changes.
    pub fn subscribe(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<ScheduleChanged>) {
        self.bus.subscribe()
    }

    /// Removes a listener.  Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.len()
    }

    /// The schedule being edited.
    pub fn draft(&self) -> &WeeklySchedule {
        &self.draft
    }

    /// The last successfully loaded or saved schedule.
    pub fn persisted(&self) -> &WeeklySchedule {
        &self.persisted
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == DraftState::Dirty
    }
}
