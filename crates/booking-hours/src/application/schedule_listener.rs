//! ScheduleListener: keeps a view's copy of the schedule current.
//!
//! The calendar and service-availability views each hold a listener.  It
//! starts from the schedule known at subscription time and applies every
//! `businessHoursChanged` event it receives, so slot lists are recomputed
//! from the latest saved hours without a reload.

use booking_core::{
    bookable_slots, employee_slots, EmployeeData, ServiceData, TimeOfDay, WeeklySchedule,
};
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::debug;

use super::availability_config::AvailabilityConfig;
use super::change_bus::{ScheduleChanged, SubscriptionId};

/// A subscribed view of the business hours.
pub struct ScheduleListener {
    id: SubscriptionId,
    current: WeeklySchedule,
    events: mpsc::UnboundedReceiver<ScheduleChanged>,
    slot_step: u16,
}

impl ScheduleListener {
    /// Subscribes to `config`, seeding the view with its persisted schedule.
    pub fn attach(config: &mut AvailabilityConfig, slot_step: u16) -> Self {
        let (id, events) = config.subscribe();
        Self {
            id,
            current: config.persisted().clone(),
            events,
            slot_step,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Applies every queued change without waiting.
    ///
    /// Returns the number of events applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.current = event.schedule;
            applied += 1;
        }
        if applied > 0 {
            debug!("listener {} applied {applied} schedule change(s)", self.id);
        }
        applied
    }

    /// Waits for the next change and applies it.
    ///
    /// Returns `false` once the publisher side has gone away.
    pub async fn changed(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.current = event.schedule;
                true
            }
            None => false,
        }
    }

    /// The most recent schedule this view has seen.
    pub fn schedule(&self) -> &WeeklySchedule {
        &self.current
    }

    /// Start times for `service` on `date`.
    pub fn service_slots(&self, service: &ServiceData, date: NaiveDate) -> Vec<TimeOfDay> {
        if !service.active {
            return Vec::new();
        }
        bookable_slots(&self.current, date, service.duration(), self.slot_step)
    }

    /// Start times for `service` performed by `employee` on `date`.
    pub fn employee_service_slots(
        &self,
        employee: &EmployeeData,
        service: &ServiceData,
        date: NaiveDate,
    ) -> Vec<TimeOfDay> {
        if !service.active || !employee.can_perform(service) {
            return Vec::new();
        }
        employee_slots(&self.current, employee, date, service.duration(), self.slot_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::MemoryStore;
    use booking_core::Weekday;
    use std::sync::Arc;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 23).unwrap()
    }

    async fn config() -> AvailabilityConfig {
        let mut config = AvailabilityConfig::new(Arc::new(MemoryStore::new()));
        config.load().await.unwrap();
        config
    }

    #[tokio::test]
    async fn test_listener_recomputes_slots_after_save() {
        // Arrange
        let mut config = config().await;
        let mut listener = ScheduleListener::attach(&mut config, 30);
        let service = ServiceData::new("Haircut");
        assert!(listener.service_slots(&service, friday()).is_empty());

        // Act
        config.toggle_day(Weekday::Friday);
        config.save().await.unwrap();
        let applied = listener.poll();

        // Assert
        assert_eq!(applied, 1);
        assert!(!listener.service_slots(&service, friday()).is_empty());
    }

    #[tokio::test]
    async fn test_listener_ignores_unsaved_edits() {
        let mut config = config().await;
        let mut listener = ScheduleListener::attach(&mut config, 30);

        config.toggle_day(Weekday::Friday);

        assert_eq!(listener.poll(), 0);
        assert!(!listener.schedule().is_open_on(Weekday::Friday));
    }

    #[tokio::test]
    async fn test_changed_returns_false_after_unsubscribe() {
        let mut config = config().await;
        let mut listener = ScheduleListener::attach(&mut config, 30);

        config.unsubscribe(listener.id());

        assert!(!listener.changed().await);
    }

    #[tokio::test]
    async fn test_employee_service_slots_require_capability() {
        let mut config = config().await;
        let listener = ScheduleListener::attach(&mut config, 30);
        let haircut = ServiceData::new("Haircut");
        let other = ServiceData::new("Facial");
        let mut employee = EmployeeData::new("Rana");
        employee.service_ids = vec![other.id];
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert!(listener.employee_service_slots(&employee, &haircut, monday).is_empty());
        assert!(!listener.employee_service_slots(&employee, &other, monday).is_empty());
    }

    #[tokio::test]
    async fn test_inactive_service_has_no_slots() {
        let mut config = config().await;
        let listener = ScheduleListener::attach(&mut config, 30);
        let mut service = ServiceData::new("Retired");
        service.active = false;
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert!(listener.service_slots(&service, monday).is_empty());
    }
}
