//! Publish/subscribe channel for business-hours changes.
//!
//! Views that derive data from the schedule (calendar, service availability)
//! subscribe here and receive the full new [`WeeklySchedule`] after every
//! successful save, so they can recompute bookable slots without reloading.
//!
//! Each subscriber owns an unbounded Tokio channel receiver.  Publishing is
//! synchronous: the event is enqueued for every live subscriber before
//! [`ChangeBus::publish`] returns.  Subscribers whose receiver has been
//! dropped are pruned on the next publish.

use booking_core::WeeklySchedule;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Name of the change event, shared with the web dashboard.
pub const BUSINESS_HOURS_CHANGED: &str = "businessHoursChanged";

/// Handle returned by [`ChangeBus::subscribe`], used to unsubscribe.
pub type SubscriptionId = Uuid;

/// Event delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleChanged {
    /// Always [`BUSINESS_HOURS_CHANGED`].
    pub event: &'static str,
    /// The schedule as persisted.
    pub schedule: WeeklySchedule,
}

/// Registry of schedule-change subscribers.
#[derive(Default)]
pub struct ChangeBus {
    subscribers: Vec<(SubscriptionId, mpsc::UnboundedSender<ScheduleChanged>)>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<ScheduleChanged>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.push((id, tx));
        debug!("schedule subscriber {id} registered");
        (id, rx)
    }

    /// Removes a subscriber.  Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    /// Delivers `schedule` to every live subscriber.
    ///
    /// Returns the number of subscribers the event was delivered to.
    pub fn publish(&mut self, schedule: &WeeklySchedule) -> usize {
        let event = ScheduleChanged {
            event: BUSINESS_HOURS_CHANGED,
            schedule: schedule.clone(),
        };
        self.subscribers.retain(|(id, tx)| {
            let delivered = tx.send(event.clone()).is_ok();
            if !delivered {
                debug!("pruning closed schedule subscriber {id}");
            }
            delivered
        });
        self.subscribers.len()
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
