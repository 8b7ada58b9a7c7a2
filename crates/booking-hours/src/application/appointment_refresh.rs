//! Cross-feature "appointment list should refresh" signal.
//!
//! Appointment lists don't subscribe to the change bus; they poll a boolean
//! stored under [`APPOINTMENT_REFRESH_KEY`].  Every successful business-hours
//! save raises it, and the list clears it with [`AppointmentRefreshFlag::take`]
//! when it refetches.

use std::sync::Arc;

use tracing::debug;

use super::key_value::{KeyValueStore, StoreError, APPOINTMENT_REFRESH_KEY};

/// Handle on the refresh flag in a [`KeyValueStore`].
#[derive(Clone)]
pub struct AppointmentRefreshFlag {
    store: Arc<dyn KeyValueStore>,
}

impl AppointmentRefreshFlag {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Sets the flag to `true`.
    pub async fn raise(&self) -> Result<(), StoreError> {
        self.store.set(APPOINTMENT_REFRESH_KEY, "true").await
    }

    /// Returns the current value without clearing it.
    pub async fn is_raised(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(APPOINTMENT_REFRESH_KEY).await?.as_deref() == Some("true"))
    }

    /// Returns `true` once per raise and clears the flag.
    pub async fn take(&self) -> Result<bool, StoreError> {
        if !self.is_raised().await? {
            return Ok(false);
        }
        self.store.remove(APPOINTMENT_REFRESH_KEY).await?;
        debug!("appointment refresh flag consumed");
        Ok(true)
    }
}
