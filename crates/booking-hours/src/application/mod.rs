//! Application layer use cases for the business-hours settings.
//!
//! Use cases here orchestrate the `booking_core` domain types and depend only
//! on the [`key_value::KeyValueStore`] abstraction; concrete storage lives in
//! `infrastructure`.
//!
//! # Sub-modules
//!
//! - **`availability_config`** – the settings service: load, edit a draft,
//!   save, and notify.
//! - **`change_bus`** – publish/subscribe delivery of `businessHoursChanged`.
//! - **`schedule_listener`** – a view-side subscriber that keeps its copy of
//!   the schedule current and computes bookable slots from it.
//! - **`appointment_refresh`** – the polled "appointment list should refresh"
//!   flag raised on every save.
//! - **`key_value`** – the storage port and its well-known keys.

pub mod appointment_refresh;
pub mod availability_config;
pub mod change_bus;
pub mod key_value;
pub mod schedule_listener;
