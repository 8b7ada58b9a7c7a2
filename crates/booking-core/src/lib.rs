//! # booking-core
//!
//! Domain model for the salon booking CRM's business-hours configuration.
//!
//! This crate holds pure business rules and has no dependencies on storage,
//! networking, or UI frameworks.  It is shared by the `booking-hours`
//! application crate and anything else that needs to answer "when can a
//! customer book?".
//!
//! - **`domain::schedule`** – the [`WeeklySchedule`] record: per-weekday open
//!   flags and hours, the shared opening window, and the derived days-off list.
//! - **`domain::time_of_day`** / **`domain::weekday`** – the value types the
//!   schedule is built from.
//! - **`domain::availability`** – bookable-slot computation used by the
//!   calendar and service-availability views.
//! - **`domain::catalog`** – service and employee records with their optional
//!   fields.

pub mod domain;

pub use domain::availability::{bookable_slots, employee_slots, is_bookable, next_open_date};
pub use domain::catalog::{EmployeeData, ServiceData, DEFAULT_SERVICE_MINUTES};
pub use domain::schedule::{DayHours, DaysOpen, ScheduleError, WeeklySchedule, WorkingHours};
pub use domain::time_of_day::{TimeOfDay, TimeParseError};
pub use domain::weekday::{Weekday, WeekdayParseError};
