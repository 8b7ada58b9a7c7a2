//! Domain entities for the business-hours configuration.
//!
//! Everything here is plain data plus the rules that keep it consistent.
//! Persistence, change notification and presentation live in `booking-hours`.

pub mod availability;
pub mod catalog;
pub mod schedule;
pub mod time_of_day;
pub mod weekday;
