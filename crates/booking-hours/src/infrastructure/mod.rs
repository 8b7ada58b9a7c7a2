//! Infrastructure layer for the business-hours service.
//!
//! Contains the adapters the application layer is wired to: storage backends
//! for the key-value port, the TOML application config, and the command
//! bridge the dashboard UI calls.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `booking_core`, but MUST NOT be imported by the `application` or domain
//! layers outside of tests.

pub mod storage;
pub mod ui_bridge;
