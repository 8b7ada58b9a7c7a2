//! Storage infrastructure.
//!
//! - `file_store` – the durable [`KeyValueStore`](crate::application::key_value::KeyValueStore):
//!   one JSON file per key inside a data directory.
//! - `memory` – an in-process store with an outage switch, for tests and
//!   ephemeral runs.
//! - `config` – the TOML application config (log level, data directory,
//!   booking defaults).

pub mod config;
pub mod file_store;
pub mod memory;
