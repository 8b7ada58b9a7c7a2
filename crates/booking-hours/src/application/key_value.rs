//! Storage port: the durable key-value store the settings live in.
//!
//! The dashboard keeps its settings in browser-durable storage: a flat map of
//! string keys to string values.  [`KeyValueStore`] is that contract.  The
//! application layer only ever talks to this trait; concrete backends
//! (file-backed, in-memory) live in `infrastructure::storage` and are injected
//! at construction time.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Storage key of the persisted business-hours record.
pub const BUSINESS_HOURS_KEY: &str = "businessHoursSettings";

/// Storage key of the flag appointment lists poll to decide whether to refetch.
pub const APPOINTMENT_REFRESH_KEY: &str = "appointmentListShouldRefresh";

/// Error raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be reached at all (quota exceeded, disabled storage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be mapped onto the backend (e.g. contains a path separator).
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A durable string-to-string store.
///
/// Implementations must make a successful `set` visible to every later `get`
/// on the same store.  No cross-process locking is expected: last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`.  Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
