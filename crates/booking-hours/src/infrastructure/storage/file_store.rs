//! File-backed key-value store.
//!
//! Each key is stored as `<data_dir>/<key>.json`.  The directory is created on
//! first write.  Writes go to a temporary sibling file which is then renamed
//! over the target, so a crash mid-write never leaves a truncated record.
//!
//! Keys are restricted to ASCII letters, digits, `-` and `_` so they can never
//! escape the data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::key_value::{KeyValueStore, StoreError};

/// A [`KeyValueStore`] that keeps one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("booking_store_test_{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_get_returns_none_before_first_write() {
        let store = FileStore::new(temp_dir());
        assert_eq!(store.get("businessHoursSettings").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_file() {
        // Arrange
        let dir = temp_dir();
        let store = FileStore::new(&dir);

        // Act
        store.set("businessHoursSettings", "{}").await.unwrap();

        // Assert
        let on_disk = std::fs::read_to_string(dir.join("businessHoursSettings.json")).unwrap();
        assert_eq!(on_disk, "{}");
        assert!(!dir.join("businessHoursSettings.json.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let dir = temp_dir();
        let store = FileStore::new(&dir);

        store.set("flag", "false").await.unwrap();
        store.set("flag", "true").await.unwrap();

        assert_eq!(store.get("flag").await.unwrap().as_deref(), Some("true"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = temp_dir();
        let store = FileStore::new(&dir);
        store.set("flag", "true").await.unwrap();

        store.remove("flag").await.unwrap();
        store.remove("flag").await.unwrap();

        assert_eq!(store.get("flag").await.unwrap(), None);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_rejects_keys_that_could_escape_directory() {
        let store = FileStore::new(temp_dir());
        for key in ["", "../etc/passwd", "a/b", "with space"] {
            assert!(
                matches!(store.get(key).await, Err(StoreError::InvalidKey(_))),
                "key '{key}' must be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_set_fails_when_directory_is_a_file() {
        // Arrange: occupy the data directory path with a regular file
        let path = temp_dir();
        std::fs::write(&path, "not a directory").unwrap();
        let store = FileStore::new(&path);

        // Act
        let result = store.set("flag", "true").await;

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        std::fs::remove_file(&path).ok();
    }
}
