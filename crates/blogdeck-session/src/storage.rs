//! Durable key/value storage, the local equivalent of browser `localStorage`.
//!
//! Values are opaque strings; callers JSON-encode structured data
//! themselves. Reads never fail: a missing key and an unreadable key look
//! the same to the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::StorageError;

/// Key/value storage backend.
pub trait Storage: Send + Sync {
    /// Read a value.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.lock().keys().cloned().collect()
    }
}

/// Storage backed by a single JSON object file.
///
/// The whole map is loaded on open and rewritten on every mutation through
/// a temporary file and a rename, so a crash never leaves a half-written
/// file behind. The in-memory map only changes once the write succeeded.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = if path.is_file() {
            let contents = std::fs::read_to_string(&path).map_err(|e| StorageError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = items.len(), "Opened storage file");
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |path: &Path, source| StorageError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        let contents = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;

        trace!(path = %self.path.display(), keys = items.len(), "Storage file written");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock();
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock();
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.lock().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("token").is_none());

        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

        storage.remove_item("token").unwrap();
        storage.remove_item("token").unwrap();
        assert!(storage.get_item("token").is_none());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("token", "abc").unwrap();
            storage.set_item("userInfo", r#"{"username":"bob"}"#).unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));
        assert_eq!(storage.keys(), vec!["token".to_string(), "userInfo".to_string()]);

        storage.remove_item("token").unwrap();
        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.get_item("token").is_none());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_map_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("token", "abc").unwrap();

        // A directory where the temp file goes makes every write fail.
        let tmp = path.with_extension("tmp");
        std::fs::create_dir(&tmp).unwrap();

        assert!(matches!(
            storage.set_item("token", "new"),
            Err(StorageError::Io { .. })
        ));
        assert!(storage.set_item("userInfo", "{}").is_err());
        assert!(storage.remove_item("token").is_err());
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));
        assert_eq!(storage.keys(), vec!["token".to_string()]);

        std::fs::remove_dir(&tmp).unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").as_deref(), Some("abc"));
        assert!(reopened.get_item("userInfo").is_none());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_file_storage_empty_file_is_empty_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.keys().is_empty());
    }
}
