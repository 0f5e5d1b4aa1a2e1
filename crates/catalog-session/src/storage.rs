//! Session-scoped string storage backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::StorageError;

/// A string key/value store that lives as long as one browsing session.
///
/// Mirrors the shape of a browser's `sessionStorage`: values are opaque
/// strings and every call completes synchronously, so a write is visible to
/// the next read without any flushing step.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StorageError> {
        for key in self.keys()? {
            self.remove_item(&key)?;
        }
        Ok(())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// In-memory storage, gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut items) = store.items.lock() {
            items.insert(key.into(), value.into());
        }
        store
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.keys().cloned().collect())
    }
}

/// Storage backed by a single JSON file.
///
/// The whole map is rewritten on every mutation. A terminal "session" spans
/// several process invocations, so the file stands in for the tab's
/// lifetime until the session is explicitly ended.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// an error; callers decide whether to start over.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "opened session file");

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// Open the store, discarding a corrupt file instead of failing.
    pub fn open_or_reset(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        match Self::open(path.as_ref()) {
            Ok(store) => Ok(store),
            Err(StorageError::SerializeError(e)) => {
                tracing::warn!(path = %path.as_ref().display(), error = %e, "session file corrupt, starting fresh");
                Ok(Self {
                    path: path.as_ref().to_path_buf(),
                    items: Mutex::new(BTreeMap::new()),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("catalog-session-{}-{}.json", name, nanos))
    }

    #[test]
    fn test_memory_set_get_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_memory_clear() {
        let store = MemoryStorage::with_item("a", "1");
        store.set_item("b", "2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let store = Arc::new(MemoryStorage::new());
        let other = Arc::clone(&store);
        store.set_item("cartItems", "[]").unwrap();
        assert_eq!(other.get_item("cartItems").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let path = temp_path("reopen");
        {
            let store = FileStorage::open(&path).unwrap();
            store.set_item("cartItems", "[1,2]").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("cartItems").unwrap().as_deref(), Some("[1,2]"));

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::SerializeError(_))
        ));

        let store = FileStorage::open_or_reset(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        fs::remove_file(&path).unwrap();
    }
}
