//! Key/value storage backends for persisted preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`StoragePort`] is the only way the preference store touches persistent
//! state. Interactive environments use [`LocalStorage`] (browser, `hydrate`
//! feature) or [`FileStorage`] (CLI); server rendering and tests use
//! [`NoopStorage`] or [`MemoryStorage`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Errors surfaced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached (no window, quota, disabled storage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key/value storage, shaped like the browser `Storage` API.
pub trait StoragePort {
    /// Read the raw value for `key`, `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// NOOP
// =============================================================================

/// Storage for non-interactive contexts: nothing is read, writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorage;

impl StoragePort for NoopStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage. Counts successful writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry. Does not count as a write.
    #[must_use]
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of `set_item`/`remove_item` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl StoragePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// A JSON object file mapping keys to raw string values.
///
/// Every call re-reads the file, so several processes can share it the way
/// browser tabs share `localStorage` (last write wins).
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current contents for a read-modify-write. A malformed file is
    /// replaced rather than blocking every later write.
    fn read_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Format(e)) => {
                tracing::warn!(error = %e, path = %self.path.display(), "storage file is malformed, overwriting");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StoragePort for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_write()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Browser `window.localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

#[cfg(feature = "hydrate")]
impl StoragePort for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
