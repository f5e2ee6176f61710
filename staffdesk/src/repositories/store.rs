//! Flat key-value storage backends.
//!
//! Every backend behaves like browser `localStorage`: string keys, string
//! values, whole-value replacement on write, and no cross-key transactions.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::anyhow;

use crate::error::AppError;

/// Storage trait for dependency injection and testing.
///
/// Use `MockKeyValueStore` in tests to simulate storage failures.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Process-local store, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Single JSON document on disk mapping keys to raw string values.
///
/// The file is re-read on every access and rewritten in full on every write,
/// so two processes sharing a file race exactly like two browser tabs do.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        tracing::debug!(path = %self.path.display(), key, "store file rewritten");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use anyhow::anyhow;
    use web_sys::Storage;

    use super::KeyValueStore;
    use crate::error::AppError;

    /// `window.localStorage`, looked up on every access.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserStore;

    impl BrowserStore {
        pub fn new() -> Self {
            Self
        }
    }

    fn local_storage() -> Result<Storage, AppError> {
        let storage = web_sys::window()
            .ok_or_else(|| anyhow!("No window object"))?
            .local_storage()
            .map_err(|_| anyhow!("No localStorage"))?
            .ok_or_else(|| anyhow!("No localStorage"))?;
        Ok(storage)
    }

    impl KeyValueStore for BrowserStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
            local_storage()?
                .get_item(key)
                .map_err(|_| AppError::Storage(anyhow!("localStorage read failed for {}", key)))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
            local_storage()?
                .set_item(key, value)
                .map_err(|_| AppError::Storage(anyhow!("localStorage write failed for {}", key)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("users").unwrap(), None);
    }

    #[test]
    fn memory_store_overwrites_values() {
        let store = MemoryStore::new();
        store.set_item("users", "[]").unwrap();
        store.set_item("users", "[1]").unwrap();
        assert_eq!(store.get_item("users").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("desk.json");

        let first = FileStore::new(&path);
        assert_eq!(first.get_item("projects").unwrap(), None);
        first.set_item("projects", "[]").unwrap();
        first.set_item("users", "[{\"id\":\"1\"}]").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(second.get_item("projects").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            second.get_item("users").unwrap().as_deref(),
            Some("[{\"id\":\"1\"}]")
        );
    }

    #[test]
    fn file_store_last_writer_wins_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.json");
        let tab_a = FileStore::new(&path);
        let tab_b = FileStore::new(&path);

        tab_a.set_item("attendanceRecords", "[\"a\"]").unwrap();
        tab_b.set_item("attendanceRecords", "[\"b\"]").unwrap();

        assert_eq!(
            tab_a.get_item("attendanceRecords").unwrap().as_deref(),
            Some("[\"b\"]")
        );
    }

    #[test]
    fn file_store_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get_item("users"), Err(AppError::Storage(_))));
    }

    #[test]
    fn mock_store_satisfies_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockKeyValueStore>();
    }
}
