//! Durable client-side key/value storage.
//!
//! Mirrors a browser's `localStorage`: string keys, string values, entries
//! survive across sessions. The non-interactive rendering context has no
//! backend at all, which callers express as `Option<Arc<dyn DurableStorage>>`.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

pub trait DurableStorage: Send + Sync {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

/// Process-local storage. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry under `root`.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root_dir(&self) -> &PathBuf {
        &self.root
    }

    fn entry_path(&self, key: &str) -> CoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(data))
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.entry_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        let path = self.entry_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> CoreResult<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CoreError::Storage(format!("invalid storage key: {key:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("operator_permissions", "{}").unwrap();
        assert_eq!(
            other.get_item("operator_permissions").unwrap().as_deref(),
            Some("{}")
        );
        other.remove_item("operator_permissions").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn file_missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert!(storage.get_item("operator_permissions").unwrap().is_none());
    }

    #[test]
    fn file_creates_root_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("store");
        let storage = FileStorage::new(root.clone());
        assert_eq!(storage.root_dir(), &root);
        storage.set_item("operator_permissions", "{\"a\":1}").unwrap();
        assert!(root.join("operator_permissions.json").exists());
        assert_eq!(
            storage.get_item("operator_permissions").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        storage.remove_item("operator_permissions").unwrap();
        assert!(storage.get_item("operator_permissions").unwrap().is_none());
    }

    #[test]
    fn file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        for key in ["", "..", "../escape", "a/b", "a\\b"] {
            assert!(matches!(
                storage.set_item(key, "x"),
                Err(CoreError::Storage(_))
            ));
        }
    }
}
