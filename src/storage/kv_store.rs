//! Device key-value storage
//!
//! Each feature module owns one JSON blob under a fixed string key
//! (`watchlist`, `holdings`, ...). Blobs are independent; every write is a
//! single synchronous key overwrite, so there is nothing to roll back.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::storage::storage_errors::StorageError;

/// Raw string-valued key-value store.
///
/// Typed access goes through [`KvStoreExt`]; implementations only deal in
/// serialized JSON text.
pub trait KvStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
    fn contains(&self, key: &str) -> Result<bool, StorageError>;
}

/// Typed JSON helpers available on every [`KvStore`]
pub trait KvStoreExt: KvStore {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set_raw(key, &raw)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

/// File-backed store: one `<key>.json` file per key under a base directory
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.trim().is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", sanitize_key(key))))
    }
}

impl KvStore for FileKvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.path_for(key)?.exists())
    }
}

/// In-memory store used as a test double and for ephemeral sessions
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KvStore for MemoryKvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.lock().remove(key).is_some())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.lock().contains_key(key))
    }
}

/// Map a storage key to a safe file name
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Blob {
        codes: Vec<String>,
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf()).unwrap();

        let blob = Blob {
            codes: vec!["110022".to_string(), "161725".to_string()],
        };
        store.set_json("watchlist", &blob).unwrap();

        let loaded: Option<Blob> = store.get_json("watchlist").unwrap();
        assert_eq!(loaded, Some(blob));
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf()).unwrap();

        let loaded: Option<Blob> = store.get_json("holdings").unwrap();
        assert!(loaded.is_none());
        assert!(!store.contains("holdings").unwrap());
    }

    #[test]
    fn test_file_store_overwrite_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf()).unwrap();

        store.set_raw("transactions", "[1]").unwrap();
        store.set_raw("transactions", "[1,2]").unwrap();
        assert_eq!(store.get_raw("transactions").unwrap().unwrap(), "[1,2]");

        assert!(store.remove("transactions").unwrap());
        assert!(!store.remove("transactions").unwrap());
    }

    #[test]
    fn test_sanitized_keys_stay_distinct_files() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf()).unwrap();

        store.set_raw("snapshot:estimate:110022", "a").unwrap();
        store.set_raw("snapshot:history:110022", "b").unwrap();

        assert_eq!(
            store.get_raw("snapshot:estimate:110022").unwrap().unwrap(),
            "a"
        );
        assert_eq!(
            store.get_raw("snapshot:history:110022").unwrap().unwrap(),
            "b"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(
            store.set_raw("  ", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.set_raw("alert_rules", "[]").unwrap();
        assert!(store.contains("alert_rules").unwrap());
        assert!(store.remove("alert_rules").unwrap());
        assert!(store.get_raw("alert_rules").unwrap().is_none());
    }
}
