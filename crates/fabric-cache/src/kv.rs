//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::CacheError;

const FILE_EXTENSION: &str = "json";

/// Type-safe cache backed by a directory of JSON files or by memory.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache {
    backend: Backend,
}

#[derive(Debug)]
enum Backend {
    Dir(PathBuf),
    Memory(RwLock<BTreeMap<String, Vec<u8>>>),
}

impl Cache {
    /// Open a file-backed store rooted at `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".fabric")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        debug!(dir = %dir.display(), "opened file store");
        Ok(Self {
            backend: Backend::Dir(dir.to_path_buf()),
        })
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(RwLock::new(BTreeMap::new())),
        }
    }

    /// Directory backing this store, if it is file-backed.
    pub fn dir(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Dir(dir) => Some(dir),
            Backend::Memory(_) => None,
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and a `SerializeError` if the
    /// stored bytes don't parse as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, bytes)
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => match fs::remove_file(key_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => {
                write_lock(map)?.remove(key);
                Ok(())
            }
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => Ok(key_path(dir, key).is_file()),
            Backend::Memory(map) => Ok(read_lock(map)?.contains_key(key)),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        match &self.backend {
            Backend::Dir(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                        continue;
                    }
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        if validate_key(stem).is_ok() {
                            keys.push(stem.to_string());
                        }
                    }
                }
                keys.sort();
                Ok(keys)
            }
            Backend::Memory(map) => Ok(read_lock(map)?.keys().cloned().collect()),
        }
    }

    /// Raw bytes stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => match fs::read(key_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => Ok(read_lock(map)?.get(key).cloned()),
        }
    }

    /// Store raw bytes under `key`.
    ///
    /// File-backed writes go to a temporary sibling first and are renamed into
    /// place, so a crash mid-write leaves the previous value intact.
    pub fn set_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => {
                let path = key_path(dir, key);
                let tmp = dir.join(format!(".{}.{}.tmp", key, FILE_EXTENSION));
                fs::write(&tmp, &bytes)?;
                fs::rename(&tmp, &path)?;
                debug!(key, bytes = bytes.len(), "stored value");
                Ok(())
            }
            Backend::Memory(map) => {
                write_lock(map)?.insert(key.to_string(), bytes);
                Ok(())
            }
        }
    }
}

/// Check that `key` is usable as a storage key.
///
/// Keys are non-empty, don't start with a dot, and only contain ASCII
/// letters, digits, `_`, `-`, `.` and `:`.
pub fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", key, FILE_EXTENSION))
}

fn read_lock(
    map: &RwLock<BTreeMap<String, Vec<u8>>>,
) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
    map.read()
        .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
}

fn write_lock(
    map: &RwLock<BTreeMap<String, Vec<u8>>>,
) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
    map.write()
        .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        quantity: f64,
    }

    #[test]
    fn test_memory_round_trip() {
        let cache = Cache::in_memory();
        let entry = Entry {
            name: "tencel".to_string(),
            quantity: 2.5,
        };

        cache.set("cart", &entry).unwrap();
        assert!(cache.exists("cart").unwrap());
        assert_eq!(cache.get::<Entry>("cart").unwrap(), Some(entry));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        assert_eq!(cache.get::<Entry>("nothing").unwrap(), None);
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_delete_missing_key() {
        let cache = Cache::in_memory();
        assert!(cache.delete("nothing").is_ok());
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", b"{not json".to_vec()).unwrap();
        let result = cache.get::<Entry>("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_key_validation() {
        assert!(validate_key("tx-fabric-cart").is_ok());
        assert!(validate_key("cart:user.1").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn test_memory_keys_sorted() {
        let cache = Cache::in_memory();
        cache.set("b", &1).unwrap();
        cache.set("a", &2).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
