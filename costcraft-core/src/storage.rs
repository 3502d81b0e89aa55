//! Key-value storage abstraction behind the record store.
//!
//! The persistence layer is injected so the store and workflow can be tested
//! against [`MemoryStorage`] without touching the filesystem.

use crate::error::CostcraftError;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal string key-value contract: `get` / `set` / `remove`.
pub trait KeyValueStorage {
    /// Returns the stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, CostcraftError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CostcraftError>;

    /// Removes `key`. Removing an absent key is a successful no-op.
    fn remove(&mut self, key: &str) -> Result<(), CostcraftError>;
}

/// File-backed storage: each key lives in `<root>/<key>.json`.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, CostcraftError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| CostcraftError::Storage(root.display().to_string(), e))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CostcraftError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CostcraftError::Storage(key.to_string(), e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CostcraftError> {
        fs::write(self.path_for(key), value)
            .map_err(|e| CostcraftError::Storage(key.to_string(), e))
    }

    fn remove(&mut self, key: &str) -> Result<(), CostcraftError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CostcraftError::Storage(key.to_string(), e)),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CostcraftError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CostcraftError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CostcraftError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage whose writes can be made to fail on demand, for exercising the
/// write-failure paths of the store and wizard.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStorage {
    inner: MemoryStorage,
    pub(crate) fail_writes: bool,
}

#[cfg(test)]
impl FailingStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CostcraftError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CostcraftError> {
        if self.fail_writes {
            return Err(CostcraftError::Storage(
                key.to_string(),
                io::Error::new(io::ErrorKind::Other, "storage quota exceeded"),
            ));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), CostcraftError> {
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);
        storage.set("greeting", "hello").unwrap();
        assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hello"));
        storage.remove("greeting").unwrap();
        assert_eq!(storage.get("greeting").unwrap(), None);
        // Removing an absent key is fine.
        storage.remove("greeting").unwrap();
    }
}
