use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;

/// Slot holding the serialized chat history
pub const STORAGE_KEY: &str = "health_assistant_chat_history";

/// Minimal key-value persistence capability.
///
/// Implementations exist for the browser's `localStorage`, a directory of
/// files, and memory.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same slots, so a caller can keep a
/// handle and observe what a state manager wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with one slot already filled
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots().insert(key.to_string(), value.to_string());
        store
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the store, creating `dir` if it doesn't exist
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
                key: dir.display().to_string(),
                source,
            })?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.slot_path(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
