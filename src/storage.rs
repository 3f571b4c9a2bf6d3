//! Persistence port for user state
//!
//! The dashboard persists three small documents (alerts, bookmarks, theme)
//! under fixed string keys, local-storage style: read once at startup,
//! rewritten in full on every relevant state change, no schema version and
//! no migration. The backend is injected so stores never touch ambient
//! global state.

use crate::error::StorageError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// String key-value backend the stores persist through
pub trait StorageBackend: Send + Sync {
    /// Reads the value under a key, `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value under a key
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one document per key under a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates the backing directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
