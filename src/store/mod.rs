use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppResult;

/// Store key holding the transient search draft.
pub const SEARCH_KEY: &str = "search";
/// Store key holding the booking list.
pub const BOOKINGS_KEY: &str = "bookings";

/// An opaque key-value store of JSON values, the persistence boundary of the
/// whole system. Reads and writes are whole-value; there is no locking and no
/// cross-process coordination: last writer wins, single-client assumed.
pub trait Store {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;
}

/// Volatile store for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: a single JSON object document on disk, rewritten in
/// full on every mutation. Survives restarts the way browser local storage
/// survives page loads.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl FileStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let entries = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!("Store file {} unreadable, starting empty: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    fn flush(&self) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        self.flush()
    }
}
