use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Key for the persisted task collection.
pub const TASKS_KEY: &str = "tasks";
/// Key for the persisted Pomodoro statistics record.
pub const STATS_KEY: &str = "pomodoroStats";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value persistence for whole JSON-encoded records.
///
/// Both state machines receive a `Store` instead of reaching for a global
/// data path, so tests can swap in [`MemoryStore`]. Reads fail soft: an
/// absent or unparsable value is reported as `None`, never as an error.
pub trait Store {
    /// Returns the raw persisted string for `key`, or `None` if absent or
    /// unreadable.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Overwrites the value for `key` in full.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value for `key`, if present.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Loads and decodes the record at `key`. An unparsable value is
    /// discarded with a warning and treated as absent.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding unparsable record");
                None
            }
        }
    }

    /// Encodes and fully overwrites the record at `key`.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set_raw(key, &raw)
    }
}

/// File-backed store keeping one pretty-printed `<key>.json` per key.
///
/// The data directory is determined in the following order:
/// 1. `FOCUST_DATA` environment variable.
/// 2. `~/.local/share/focust` (on Linux).
/// 3. `.` (fallback).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        let dir = std::env::var("FOCUST_DATA").map(PathBuf::from).unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("focust");
            p
        });
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        FileStore { dir }
    }

    /// A store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        FileStore { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for FileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        if !path.exists() {
            return None;
        }
        let mut f = match OpenOptions::new().read(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!(key, error = %e, "failed to open record");
                return None;
            }
        };
        let mut s = String::new();
        if let Err(e) = f.read_to_string(&mut s) {
            warn!(key, error = %e, "failed to read record");
            return None;
        }
        Some(s)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(key))?;
        f.write_all(value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests. Clones share the same underlying map, so a
/// component under test and the asserting test see the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}
