//! `KeyValueStore` implementations.
//!
//! - `JsonFileStore`: one JSON file per key, written atomically.
//! - `MemoryStore`: process-local map for ephemeral sessions and tests.

use super::persistence::{load_state, save_state};
use aura::{KeyValueStore, PersistenceError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

// Errors come back keyed by file path; rewrite them to the logical key.
fn rekey(key: &str, err: PersistenceError) -> PersistenceError {
    match err {
        PersistenceError::Io { source, .. } => PersistenceError::Io {
            key: key.to_string(),
            source,
        },
        PersistenceError::Corrupt { source, .. } => PersistenceError::Corrupt {
            key: key.to_string(),
            source,
        },
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        load_state(&self.path_for(key)).map_err(|e| rekey(key, e))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        save_state(&self.path_for(key), value).map_err(|e| rekey(key, e))
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, bypassing the trait (handy for restoring fixtures).
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
