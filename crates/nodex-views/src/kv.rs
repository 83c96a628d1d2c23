//! Key-value persistence backends for view snapshots.

use nodex_core::{Error, Result};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal namespaced JSON storage.
///
/// Keys are fixed namespace strings; values are whole JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, `None` when never written
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-process store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// A single JSON file holding one object whose keys are namespaces.
///
/// Writes go to a hidden sibling `.<name>.tmp` file first and are renamed
/// into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(Error::io(e)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::serialization(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock();
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(Error::Serialization { reason }) => {
                log::warn!("Overwriting unreadable {}: {}", self.path.display(), reason);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(Error::io)?;
        }

        let temp_path = self.temp_path();
        let text = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&temp_path, text).map_err(Error::io)?;
        fs::rename(&temp_path, &self.path).map_err(Error::io)?;

        log::debug!("Persisted key '{}' to {}", key, self.path.display());
        Ok(())
    }
}
