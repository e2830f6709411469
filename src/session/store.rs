//! Durable key/value backends for the session identifier.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};
use thiserror::Error;

pub const STATE_DIR_ENV: &str = "FLEXAI_STATE_DIR";
const STATE_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Returns whether an entry was removed.
    fn remove(&self, key: &str) -> StoreResult<bool>;
    fn name(&self) -> &'static str;
}

/// Process-local store. Durable for the lifetime of the value.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(key).is_some())
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Never holds anything; writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSessionStore;

impl NullSessionStore {
    pub fn new() -> Self {
        Self
    }
}

impl SessionStore for NullSessionStore {
    fn get(&self, _: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }
    fn set(&self, _: &str, _: &str) -> StoreResult<()> {
        Ok(())
    }
    fn remove(&self, _: &str) -> StoreResult<bool> {
        Ok(false)
    }
    fn name(&self) -> &'static str {
        "null"
    }
}

/// JSON object file of string entries.
///
/// Writes go through a sibling temp file and a rename, so a crash never leaves a half-written file.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `$FLEXAI_STATE_DIR/session.json`, else `<local data dir>/flexai/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        let dir = std::env::var_os(STATE_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|d| d.join("flexai")))?;
        Some(dir.join(STATE_FILE))
    }

    /// Store at [`Self::default_path`].
    pub fn open_default() -> StoreResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| StoreError::Unavailable("no local data directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
