//! SessionStore - key/value persistence for the client session.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    LockPoisoned(&'static str),
    Io(String),
    Serde(String),
}

impl fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStoreError::LockPoisoned(operation) => {
                write!(f, "session store lock poisoned during {}", operation)
            }
            SessionStoreError::Io(msg) => write!(f, "session store io error: {}", msg),
            SessionStoreError::Serde(msg) => write!(f, "session store encoding error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// String key/value storage for the session user and token.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

/// Process-local store; forgets everything on exit.
#[derive(Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| SessionStoreError::LockPoisoned("read"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;
        values.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| SessionStoreError::Io(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| SessionStoreError::Serde(e.to_string()))
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| SessionStoreError::Io(e.to_string()))?;
            }
        }
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| SessionStoreError::Serde(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| SessionStoreError::Io(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let _guard = self
            .lock
            .read()
            .map_err(|_| SessionStoreError::LockPoisoned("read"))?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}
