//! Durable key-value backends for the session
//!
//! The browser frontend backs this with `window.localStorage`; the terminal
//! front-end uses [`FileStore`], a JSON map on disk.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from a key-value backend
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend cannot be reached (e.g. storage disabled in the browser)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// String key-value storage that survives reloads
pub trait KeyValueStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> SessionResult<()>;
    fn remove(&mut self, key: &str) -> SessionResult<()>;
}

/// Volatile backend for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SessionResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use super::{KeyValueStore, SessionError, SessionResult};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Key-value entries kept in a single JSON object on disk
    ///
    /// Every write rewrites the whole file through a temp file + rename.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        /// Use `path` as the backing file, creating parent directories
        pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
            let path = path.into();
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(Self { path })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        /// Entries to update, starting over if the file is corrupt.
        /// The flag is set when the file must be rewritten regardless.
        fn read_for_update(&self) -> SessionResult<(BTreeMap<String, String>, bool)> {
            match self.read_all() {
                Ok(entries) => Ok((entries, false)),
                Err(SessionError::Serialization(e)) => {
                    tracing::warn!(path = ?self.path, error = %e, "Resetting corrupt session file");
                    Ok((BTreeMap::new(), true))
                }
                Err(e) => Err(e),
            }
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
            let (mut entries, _) = self.read_for_update()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&mut self, key: &str) -> SessionResult<()> {
            let (mut entries, reset) = self.read_for_update()?;
            if entries.remove(key).is_some() || reset {
                self.write_all(&entries)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        assert!(store.is_empty());
        // Removing a missing key is fine
        store.remove("k").unwrap();
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("medfiles_user", "{\"id\":1}").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("medfiles_user").unwrap().as_deref(),
            Some("{\"id\":1}")
        );

        let mut reopened = reopened;
        reopened.remove("medfiles_user").unwrap();
        assert_eq!(FileStore::open(&path).unwrap().get("medfiles_user").unwrap(), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(matches!(store.get("x"), Err(SessionError::Serialization(_))));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_writes_over_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        std::fs::write(&path, r#"{"medfiles_user": tru"#).unwrap();
        let mut store = FileStore::open(&path).unwrap();
        store.remove("medfiles_user").unwrap();
        assert_eq!(store.get("medfiles_user").unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");

        std::fs::write(&path, "not json").unwrap();
        store.set("medfiles_user", "{}").unwrap();
        assert_eq!(store.get("medfiles_user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_error_display() {
        let err = SessionError::Unavailable("localStorage disabled".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: localStorage disabled");
    }
}
