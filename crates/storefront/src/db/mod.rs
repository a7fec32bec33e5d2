//! Local key-value persistence.
//!
//! The browser application kept its accounts in local storage. This module
//! provides the same shape: a flat map of string keys to string values behind
//! the [`KeyValueStore`] trait, with two backends:
//!
//! - [`FileStore`] - one JSON object file in the data directory
//! - [`MemoryStore`] - in-process map, for tests and throwaway sessions
//!
//! # Keys
//!
//! - `users` - JSON list of registered user records
//! - `loggedInUser` - JSON user record of the active session (absent = logged out)
//!
//! Nothing here is transactional; read-modify-write sequences are serialized
//! by the account service, and only within one process.

pub mod users;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A flat string-to-string store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

    /// Delete a key. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Store backed by a single JSON object file.
///
/// The file is re-read on every access so separate processes see each other's
/// writes, and rewritten whole (temp file + rename) on every change. Two
/// processes writing at once still race; the later rename wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// File name used inside the data directory.
    pub const FILE_NAME: &'static str = "local-storage.json";

    /// Open (lazily) the store file inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::at(data_dir.join(Self::FILE_NAME))
    }

    /// Open (lazily) the store at an explicit file path.
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the whole map. A missing file is empty; a corrupt file is logged
    /// and treated as empty, like unreadable local storage.
    fn load(&self) -> Result<BTreeMap<String, String>, RepositoryError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Local store is corrupt, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), RepositoryError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
            file.write_all(json.as_bytes())
                .and_then(|()| file.sync_all())
                .map_err(|e| self.io_error(e))?;
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Local store written");
        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        change(&mut entries);
        self.persist(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
