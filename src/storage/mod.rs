//! Key/value blob stores backing settings and inventory persistence.
//!
//! Writers are fire-and-forget: [`persist_json`] logs a failed save and
//! returns, leaving the in-memory state as the source of truth.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;

/// String blobs under string keys
pub trait BlobStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let blobs = self.blobs.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().map_err(|_| StoreError::Poisoned)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Creates the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file and renames it over the target.
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Serialize `value` and save it under `key`. Failures are logged.
pub fn persist_json<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) -> bool {
    let blob = match serde_json::to_string(value) {
        Ok(blob) => blob,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize state for persistence");
            return false;
        }
    };
    match store.save(key, &blob) {
        Ok(()) => {
            debug!(key, bytes = blob.len(), "persisted");
            true
        }
        Err(e) => {
            warn!(key, error = %e, "persist failed; keeping in-memory state");
            false
        }
    }
}

/// Load and parse the blob under `key`.
///
/// Missing, unreadable and malformed blobs all come back as `None`; the
/// latter two are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Option<T> {
    let blob = match store.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "blob store read failed; starting empty");
            return None;
        }
    };
    match serde_json::from_str(&blob) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "malformed persisted state; starting empty");
            None
        }
    }
}
