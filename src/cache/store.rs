//! Persistent key-value stores backing the image cache
//!
//! The cache serializes its whole contents into one JSON string stored under a
//! single key. [`FileStore`] keeps each key in its own file inside an
//! XDG-compliant cache directory; [`MemoryStore`] keeps everything in memory
//! and is what tests use. Both can be given a byte quota to model a storage
//! medium that runs out of space.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by a key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value does not fit in the remaining storage capacity
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Reading from or writing to the backing medium failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The value could not be encoded for storage
    #[error("Failed to encode value: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the failure is due to storage capacity
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

/// A string-valued persistent key-value store
///
/// `set` may fail with [`StoreError::QuotaExceeded`] when the medium is full.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`; removing a missing key succeeds
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

fn check_quota(quota: Option<usize>, needed: usize) -> Result<(), StoreError> {
    match quota {
        Some(limit) if needed > limit => Err(StoreError::QuotaExceeded { needed, limit }),
        _ => Ok(()),
    }
}

/// Stores values as files in a cache directory
///
/// Each key maps to `<cache_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where values are stored
    cache_dir: PathBuf,
    /// Maximum size of a single stored value in bytes
    quota: Option<usize>,
}

impl FileStore {
    /// Creates a new FileStore using the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/dogtale/` on Linux, or the equivalent path on other platforms.
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "dogtale")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self::with_dir(cache_dir))
    }

    /// Creates a new FileStore with a custom directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            quota: None,
        }
    }

    /// Limits the size of any single stored value
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Directory holding the stored files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_quota(self.quota, value.len())?;
        fs::create_dir_all(&self.cache_dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, isolated per instance
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    /// Maximum total bytes across all stored values
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `bytes` bytes in total
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn with_values<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        match self.values.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.with_values(|values| values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let quota = self.quota;
        self.with_values(|values| {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            check_quota(quota, others + value.len())?;
            values.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_values(|values| values.remove(key));
        Ok(())
    }
}
