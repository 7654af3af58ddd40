use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable - {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not a string map - {0}")]
    Format(#[from] serde_json::Error),

    #[error("Quota exceeded: writing {requested} bytes would exceed the {quota} byte limit")]
    QuotaExceeded { requested: usize, quota: usize },
}

pub type StorageResult<T> = anyhow::Result<T, StorageError>;

/// String key-value store the account list is persisted into
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites whatever is stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-process storage, the equivalent of browser local storage for one session.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would push the total of keys and values past `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let requested = self.used_without(key) + key.len() + value.len();
            if requested > quota {
                return Err(StorageError::QuotaExceeded { requested, quota });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage kept in a JSON file holding an object of string values.
/// A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&data)?)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let mut items = self.read_all()?;
        Ok(items.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        // Write next to the target and rename so a failed write leaves the old file intact
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&items)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!("wrote key {key} to {}", self.path.display());
        Ok(())
    }
}
