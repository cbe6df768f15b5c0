//! Namespaced key-value storage persisted to a JSON file.
//!
//! The panel remembers small bits of state between runs (recent
//! queries, whether the advanced options were open). Keys are
//! namespaced as `namespace:key` inside a single JSON document so
//! several features can share one file without colliding.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not determine data directory")]
    NoDataDir,
}

/// A namespaced view over one JSON-backed key-value file.
pub struct Storage {
    namespace: String,
    path: PathBuf,
}

impl Storage {
    /// Open the default storage file under the user data directory.
    pub fn open(namespace: &str) -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("ticketscout");
        fs::create_dir_all(&dir)?;
        Ok(Self::with_path(namespace, dir.join("storage.json")))
    }

    /// Open storage at an explicit path. Used by tests.
    pub fn with_path(namespace: &str, path: impl AsRef<Path>) -> Self {
        Self {
            namespace: namespace.to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the value stored under `key`, if any. Deserialization
    /// failures are treated as absent values rather than errors, so a
    /// schema change never wedges the app.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let document = self.read_document().ok()?;
        let value = document.get(&self.qualified(key))?.clone();
        serde_json::from_value(value).ok()
    }

    /// Store `value` under `key`, creating the file if needed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut document = self.read_document().unwrap_or_default();
        document.insert(self.qualified(key), serde_json::to_value(value)?);
        self.write_document(&document)
    }

    /// Store several values at once under their respective keys.
    pub fn set_all(&self, values: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let mut document = self.read_document().unwrap_or_default();
        for (key, value) in values {
            document.insert(self.qualified(key), value.clone());
        }
        self.write_document(&document)
    }

    fn qualified(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    fn read_document(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_document(&self, document: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(document)?)?;
        Ok(())
    }
}
