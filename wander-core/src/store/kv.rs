//! Flat JSON key-value store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Errors from the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// A value could not be serialized or deserialized
    #[error("store serialization error: {message}")]
    Serde { message: String },
}

/// A flat key-value store persisted as one JSON object file.
///
/// Every mutation writes the whole file back, which is fine at this
/// scale (a session token, a user, a favorites list). Values are
/// arbitrary JSON; typed access goes through [`get`](Self::get) and
/// [`put`](Self::put).
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl KvStore {
    /// Open a store backed by the given file.
    ///
    /// A missing file is an empty store; a file that exists but cannot
    /// be read or parsed is an error, so callers never silently lose
    /// data they could have recovered.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Serde {
                    message: format!("corrupt store file {:?}: {}", path, e),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {:?}: {}", path, e),
                });
            }
        };

        Ok(Self { path, entries })
    }

    /// Read a typed value. Absent keys are `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StoreError::Serde {
                    message: format!("value under {key:?} has unexpected shape: {e}"),
                }),
        }
    }

    /// Write a typed value and persist.
    pub fn put<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|e| StoreError::Serde {
            message: format!("failed to serialize value for {key:?}: {e}"),
        })?;

        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    /// Remove a key and persist. Returns whether the key was present.
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Remove every key and persist.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to disk, creating parent directories if needed.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("failed to create store directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| StoreError::Serde {
            message: format!("failed to serialize store: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            message: format!("failed to write {:?}: {}", self.path, e),
        })
    }
}
