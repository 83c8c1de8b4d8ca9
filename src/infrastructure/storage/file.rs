// SPDX-License-Identifier: MPL-2.0
//! File-backed settings slot.
//!
//! The slot `key` lives in `<dir>/<key>.json`. A missing file is an empty
//! slot; the directory is created on first write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::port::{Storage, StorageError};

/// Slot key used by current installations.
pub const DEFAULT_SLOT_KEY: &str = "smartposSettings";

/// Slot key written by older installations.
pub const LEGACY_SLOT_KEY: &str = "smartpos-settings";

const SLOT_EXTENSION: &str = "json";

/// One JSON file holding the settings blob.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    /// Read when `path` does not exist yet.
    fallback: Option<PathBuf>,
}

impl FileStorage {
    /// Opens the slot `key` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when `key` is empty or contains a path
    /// separator.
    pub fn open(dir: impl AsRef<Path>, key: &str) -> Result<Self, StorageError> {
        Ok(Self {
            path: slot_path(dir.as_ref(), key)?,
            fallback: None,
        })
    }

    /// Opens the slot `key`, reading the legacy slot until the first write.
    ///
    /// # Errors
    ///
    /// Same as [`FileStorage::open`].
    pub fn open_with_fallback(dir: impl AsRef<Path>, key: &str) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        let path = slot_path(dir, key)?;
        let legacy = slot_path(dir, LEGACY_SLOT_KEY)?;
        Ok(Self {
            fallback: (legacy != path).then_some(legacy),
            path,
        })
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn slot_path(dir: &Path, key: &str) -> Result<PathBuf, StorageError> {
    let invalid = key.trim().is_empty()
        || key.contains(['/', '\\'])
        || key == "."
        || key == "..";
    if invalid {
        return Err(StorageError::Io(format!("invalid slot key `{key}`")));
    }
    Ok(dir.join(format!("{key}.{SLOT_EXTENSION}")))
}

fn remove_if_exists(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Storage for FileStorage {
    fn get(&self) -> Result<Option<Vec<u8>>, StorageError> {
        if let Some(bytes) = read_if_exists(&self.path)? {
            return Ok(Some(bytes));
        }
        match &self.fallback {
            Some(legacy) => {
                let bytes = read_if_exists(legacy)?;
                if bytes.is_some() {
                    tracing::info!(path = %legacy.display(), "reading settings from legacy slot");
                }
                Ok(bytes)
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Staged write; rename replaces the target atomically.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, blob)?;
        fs::rename(&staging, &self.path)?;
        tracing::debug!(path = %self.path.display(), bytes = blob.len(), "settings slot written");
        Ok(())
    }

    /// Clears the slot and the legacy slot, so old settings cannot
    /// reappear if the next write fails.
    fn remove(&mut self) -> Result<(), StorageError> {
        remove_if_exists(&self.path)?;
        if let Some(legacy) = &self.fallback {
            remove_if_exists(legacy)?;
        }
        Ok(())
    }
}
