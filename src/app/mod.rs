// SPDX-License-Identifier: MPL-2.0
//! Command-line host around the settings store.
//!
//! Resolves directories, reads `settings.toml`, installs logging, opens the
//! configured storage slot, and dispatches one [`cli::Command`].

pub mod cli;
pub mod config;
pub mod logging;
pub mod paths;

use crate::application::port::Storage;
use crate::error::{Error, Result};
use crate::infrastructure::storage::{FileStorage, MemoryStorage};

use config::{Config, StorageBackend};

/// Opens the storage slot selected by `config`.
///
/// # Errors
///
/// Returns [`Error::Config`] when no data directory can be resolved, and
/// [`Error::Storage`] when the slot key is not usable as a file name.
pub fn open_storage(config: &Config) -> Result<Box<dyn Storage>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        StorageBackend::File => {
            let dir = config
                .data_dir()
                .ok_or_else(|| Error::Config("could not determine a data directory".into()))?;
            let storage = FileStorage::open_with_fallback(dir, &config.storage.key)?;
            tracing::debug!(path = %storage.path().display(), "using file storage");
            Ok(Box::new(storage))
        }
    }
}
