// SPDX-License-Identifier: MPL-2.0
//! Settings slot port definition.
//!
//! This module defines the [`Storage`] trait: a single opaque blob slot the
//! settings store reads from and writes to. The store never interprets
//! failures beyond reporting them; it keeps working in memory when the slot
//! is unusable.

use thiserror::Error;

// =============================================================================
// StorageError
// =============================================================================

/// Errors a storage slot can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store cannot be used at all (e.g. disabled or read-only).
    #[error("storage is unavailable")]
    Unavailable,

    /// The blob does not fit in the space granted to the slot.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Size of the rejected blob.
        needed: usize,
        /// Capacity of the slot.
        quota: usize,
    },

    /// Any other backend failure.
    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => StorageError::Unavailable,
            _ => StorageError::Io(err.to_string()),
        }
    }
}

// =============================================================================
// Storage Trait
// =============================================================================

/// Port for the single key-value slot holding persisted settings.
///
/// The slot key is fixed when the adapter is constructed; the store only
/// sees one blob.
///
/// # Example
///
/// ```ignore
/// use smartpos_settings::application::port::Storage;
///
/// fn wipe(storage: &mut impl Storage) {
///     if let Err(err) = storage.remove() {
///         tracing::warn!(%err, "could not clear settings slot");
///     }
/// }
/// ```
pub trait Storage {
    /// Reads the blob, or `None` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is refused or fails.
    fn set(&mut self, blob: &[u8]) -> Result<(), StorageError>;

    /// Clears the slot. Removing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be modified.
    fn remove(&mut self) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get()
    }

    fn set(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        (**self).set(blob)
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        (**self).remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_storage_errors() {
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(StorageError::from(denied), StorageError::Unavailable);

        let other = std::io::Error::other("disk on fire");
        match StorageError::from(other) {
            StorageError::Io(message) => assert!(message.contains("disk on fire")),
            err => panic!("expected Io variant, got {err:?}"),
        }
    }

    #[test]
    fn quota_error_reports_sizes() {
        let err = StorageError::QuotaExceeded {
            needed: 10,
            quota: 4,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: 10 bytes needed, 4 allowed"
        );
    }
}
