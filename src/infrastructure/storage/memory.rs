// SPDX-License-Identifier: MPL-2.0
//! In-process settings slot.
//!
//! Clones share one slot, so a test can keep a handle and inspect what the
//! store wrote. An optional quota and an always-failing mode reproduce the
//! conditions of a full or disabled browser storage.

use std::cell::RefCell;
use std::rc::Rc;

use crate::application::port::{Storage, StorageError};

#[derive(Debug, Default)]
struct Slot {
    blob: Option<Vec<u8>>,
    quota: Option<usize>,
    unavailable: bool,
}

/// Shared in-memory slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Slot>>,
}

impl MemoryStorage {
    /// An empty slot without quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `blob`.
    #[must_use]
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage.slot.borrow_mut().blob = Some(blob.into());
        storage
    }

    /// An empty slot refusing blobs larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::new();
        storage.slot.borrow_mut().quota = Some(quota);
        storage
    }

    /// A slot on which every call fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.slot.borrow_mut().unavailable = true;
        storage
    }

    /// Switches the failure mode on or off.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.slot.borrow_mut().unavailable = unavailable;
    }

    /// Copy of the stored blob, bypassing the failure mode.
    #[must_use]
    pub fn blob(&self) -> Option<Vec<u8>> {
        self.slot.borrow().blob.clone()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.slot.borrow().unavailable {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self) -> Result<Option<Vec<u8>>, StorageError> {
        self.check_available()?;
        Ok(self.blob())
    }

    fn set(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        self.check_available()?;
        let mut slot = self.slot.borrow_mut();
        if let Some(quota) = slot.quota {
            if blob.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: blob.len(),
                    quota,
                });
            }
        }
        slot.blob = Some(blob.to_vec());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StorageError> {
        self.check_available()?;
        self.slot.borrow_mut().blob = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_is_empty() {
        assert_eq!(MemoryStorage::new().get(), Ok(None));
    }

    #[test]
    fn clones_share_the_slot() {
        let observer = MemoryStorage::new();
        let mut writer = observer.clone();
        writer.set(b"{}").expect("write succeeds");
        assert_eq!(observer.blob().as_deref(), Some(&b"{}"[..]));
        writer.remove().expect("remove succeeds");
        assert_eq!(observer.blob(), None);
    }

    #[test]
    fn quota_rejects_large_blobs_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(4);
        storage.set(b"abcd").expect("fits");
        assert_eq!(
            storage.set(b"abcde"),
            Err(StorageError::QuotaExceeded {
                needed: 5,
                quota: 4
            })
        );
        assert_eq!(storage.get(), Ok(Some(b"abcd".to_vec())));
    }

    #[test]
    fn unavailable_slot_fails_every_call() {
        let mut storage = MemoryStorage::unavailable();
        assert_eq!(storage.get(), Err(StorageError::Unavailable));
        assert_eq!(storage.set(b"x"), Err(StorageError::Unavailable));
        assert_eq!(storage.remove(), Err(StorageError::Unavailable));

        storage.set_unavailable(false);
        assert!(storage.set(b"x").is_ok());
    }

    #[test]
    fn with_blob_prefills() {
        let storage = MemoryStorage::with_blob("{\"ui\":{}}");
        assert_eq!(storage.get(), Ok(Some(b"{\"ui\":{}}".to_vec())));
    }
}
