// SPDX-License-Identifier: MPL-2.0
//! The settings store.
//!
//! [`SettingsStore`] is the single owner of the current [`Settings`]. It
//! merges persisted data over defaults, applies patches, writes the result to
//! an injected [`Storage`] slot, and tells subscribers about every change.
//!
//! # Example
//!
//! ```ignore
//! use smartpos_settings::application::store::{PartialSettings, SettingsStore};
//! use smartpos_settings::infrastructure::storage::MemoryStorage;
//!
//! let mut store = SettingsStore::open(MemoryStorage::new());
//! store.subscribe(|event, settings| println!("{event:?}: {}", settings.page_title()));
//!
//! let mut patch = PartialSettings::default();
//! patch.company.tax_rate = Some("18".into());
//! let report = store.save(patch)?;
//! assert!(report.rejected.is_empty());
//! ```

pub mod document;
mod events;
mod merge;
mod patch;
pub mod snapshot;

pub use document::SettingsDocument;
pub use events::{Listener, SettingsEvent, SubscriptionId};
pub use merge::apply_patch;
pub use patch::{
    BrandingPatch, ColorsPatch, CompanyPatch, LogoPatch, PartialSettings, RolePatch, TaxRateInput,
    UiPatch,
};

use events::Subscribers;

use crate::application::port::{Storage, StorageError};
use crate::domain::functions::FunctionKey;
use crate::domain::settings::{LogoImage, Settings};
use crate::error::{
    CorruptPersistedState, ExportError, ImportError, LogoError, PersistFailure, UnknownKeyError,
    ValidationError,
};

// =============================================================================
// Reports
// =============================================================================

/// Outcome of [`SettingsStore::load_with_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// The settings now current.
    pub settings: Settings,
    /// Persisted fields that failed validation and were defaulted.
    pub discarded: Vec<ValidationError>,
    /// Set when the slot held something that is not a settings document.
    pub corruption: Option<CorruptPersistedState>,
    /// Set when the slot could not be read at all.
    pub storage_error: Option<StorageError>,
}

impl LoadReport {
    /// Whether the persisted data was used without loss.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty() && self.corruption.is_none() && self.storage_error.is_none()
    }
}

/// Outcome of a successful [`SettingsStore::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Patch fields that failed validation and were not applied.
    pub rejected: Vec<ValidationError>,
}

/// Outcome of a successful [`SettingsStore::import_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// The settings now current.
    pub settings: Settings,
    /// Snapshot fields that failed validation and were defaulted.
    pub discarded: Vec<ValidationError>,
}

// =============================================================================
// SettingsStore
// =============================================================================

/// Owner of the current settings.
pub struct SettingsStore<S: Storage> {
    storage: S,
    current: Settings,
    subscribers: Subscribers,
}

impl<S: Storage> SettingsStore<S> {
    /// Creates a store holding defaults without touching storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: Settings::default(),
            subscribers: Subscribers::default(),
        }
    }

    /// Creates a store and loads the persisted settings.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Current settings.
    #[must_use]
    pub fn current(&self) -> &Settings {
        &self.current
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Registers a callback run after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(SettingsEvent, &Settings) + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    /// Removes a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    fn notify(&mut self, event: SettingsEvent) {
        self.subscribers.notify(event, &self.current);
    }

    // -------------------------------------------------------------------------
    // Load
    // -------------------------------------------------------------------------

    /// Reloads from storage. Never fails; problems fall back to defaults.
    pub fn load(&mut self) -> Settings {
        self.load_with_report().settings
    }

    /// Like [`load`](Self::load), also reporting what was discarded.
    pub fn load_with_report(&mut self) -> LoadReport {
        let mut settings = Settings::default();
        let mut discarded = Vec::new();
        let mut corruption = None;
        let mut storage_error = None;

        match self.storage.get() {
            Ok(None) => tracing::debug!("no persisted settings, using defaults"),
            Ok(Some(blob)) if blob.iter().all(u8::is_ascii_whitespace) => {
                tracing::debug!("persisted settings slot is empty, using defaults");
            }
            Ok(Some(blob)) => match snapshot::decode(&blob) {
                Ok(document) => {
                    let (patch, mut unreadable) = PartialSettings::from_document(document);
                    unreadable.extend(apply_patch(&mut settings, patch));
                    discarded = unreadable;
                }
                Err(reason) => {
                    let err = CorruptPersistedState { reason };
                    tracing::warn!(%err, "persisted settings are corrupt, using defaults");
                    corruption = Some(err);
                }
            },
            Err(err) => {
                tracing::warn!(%err, "could not read persisted settings, using defaults");
                storage_error = Some(err);
            }
        }

        for err in &discarded {
            tracing::warn!(field = %err.field, reason = %err.reason, "discarded persisted field");
        }

        self.current = settings;
        self.notify(SettingsEvent::Loaded);
        LoadReport {
            settings: self.current.clone(),
            discarded,
            corruption,
            storage_error,
        }
    }

    // -------------------------------------------------------------------------
    // Save / Persist
    // -------------------------------------------------------------------------

    /// Applies the valid part of `patch` and persists the full state.
    ///
    /// # Errors
    ///
    /// Returns [`PersistFailure`] when the write fails. The in-memory state
    /// is updated regardless, and the failure carries the rejected fields.
    pub fn save(&mut self, patch: PartialSettings) -> Result<SaveReport, PersistFailure> {
        let rejected = apply_patch(&mut self.current, patch);
        for err in &rejected {
            tracing::warn!(field = %err.field, reason = %err.reason, "rejected settings field");
        }
        let written = self.write();
        self.notify(SettingsEvent::Saved);
        match written {
            Ok(()) => {
                tracing::debug!(rejected = rejected.len(), "settings saved");
                Ok(SaveReport { rejected })
            }
            Err(source) => Err(PersistFailure { source, rejected }),
        }
    }

    /// Writes the current state without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistFailure`] when the write fails.
    pub fn persist(&mut self) -> Result<(), PersistFailure> {
        self.write().map_err(PersistFailure::new)
    }

    fn write(&mut self) -> Result<(), StorageError> {
        let blob = snapshot::encode(&self.current)
            .map_err(|err| StorageError::Io(format!("cannot encode settings: {err}")))?;
        self.storage.set(&blob).inspect_err(|err| {
            tracing::warn!(%err, bytes = blob.len(), "failed to persist settings");
        })
    }

    // -------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------

    /// Restores and persists defaults. Persistence failures are only logged.
    pub fn reset(&mut self) -> Settings {
        match self.try_reset() {
            Ok(settings) => settings,
            Err(_) => self.current.clone(),
        }
    }

    /// Restores and persists defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PersistFailure`] when the slot cannot be cleared or
    /// rewritten. The in-memory state is defaults either way.
    pub fn try_reset(&mut self) -> Result<Settings, PersistFailure> {
        self.current = Settings::default();
        let removed = self.storage.remove().inspect_err(|err| {
            tracing::warn!(%err, "failed to clear settings slot");
        });
        let written = removed.and_then(|()| self.write());
        tracing::info!("settings reset to defaults");
        self.notify(SettingsEvent::Reset);
        written
            .map(|()| self.current.clone())
            .map_err(PersistFailure::new)
    }

    // -------------------------------------------------------------------------
    // Export / Import
    // -------------------------------------------------------------------------

    /// Pretty JSON of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the document cannot be serialized.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, ExportError> {
        snapshot::encode_pretty(&self.current).map_err(|err| ExportError {
            reason: err.to_string(),
        })
    }

    /// Replaces the settings with a snapshot merged over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Malformed`] when the bytes are not a settings
    /// document, leaving state unchanged, and [`ImportError::Persist`] when
    /// the imported state could not be written.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let document = snapshot::decode(bytes).map_err(|reason| {
            tracing::warn!(%reason, "rejected settings snapshot");
            ImportError::Malformed(reason)
        })?;

        let mut settings = Settings::default();
        let (patch, mut discarded) = PartialSettings::from_document(document);
        discarded.extend(apply_patch(&mut settings, patch));
        for err in &discarded {
            tracing::warn!(field = %err.field, reason = %err.reason, "discarded imported field");
        }

        self.current = settings;
        let written = self.write();
        tracing::info!(discarded = discarded.len(), "settings imported");
        self.notify(SettingsEvent::Imported);
        match written {
            Ok(()) => Ok(ImportReport {
                settings: self.current.clone(),
                discarded,
            }),
            Err(source) => Err(PersistFailure {
                source,
                rejected: discarded,
            }
            .into()),
        }
    }

    // -------------------------------------------------------------------------
    // Functions / Logo
    // -------------------------------------------------------------------------

    /// Flips a function flag in memory and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKeyError`] for a key outside the catalog.
    pub fn toggle_function(&mut self, key: &str) -> Result<bool, UnknownKeyError> {
        let key: FunctionKey = key.parse()?;
        let enabled = self.current.functions.toggle(key);
        tracing::debug!(%key, enabled, "function toggled");
        self.notify(SettingsEvent::FunctionToggled { key, enabled });
        Ok(enabled)
    }

    /// Validates and sets the logo in memory.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError`] when the file is too large or not an image;
    /// the current logo is kept.
    pub fn set_logo(&mut self, bytes: Vec<u8>) -> Result<(), LogoError> {
        let logo = LogoImage::from_bytes(bytes).inspect_err(|err| {
            tracing::warn!(%err, "logo rejected");
        })?;
        tracing::debug!(format = ?logo.format(), bytes = logo.len(), "logo updated");
        self.current.branding.logo = Some(logo);
        self.notify(SettingsEvent::LogoChanged);
        Ok(())
    }

    /// Clears the logo in memory. Returns whether one was set.
    pub fn remove_logo(&mut self) -> bool {
        let had_logo = self.current.branding.logo.take().is_some();
        if had_logo {
            self.notify(SettingsEvent::LogoChanged);
        }
        had_logo
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for SettingsStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("storage", &self.storage)
            .field("current", &self.current)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
