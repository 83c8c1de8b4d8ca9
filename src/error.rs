// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy.
//!
//! Each store operation has its own error type so callers can match on
//! exactly what can go wrong there. [`Error`] aggregates them for the host
//! binary. Every type exposes a `notification_key()` for localized lookup and
//! a short `user_message()` suitable for a toast.

use thiserror::Error as ThisError;

use crate::application::port::StorageError;

/// A single field rejected during save, load, or import.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("invalid value for `{field}`: {reason}")]
pub struct ValidationError {
    /// Wire path of the field, e.g. `company.taxRate`.
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        "notification-settings-invalid-field"
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Invalid value for {}.", self.field)
    }
}

/// The persisted slot held data that is not a settings document.
///
/// Never returned as a failure: load logs it and falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("persisted settings are unreadable: {reason}")]
pub struct CorruptPersistedState {
    pub reason: String,
}

impl CorruptPersistedState {
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        "notification-settings-load-error"
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Saved settings could not be read. Defaults were restored."
    }
}

/// Writing the settings slot failed. In-memory state was still updated.
#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("failed to persist settings: {source}")]
pub struct PersistFailure {
    pub source: StorageError,
    /// Fields rejected by the same save, if any.
    pub rejected: Vec<ValidationError>,
}

impl PersistFailure {
    #[must_use]
    pub fn new(source: StorageError) -> Self {
        Self {
            source,
            rejected: Vec::new(),
        }
    }

    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        "notification-settings-save-error"
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Error saving settings!"
    }
}

/// Importing a snapshot failed.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ImportError {
    /// The bytes are not a UTF-8 JSON object. State is unchanged.
    #[error("snapshot is not a settings document: {0}")]
    Malformed(String),
    /// The snapshot was applied but could not be written.
    #[error(transparent)]
    Persist(#[from] PersistFailure),
}

impl ImportError {
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        match self {
            ImportError::Malformed(_) => "notification-settings-import-invalid",
            ImportError::Persist(failure) => failure.notification_key(),
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::Malformed(_) => "Invalid settings file!",
            ImportError::Persist(failure) => failure.user_message(),
        }
    }
}

/// A function key outside the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown function key `{key}`")]
pub struct UnknownKeyError {
    pub key: String,
}

impl UnknownKeyError {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        "notification-function-unknown"
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Unknown function: {}", self.key)
    }
}

/// The current settings could not be turned into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("failed to export settings: {reason}")]
pub struct ExportError {
    pub reason: String,
}

impl ExportError {
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        "notification-settings-export-error"
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Error exporting settings!"
    }
}

/// A logo upload was refused.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LogoError {
    #[error("logo is {size} bytes, limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("logo is not a PNG, JPEG, GIF, WebP, or SVG image")]
    UnsupportedFormat,
    #[error("logo is not a base64 data URL")]
    MalformedDataUrl,
}

impl LogoError {
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        match self {
            LogoError::PayloadTooLarge { .. } => "notification-logo-too-large",
            LogoError::UnsupportedFormat => "notification-logo-unsupported",
            LogoError::MalformedDataUrl => "notification-logo-malformed",
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            LogoError::PayloadTooLarge { .. } => {
                "Logo file too large! Please select a file under 2MB."
            }
            LogoError::UnsupportedFormat => "Logo must be a PNG, JPEG, GIF, WebP, or SVG image.",
            LogoError::MalformedDataUrl => "Logo data is damaged.",
        }
    }
}

/// Crate-level error for the host binary.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("config error: {0}")]
    Config(String),
    /// Bad command-line usage.
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persist(#[from] PersistFailure),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    UnknownKey(#[from] UnknownKeyError),
    #[error(transparent)]
    Logo(#[from] LogoError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "notification-io-error",
            Error::Config(_) => "notification-config-error",
            Error::Usage(_) => "notification-usage-error",
            Error::Validation(err) => err.notification_key(),
            Error::Persist(err) => err.notification_key(),
            Error::Export(err) => err.notification_key(),
            Error::Import(err) => err.notification_key(),
            Error::UnknownKey(err) => err.notification_key(),
            Error::Logo(err) => err.notification_key(),
            Error::Storage(_) => "notification-storage-error",
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(err) => err.user_message(),
            Error::Persist(err) => err.user_message().to_string(),
            Error::Export(err) => err.user_message().to_string(),
            Error::Import(err) => err.user_message().to_string(),
            Error::UnknownKey(err) => err.user_message(),
            Error::Logo(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
