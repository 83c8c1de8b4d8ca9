// SPDX-License-Identifier: MPL-2.0
//! Default values for the host configuration file.

// ==========================================================================
// Storage Defaults
// ==========================================================================

/// Slot key, which is also the file stem of the settings slot.
pub const DEFAULT_STORAGE_KEY: &str = crate::infrastructure::storage::DEFAULT_SLOT_KEY;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// `tracing` filter directive used when neither the file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";

// ==========================================================================
// Export Defaults
// ==========================================================================

/// File name suggested for exported snapshots.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "smartpos-settings.json";
