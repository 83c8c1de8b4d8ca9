// SPDX-License-Identifier: MPL-2.0
//! `smartpos_settings` is the settings core of the SmartPOS admin panel.
//!
//! It owns one settings document (company profile, branding, enabled
//! functions, interface preferences and user roles), merges persisted data
//! over factory defaults, validates every field, and keeps a key-value slot
//! in sync. Exports and imports use the same JSON document.
//!
//! # Layers
//!
//! - [`domain`]: settings types and defaults, free of I/O and serde
//! - [`application`]: the [`Storage`](application::port::Storage) port and
//!   the [`SettingsStore`](application::store::SettingsStore)
//! - [`infrastructure`]: file and in-memory storage
//! - [`ui`]: form and dashboard projections of the settings
//! - [`app`]: the command-line host

#![doc(html_root_url = "https://docs.rs/smartpos_settings/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
