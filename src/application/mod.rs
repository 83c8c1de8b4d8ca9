// SPDX-License-Identifier: MPL-2.0
//! Application layer - the settings use cases.
//!
//! - [`port`]: the [`Storage`](port::Storage) trait infrastructure implements
//! - [`store`]: [`SettingsStore`](store::SettingsStore), which loads, saves,
//!   resets, exports, imports and notifies
//!
//! # Dependency Rule
//!
//! - Application layer depends on the domain layer
//! - Infrastructure implements application ports
//! - The host and UI projections use application services

pub mod port;
pub mod store;
