// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Infrastructure adapters implement these traits; the store depends only on
//! the trait.
//!
//! # Available Ports
//!
//! - [`storage`]: The persisted settings slot
//!
//! # Design Notes
//!
//! - Traits are synchronous and single-threaded; no `Send + Sync` bounds
//! - Methods return `Result` with port-specific error types

pub mod storage;

pub use storage::{Storage, StorageError};
