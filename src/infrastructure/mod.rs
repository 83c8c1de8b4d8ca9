// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`storage`]: Settings slots backed by memory or a JSON file
//!   (implement [`Storage`])
//!
//! [`Storage`]: crate::application::port::Storage

pub mod storage;

pub use storage::{FileStorage, MemoryStorage};
