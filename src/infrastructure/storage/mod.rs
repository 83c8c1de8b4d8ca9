// SPDX-License-Identifier: MPL-2.0
//! [`Storage`](crate::application::port::Storage) adapters.

mod file;
mod memory;

pub use file::{FileStorage, DEFAULT_SLOT_KEY, LEGACY_SLOT_KEY};
pub use memory::MemoryStorage;
