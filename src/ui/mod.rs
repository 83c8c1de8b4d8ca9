// SPDX-License-Identifier: MPL-2.0
//! Presentation projections of the settings.
//!
//! Rendering itself belongs to the host; these types are the pure data a
//! renderer needs, derived from the current settings after each change.
//!
//! - [`form`] - Settings form inputs and the patch they submit
//! - [`dashboard`] - Page title, color theme, and menu state

pub mod dashboard;
pub mod form;

pub use dashboard::{DashboardView, MenuEntry};
pub use form::{FormField, FormFields};
