// SPDX-License-Identifier: MPL-2.0
//! Domain layer - the settings model and its business rules.
//!
//! Types here know nothing about storage, serialization, or presentation.
//! Validation lives in the value types themselves, so a constructed
//! [`Settings`](settings::Settings) is always valid.
//!
//! # Modules
//!
//! - [`functions`]: The fixed catalog of feature functions ([`FunctionKey`](functions::FunctionKey))
//! - [`roles`]: User roles and permission checks ([`UserRole`](roles::UserRole))
//! - [`settings`]: The settings aggregate, its sections, and validated values
//!   ([`TaxRate`](settings::TaxRate), [`HexColor`](settings::HexColor),
//!   [`LogoImage`](settings::LogoImage))

#[macro_use]
mod macros;

pub mod functions;
pub mod roles;
pub mod settings;

use std::fmt;

/// A wire string that does not name any variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    value: String,
    expected: &'static [&'static str],
}

impl UnknownVariant {
    pub(crate) fn new(value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The accepted wire strings.
    #[must_use]
    pub fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not one of: {}",
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}
