// SPDX-License-Identifier: MPL-2.0
//! Built-in default values for the settings aggregate.
//!
//! This module is the single source of truth for factory settings. A fresh
//! installation, a reset, and every field discarded during a merge end up
//! with these values.

// ==========================================================================
// Company Defaults
// ==========================================================================

pub const DEFAULT_COMPANY_NAME: &str = "Xyz Computers";

pub const DEFAULT_COMPANY_EMAIL: &str = "info@xyzcomputers.com";

pub const DEFAULT_COMPANY_PHONE: &str = "+1 (555) 123-4567";

pub const DEFAULT_COMPANY_ADDRESS: &str = "123 Business Street, City, State 12345";

/// ISO 4217 code of the default currency.
pub const DEFAULT_CURRENCY: &str = "USD";

/// IANA identifier of the default timezone.
pub const DEFAULT_TIMEZONE: &str = "UTC";

// ==========================================================================
// Branding Defaults
// ==========================================================================

pub const DEFAULT_PRIMARY_COLOR: &str = "#0D6EFD";

pub const DEFAULT_SECONDARY_COLOR: &str = "#6C757D";

pub const DEFAULT_SUCCESS_COLOR: &str = "#198754";

pub const DEFAULT_WARNING_COLOR: &str = "#FFC107";

/// Largest accepted logo payload (2 MiB).
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

// ==========================================================================
// Presentation Defaults
// ==========================================================================

/// Product name appended to the page title.
pub const PRODUCT_NAME: &str = "SmartPOS";
