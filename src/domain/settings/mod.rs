// SPDX-License-Identifier: MPL-2.0
//! The settings aggregate.
//!
//! [`Settings`] is organized into sections mirroring the admin panel tabs:
//! - `company` - Business identity, currency, tax, timezone
//! - `branding` - Logo and brand palette
//! - `functions` - Which business functions are switched on
//! - `ui` - Sidebar, theme, layout, and animation preferences
//! - `users` - Roles and their permissions
//!
//! Every field holds an already-validated value, so a `Settings` is always
//! fully populated and consistent.

pub mod defaults;
pub mod logo;
pub mod newtypes;
pub mod types;

pub use defaults::*;
pub use logo::{ImageFormat, LogoImage};
pub use newtypes::{tax_rate_bounds, HexColor, TaxRate};
pub use types::{AnimationSpeed, BusinessType, ColorRole, DashboardLayout, SidebarMode, ThemeMode};

use super::functions::{FunctionKey, FunctionToggles};
use super::roles::{default_roles, RoleLevel, UserRole};

// =============================================================================
// Section Structs
// =============================================================================

/// Business identity and accounting settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySettings {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub business_type: BusinessType,
    /// Three-letter uppercase currency code.
    pub currency: String,
    pub tax_rate: TaxRate,
    pub timezone: String,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPANY_NAME.to_string(),
            email: DEFAULT_COMPANY_EMAIL.to_string(),
            phone: DEFAULT_COMPANY_PHONE.to_string(),
            address: DEFAULT_COMPANY_ADDRESS.to_string(),
            business_type: BusinessType::Retail,
            currency: DEFAULT_CURRENCY.to_string(),
            tax_rate: TaxRate::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// The four named brand colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandColors {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub success: HexColor,
    pub warning: HexColor,
}

impl BrandColors {
    #[must_use]
    pub fn get(&self, role: ColorRole) -> &HexColor {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Success => &self.success,
            ColorRole::Warning => &self.warning,
        }
    }

    pub fn set(&mut self, role: ColorRole, color: HexColor) {
        match role {
            ColorRole::Primary => self.primary = color,
            ColorRole::Secondary => self.secondary = color,
            ColorRole::Success => self.success = color,
            ColorRole::Warning => self.warning = color,
        }
    }

    /// `(role, color)` pairs in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, &HexColor)> + '_ {
        ColorRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: HexColor::from_static(DEFAULT_PRIMARY_COLOR),
            secondary: HexColor::from_static(DEFAULT_SECONDARY_COLOR),
            success: HexColor::from_static(DEFAULT_SUCCESS_COLOR),
            warning: HexColor::from_static(DEFAULT_WARNING_COLOR),
        }
    }
}

/// Logo and palette.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrandingSettings {
    pub logo: Option<LogoImage>,
    pub colors: BrandColors,
}

/// Presentation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSettings {
    pub sidebar_mode: SidebarMode,
    pub theme: ThemeMode,
    pub dashboard_layout: DashboardLayout,
    pub animation_speed: AnimationSpeed,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            sidebar_mode: SidebarMode::Auto,
            theme: ThemeMode::Light,
            dashboard_layout: DashboardLayout::Grid,
            animation_speed: AnimationSpeed::Normal,
        }
    }
}

/// Role definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub roles: Vec<UserRole>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            roles: default_roles(),
        }
    }
}

// =============================================================================
// Settings Aggregate
// =============================================================================

/// The complete settings of one installation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub company: CompanySettings,
    pub branding: BrandingSettings,
    pub functions: FunctionToggles,
    pub ui: UiSettings,
    pub users: UserSettings,
}

impl Settings {
    /// Whether `key` is switched on.
    #[must_use]
    pub fn is_function_enabled(&self, key: FunctionKey) -> bool {
        self.functions.is_enabled(key)
    }

    /// Whether a user at `level` may open `key`.
    ///
    /// Requires both a role at that level granting the function and the
    /// function itself being enabled.
    #[must_use]
    pub fn role_allows(&self, level: RoleLevel, key: FunctionKey) -> bool {
        self.is_function_enabled(key)
            && self
                .users
                .roles
                .iter()
                .filter(|role| role.level == level)
                .any(|role| role.allows(key))
    }

    /// Title shown in the browser tab / window caption.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("{} - {PRODUCT_NAME}", self.company.name)
    }
}
