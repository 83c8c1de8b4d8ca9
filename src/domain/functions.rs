// SPDX-License-Identifier: MPL-2.0
//! Feature function catalog.
//!
//! The set of business functions an installation can switch on or off is
//! fixed at build time. Each [`FunctionKey`] carries its display metadata and
//! factory default; [`FunctionToggles`] holds the enabled flag for every key
//! and is always fully populated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKeyError;

/// Identifier of a switchable business function.
///
/// Variant order is the display order of the admin function list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionKey {
    Sales,
    Quotation,
    Purchase,
    Warranty,
    Customer,
    Supplier,
    SalesPerson,
    Product,
    Accounting,
    Hrm,
    Salary,
    Gst,
    Loan,
    Reports,
    Sms,
    UserManagement,
    Store,
    Settings,
    StoreChange,
}

impl FunctionKey {
    /// Every function key, in display order.
    pub const ALL: [FunctionKey; 19] = [
        FunctionKey::Sales,
        FunctionKey::Quotation,
        FunctionKey::Purchase,
        FunctionKey::Warranty,
        FunctionKey::Customer,
        FunctionKey::Supplier,
        FunctionKey::SalesPerson,
        FunctionKey::Product,
        FunctionKey::Accounting,
        FunctionKey::Hrm,
        FunctionKey::Salary,
        FunctionKey::Gst,
        FunctionKey::Loan,
        FunctionKey::Reports,
        FunctionKey::Sms,
        FunctionKey::UserManagement,
        FunctionKey::Store,
        FunctionKey::Settings,
        FunctionKey::StoreChange,
    ];

    /// Key used in persisted data and menu `data-section` attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionKey::Sales => "sales",
            FunctionKey::Quotation => "quotation",
            FunctionKey::Purchase => "purchase",
            FunctionKey::Warranty => "warranty",
            FunctionKey::Customer => "customer",
            FunctionKey::Supplier => "supplier",
            FunctionKey::SalesPerson => "salesperson",
            FunctionKey::Product => "product",
            FunctionKey::Accounting => "accounting",
            FunctionKey::Hrm => "hrm",
            FunctionKey::Salary => "salary",
            FunctionKey::Gst => "gst",
            FunctionKey::Loan => "loan",
            FunctionKey::Reports => "reports",
            FunctionKey::Sms => "sms",
            FunctionKey::UserManagement => "usermanagement",
            FunctionKey::Store => "store",
            FunctionKey::Settings => "settings",
            FunctionKey::StoreChange => "storechange",
        }
    }

    /// Human-readable name shown in the function list and menu.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            FunctionKey::Sales => "Sales",
            FunctionKey::Quotation => "Quotation",
            FunctionKey::Purchase => "Purchase",
            FunctionKey::Warranty => "Warranty",
            FunctionKey::Customer => "Customer",
            FunctionKey::Supplier => "Supplier",
            FunctionKey::SalesPerson => "Sales Person",
            FunctionKey::Product => "Product",
            FunctionKey::Accounting => "Accounting",
            FunctionKey::Hrm => "HRM",
            FunctionKey::Salary => "Salary",
            FunctionKey::Gst => "GST Report",
            FunctionKey::Loan => "Loan Management",
            FunctionKey::Reports => "Reports",
            FunctionKey::Sms => "SMS & Email",
            FunctionKey::UserManagement => "User Management",
            FunctionKey::Store => "Store Management",
            FunctionKey::Settings => "Setting",
            FunctionKey::StoreChange => "Store Change",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            FunctionKey::Sales => "Manage sales transactions and invoices",
            FunctionKey::Quotation => "Create and manage customer quotes",
            FunctionKey::Purchase => "Manage purchase orders and inventory",
            FunctionKey::Warranty => "Track product warranties and returns",
            FunctionKey::Customer => "Manage customer information and records",
            FunctionKey::Supplier => "Manage supplier information and contacts",
            FunctionKey::SalesPerson => "Track sales team performance",
            FunctionKey::Product => "Manage product catalog and inventory",
            FunctionKey::Accounting => "Financial management and reporting",
            FunctionKey::Hrm => "Human resource management",
            FunctionKey::Salary => "Payroll and salary management",
            FunctionKey::Gst => "Tax reporting and compliance",
            FunctionKey::Loan => "Manage business loans and financing",
            FunctionKey::Reports => "Business intelligence and analytics",
            FunctionKey::Sms => "Communication management",
            FunctionKey::UserManagement => "System user administration",
            FunctionKey::Store => "Multi-location store management",
            FunctionKey::Settings => "System configuration and settings",
            FunctionKey::StoreChange => "Switch between store locations",
        }
    }

    /// Factory default for the enabled flag.
    #[must_use]
    pub fn enabled_by_default(self) -> bool {
        !matches!(
            self,
            FunctionKey::Hrm
                | FunctionKey::Salary
                | FunctionKey::Loan
                | FunctionKey::Sms
                | FunctionKey::UserManagement
        )
    }

    /// Looks up a key by its wire name. Matching is exact.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionKey {
    type Err = UnknownKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::lookup(key).ok_or_else(|| UnknownKeyError::new(key))
    }
}

// =============================================================================
// FunctionToggles
// =============================================================================

/// One row of the function list: key, metadata, and current flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionEntry {
    pub key: FunctionKey,
    pub name: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

/// Enabled flag for every [`FunctionKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionToggles {
    enabled: BTreeMap<FunctionKey, bool>,
}

impl FunctionToggles {
    #[must_use]
    pub fn is_enabled(&self, key: FunctionKey) -> bool {
        self.enabled
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.enabled_by_default())
    }

    pub fn set(&mut self, key: FunctionKey, enabled: bool) {
        self.enabled.insert(key, enabled);
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self, key: FunctionKey) -> bool {
        let enabled = !self.is_enabled(key);
        self.set(key, enabled);
        enabled
    }

    /// Rows in display order.
    pub fn entries(&self) -> impl Iterator<Item = FunctionEntry> + '_ {
        FunctionKey::ALL.into_iter().map(|key| FunctionEntry {
            key,
            name: key.display_name(),
            description: key.description(),
            enabled: self.is_enabled(key),
        })
    }

    /// Keys that are currently enabled, in display order.
    pub fn enabled_keys(&self) -> impl Iterator<Item = FunctionKey> + '_ {
        FunctionKey::ALL
            .into_iter()
            .filter(|key| self.is_enabled(*key))
    }
}

impl Default for FunctionToggles {
    fn default() -> Self {
        Self {
            enabled: FunctionKey::ALL
                .into_iter()
                .map(|key| (key, key.enabled_by_default()))
                .collect(),
        }
    }
}
