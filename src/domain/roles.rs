// SPDX-License-Identifier: MPL-2.0
//! User roles and their function permissions.

use std::fmt;
use std::str::FromStr;

use super::functions::FunctionKey;
use crate::error::UnknownKeyError;

string_enum! {
    /// Access tier of a role, shown as a badge next to the role name.
    pub enum RoleLevel {
        Admin => "admin",
        Manager => "manager",
        Employee => "employee",
    }
}

/// Wire token granting access to every function.
pub const WILDCARD_PERMISSION: &str = "all";

/// A single grant held by a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Access to every function.
    All,
    /// Access to one function.
    Function(FunctionKey),
}

impl Permission {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::All => WILDCARD_PERMISSION,
            Permission::Function(key) => key.as_str(),
        }
    }

    #[must_use]
    pub fn covers(self, key: FunctionKey) -> bool {
        match self {
            Permission::All => true,
            Permission::Function(granted) => granted == key,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == WILDCARD_PERMISSION {
            return Ok(Permission::All);
        }
        raw.parse().map(Permission::Function)
    }
}

/// A named role with its level and grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRole {
    pub name: String,
    pub level: RoleLevel,
    pub permissions: Vec<Permission>,
}

impl UserRole {
    pub fn new(name: impl Into<String>, level: RoleLevel, permissions: Vec<Permission>) -> Self {
        Self {
            name: name.into(),
            level,
            permissions,
        }
    }

    /// Whether any grant of this role covers `key`.
    #[must_use]
    pub fn allows(&self, key: FunctionKey) -> bool {
        self.permissions.iter().any(|perm| perm.covers(key))
    }
}

/// Built-in roles: administrator, manager, employee.
#[must_use]
pub fn default_roles() -> Vec<UserRole> {
    use FunctionKey::{Customer, Product, Reports, Sales};

    vec![
        UserRole::new("Administrator", RoleLevel::Admin, vec![Permission::All]),
        UserRole::new(
            "Manager",
            RoleLevel::Manager,
            [Sales, Reports, Customer, Product]
                .into_iter()
                .map(Permission::Function)
                .collect(),
        ),
        UserRole::new(
            "Employee",
            RoleLevel::Employee,
            [Sales, Customer, Product]
                .into_iter()
                .map(Permission::Function)
                .collect(),
        ),
    ]
}
