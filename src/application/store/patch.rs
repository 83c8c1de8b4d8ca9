// SPDX-License-Identifier: MPL-2.0
//! Partial, unvalidated settings input.
//!
//! A [`PartialSettings`] is what callers hand to `save` and what persisted
//! blobs and imported snapshots are parsed into. Every field is optional and
//! carries the raw value; validation happens when the patch is merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::functions::FunctionKey;
use crate::domain::settings::LogoImage;
use crate::error::ValidationError;

use super::document::{
    BrandingDocument, CompanyDocument, FunctionDocument, FunctionsDocument, Leaf,
    SettingsDocument, UiDocument, UsersDocument,
};

// =============================================================================
// Patch Types
// =============================================================================

/// Raw tax rate as typed into a form or found in a document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TaxRateInput {
    Number(f64),
    /// Decimal text such as `"18"`.
    Text(String),
}

impl Serialize for TaxRateInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
        match self {
            // Whole percentages are written as integers, like a form submits them.
            TaxRateInput::Number(value)
                if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT =>
            {
                serializer.serialize_i64(*value as i64)
            }
            TaxRateInput::Number(value) => serializer.serialize_f64(*value),
            TaxRateInput::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl From<f64> for TaxRateInput {
    fn from(value: f64) -> Self {
        TaxRateInput::Number(value)
    }
}

impl From<&str> for TaxRateInput {
    fn from(value: &str) -> Self {
        TaxRateInput::Text(value.to_string())
    }
}

impl From<String> for TaxRateInput {
    fn from(value: String) -> Self {
        TaxRateInput::Text(value)
    }
}

/// Requested change to the logo.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoPatch {
    Remove,
    /// A `data:<mime>;base64,` URL, as persisted.
    DataUrl(String),
    /// An already validated image.
    Image(LogoImage),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub business_type: Option<String>,
    pub currency: Option<String>,
    pub tax_rate: Option<TaxRateInput>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorsPatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandingPatch {
    pub logo: Option<LogoPatch>,
    pub colors: ColorsPatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPatch {
    pub sidebar_mode: Option<String>,
    pub theme: Option<String>,
    pub dashboard_layout: Option<String>,
    pub animation_speed: Option<String>,
}

/// One role as found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub name: String,
    pub level: String,
    pub permissions: Vec<String>,
}

/// A partial settings update.
///
/// `Default` is the empty patch, which changes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSettings {
    pub company: CompanyPatch,
    pub branding: BrandingPatch,
    /// Enabled flags for known keys only.
    pub functions: BTreeMap<FunctionKey, bool>,
    pub ui: UiPatch,
    /// Replaces the whole role list when present.
    pub roles: Option<Vec<RolePatch>>,
}

impl PartialSettings {
    /// Whether the patch touches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reads a settings document.
    ///
    /// Sections and fields are all optional. Values of the wrong JSON type
    /// are reported and skipped; function keys outside the catalog are
    /// ignored. Display metadata stored next to function flags is never
    /// read.
    #[must_use]
    pub fn from_document(document: SettingsDocument) -> (Self, Vec<ValidationError>) {
        let mut reader = DocumentReader::default();
        let patch = Self {
            company: reader.company(document.company),
            branding: reader.branding(document.branding),
            functions: reader.functions(document.functions),
            ui: reader.ui(document.ui),
            roles: reader.roles(document.users),
        };
        (patch, reader.errors)
    }
}

// =============================================================================
// Document Reader
// =============================================================================

const EXPECTED_OBJECT: &str = "expected an object";
const EXPECTED_STRING: &str = "expected a string";

#[derive(Default)]
struct DocumentReader {
    errors: Vec<ValidationError>,
}

impl DocumentReader {
    fn reject(&mut self, field: &str, reason: &str) {
        self.errors.push(ValidationError::new(field, reason));
    }

    /// The value of a present leaf, recording a type mismatch under `path`.
    fn take<T>(&mut self, leaf: Option<Leaf<T>>, path: &str, expected: &str) -> Option<T> {
        match leaf? {
            Leaf::Valid(value) => Some(value),
            Leaf::Invalid(_) => {
                self.reject(path, expected);
                None
            }
        }
    }

    fn text(&mut self, leaf: Option<Leaf<String>>, path: &str) -> Option<String> {
        self.take(leaf, path, EXPECTED_STRING)
    }

    fn company(&mut self, section: Option<Leaf<CompanyDocument>>) -> CompanyPatch {
        let Some(company) = self.take(section, "company", EXPECTED_OBJECT) else {
            return CompanyPatch::default();
        };
        CompanyPatch {
            name: self.text(company.name, "company.name"),
            email: self.text(company.email, "company.email"),
            phone: self.text(company.phone, "company.phone"),
            address: self.text(company.address, "company.address"),
            business_type: self.text(company.business_type, "company.type"),
            currency: self.text(company.currency, "company.currency"),
            tax_rate: self.take(company.tax_rate, "company.taxRate", "expected a number"),
            timezone: self.text(company.timezone, "company.timezone"),
        }
    }

    fn branding(&mut self, section: Option<Leaf<BrandingDocument>>) -> BrandingPatch {
        let Some(branding) = self.take(section, "branding", EXPECTED_OBJECT) else {
            return BrandingPatch::default();
        };
        let logo = match branding.logo {
            None => None,
            Some(None) => Some(LogoPatch::Remove),
            Some(leaf) => self
                .take(leaf, "branding.logo", "expected a data URL or null")
                .map(LogoPatch::DataUrl),
        };
        let colors = match self.take(branding.colors, "branding.colors", EXPECTED_OBJECT) {
            Some(colors) => ColorsPatch {
                primary: self.text(colors.primary, "branding.colors.primary"),
                secondary: self.text(colors.secondary, "branding.colors.secondary"),
                success: self.text(colors.success, "branding.colors.success"),
                warning: self.text(colors.warning, "branding.colors.warning"),
            },
            None => ColorsPatch::default(),
        };
        BrandingPatch { logo, colors }
    }

    fn functions(
        &mut self,
        section: Option<Leaf<FunctionsDocument>>,
    ) -> BTreeMap<FunctionKey, bool> {
        let mut flags = BTreeMap::new();
        let Some(FunctionsDocument(entries)) = self.take(section, "functions", EXPECTED_OBJECT)
        else {
            return flags;
        };
        for (name, entry) in entries {
            let Some(key) = FunctionKey::lookup(&name) else {
                tracing::debug!(key = %name, "ignoring unknown function key");
                continue;
            };
            let path = format!("functions.{name}.enabled");
            let enabled = match entry {
                FunctionDocument::Flag(flag) => Some(flag),
                FunctionDocument::Entry(fields) => {
                    self.take(fields.enabled, &path, "expected a boolean")
                }
                FunctionDocument::Invalid(_) => {
                    self.reject(&path, "expected a boolean");
                    None
                }
            };
            if let Some(flag) = enabled {
                flags.insert(key, flag);
            }
        }
        flags
    }

    fn ui(&mut self, section: Option<Leaf<UiDocument>>) -> UiPatch {
        let Some(ui) = self.take(section, "ui", EXPECTED_OBJECT) else {
            return UiPatch::default();
        };
        UiPatch {
            sidebar_mode: self.text(ui.sidebar_mode, "ui.sidebarMode"),
            theme: self.text(ui.theme, "ui.theme"),
            dashboard_layout: self.text(ui.dashboard_layout, "ui.dashboardLayout"),
            animation_speed: self.text(ui.animation_speed, "ui.animationSpeed"),
        }
    }

    /// One unreadable role drops the whole list.
    fn roles(&mut self, section: Option<Leaf<UsersDocument>>) -> Option<Vec<RolePatch>> {
        let users = self.take(section, "users", EXPECTED_OBJECT)?;
        let entries = self.take(users.roles, "users.roles", "expected an array")?;

        let mut roles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let path = format!("users.roles[{index}]");
            let role = self.take(Some(entry), &path, EXPECTED_OBJECT)?;
            let permissions_path = format!("{path}.permissions");
            let permissions = match role.permissions {
                None => Vec::new(),
                Some(leaf) => {
                    let items = self.take(Some(leaf), &permissions_path, "expected an array")?;
                    let texts: Option<Vec<String>> = items
                        .into_iter()
                        .map(|item| match item {
                            Leaf::Valid(text) => Some(text),
                            Leaf::Invalid(_) => None,
                        })
                        .collect();
                    let Some(texts) = texts else {
                        self.reject(&permissions_path, "expected strings");
                        return None;
                    };
                    texts
                }
            };
            let name = self.text(role.name, &format!("{path}.name"));
            let level = self.text(role.level, &format!("{path}.level"));
            let (Some(name), Some(level)) = (name, level) else {
                self.reject(&path, "a role needs a name and a level");
                return None;
            };
            roles.push(RolePatch {
                name,
                level,
                permissions,
            });
        }
        Some(roles)
    }
}
