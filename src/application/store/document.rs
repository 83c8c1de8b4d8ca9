// SPDX-License-Identifier: MPL-2.0
//! Serde layout of the settings document.
//!
//! The persisted blob and exported snapshots share this camelCase layout.
//! Fields are written in declaration order, which is the order the admin
//! panel has always produced: `company`, `branding`, `functions`, `ui`,
//! `users`, with functions in catalog order.
//!
//! Reading is tolerant. Every section and leaf is optional, and a value of
//! the wrong JSON type is captured as [`Leaf::Invalid`] instead of failing
//! the whole document, so the merge can report it by field path.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::settings::Settings;

use super::patch::TaxRateInput;

/// A document value that may have the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Leaf<T> {
    Valid(T),
    Invalid(Value),
}

fn valid<T>(value: T) -> Option<Leaf<T>> {
    Some(Leaf::Valid(value))
}

/// Keeps an explicit `null` apart from a missing field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Sections
// =============================================================================

/// Root of the settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub company: Option<Leaf<CompanyDocument>>,
    pub branding: Option<Leaf<BrandingDocument>>,
    pub functions: Option<Leaf<FunctionsDocument>>,
    pub ui: Option<Leaf<UiDocument>>,
    pub users: Option<Leaf<UsersDocument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyDocument {
    pub name: Option<Leaf<String>>,
    pub email: Option<Leaf<String>>,
    pub phone: Option<Leaf<String>>,
    pub address: Option<Leaf<String>>,
    #[serde(rename = "type")]
    pub business_type: Option<Leaf<String>>,
    pub currency: Option<Leaf<String>>,
    pub tax_rate: Option<Leaf<TaxRateInput>>,
    pub timezone: Option<Leaf<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingDocument {
    /// `Some(None)` is an explicit `null`, which removes the logo.
    #[serde(deserialize_with = "explicit_null")]
    pub logo: Option<Option<Leaf<String>>>,
    pub colors: Option<Leaf<ColorsDocument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsDocument {
    pub primary: Option<Leaf<String>>,
    pub secondary: Option<Leaf<String>>,
    pub success: Option<Leaf<String>>,
    pub warning: Option<Leaf<String>>,
}

/// Function entries keyed by wire name, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionsDocument(pub Vec<(String, FunctionDocument)>);

/// One function entry: `{ "enabled": bool, ... }`, or a bare bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionDocument {
    Flag(bool),
    Entry(FunctionEntryDocument),
    Invalid(Value),
}

/// Display metadata is written for readers of the file but never read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionEntryDocument {
    pub enabled: Option<Leaf<bool>>,
    #[serde(skip_deserializing)]
    pub name: String,
    #[serde(skip_deserializing)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiDocument {
    pub sidebar_mode: Option<Leaf<String>>,
    pub theme: Option<Leaf<String>>,
    pub dashboard_layout: Option<Leaf<String>>,
    pub animation_speed: Option<Leaf<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersDocument {
    pub roles: Option<Leaf<Vec<Leaf<RoleDocument>>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleDocument {
    pub name: Option<Leaf<String>>,
    pub level: Option<Leaf<String>>,
    pub permissions: Option<Leaf<Vec<Leaf<String>>>>,
}

// =============================================================================
// Ordered function map
// =============================================================================

impl Serialize for FunctionsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, entry) in &self.0 {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FunctionsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = FunctionsDocument;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of function entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, FunctionDocument>()? {
                    entries.push(entry);
                }
                Ok(FunctionsDocument(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

// =============================================================================
// Writing
// =============================================================================

impl SettingsDocument {
    /// The full document for `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let company = &settings.company;
        let branding = &settings.branding;
        let colors = &branding.colors;
        let ui = &settings.ui;

        let functions = settings
            .functions
            .entries()
            .map(|entry| {
                let document = FunctionEntryDocument {
                    enabled: valid(entry.enabled),
                    name: entry.name.to_string(),
                    description: entry.description.to_string(),
                };
                (entry.key.as_str().to_string(), FunctionDocument::Entry(document))
            })
            .collect();

        let roles = settings
            .users
            .roles
            .iter()
            .map(|role| {
                Leaf::Valid(RoleDocument {
                    name: valid(role.name.clone()),
                    level: valid(role.level.as_str().to_string()),
                    permissions: valid(
                        role.permissions
                            .iter()
                            .map(|permission| Leaf::Valid(permission.as_str().to_string()))
                            .collect(),
                    ),
                })
            })
            .collect();

        Self {
            company: valid(CompanyDocument {
                name: valid(company.name.clone()),
                email: valid(company.email.clone()),
                phone: valid(company.phone.clone()),
                address: valid(company.address.clone()),
                business_type: valid(company.business_type.as_str().to_string()),
                currency: valid(company.currency.clone()),
                tax_rate: valid(TaxRateInput::Number(company.tax_rate.value())),
                timezone: valid(company.timezone.clone()),
            }),
            branding: valid(BrandingDocument {
                logo: Some(
                    branding
                        .logo
                        .as_ref()
                        .map(|logo| Leaf::Valid(logo.to_data_url())),
                ),
                colors: valid(ColorsDocument {
                    primary: valid(colors.primary.as_str().to_string()),
                    secondary: valid(colors.secondary.as_str().to_string()),
                    success: valid(colors.success.as_str().to_string()),
                    warning: valid(colors.warning.as_str().to_string()),
                }),
            }),
            functions: valid(FunctionsDocument(functions)),
            ui: valid(UiDocument {
                sidebar_mode: valid(ui.sidebar_mode.as_str().to_string()),
                theme: valid(ui.theme.as_str().to_string()),
                dashboard_layout: valid(ui.dashboard_layout.as_str().to_string()),
                animation_speed: valid(ui.animation_speed.as_str().to_string()),
            }),
            users: valid(UsersDocument {
                roles: valid(roles),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> SettingsDocument {
        serde_json::from_value(value).expect("documents always deserialize")
    }

    #[test]
    fn wrong_types_are_captured_not_fatal() {
        let document = parse(json!({
            "company": { "name": 42, "email": "a@b.c" },
            "ui": "dark"
        }));
        let Some(Leaf::Valid(company)) = document.company else {
            panic!("company should be an object");
        };
        assert_eq!(company.name, Some(Leaf::Invalid(json!(42))));
        assert_eq!(company.email, Some(Leaf::Valid("a@b.c".to_string())));
        assert_eq!(document.ui, Some(Leaf::Invalid(json!("dark"))));
    }

    #[test]
    fn logo_null_differs_from_missing() {
        let explicit = parse(json!({ "branding": { "logo": null } }));
        let missing = parse(json!({ "branding": {} }));
        let logo = |document: SettingsDocument| match document.branding {
            Some(Leaf::Valid(branding)) => branding.logo,
            other => panic!("unexpected branding {other:?}"),
        };
        assert_eq!(logo(explicit), Some(None));
        assert_eq!(logo(missing), None);
    }

    #[test]
    fn function_entries_keep_document_order() {
        let document = parse(json!({ "functions": { "sales": true, "hrm": { "enabled": false } } }));
        let Some(Leaf::Valid(FunctionsDocument(entries))) = document.functions else {
            panic!("functions should be a map");
        };
        // serde_json maps are sorted, so `hrm` arrives first.
        assert_eq!(entries[0].0, "hrm");
        assert!(matches!(entries[1].1, FunctionDocument::Flag(true)));
    }

    #[test]
    fn written_document_follows_section_order() {
        let text = serde_json::to_string(&SettingsDocument::from_settings(&Settings::default()))
            .expect("serializes");
        let positions: Vec<_> = ["\"company\"", "\"branding\"", "\"functions\"", "\"ui\"", "\"users\""]
            .iter()
            .map(|key| text.find(key).expect("section present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.starts_with(r#"{"company":{"name":"Xyz Computers","email""#));
    }
}
