// SPDX-License-Identifier: MPL-2.0
//! Field-level merge of a patch into settings.
//!
//! Load, save, and import all go through [`apply_patch`]; they differ only in
//! the base they merge into (defaults for load and import, the current state
//! for save). Each field is validated on its own: a valid value replaces the
//! base value, an invalid one is reported and the base value is kept.

use crate::domain::roles::{Permission, RoleLevel, UserRole};
use crate::domain::settings::{ColorRole, HexColor, LogoImage, Settings, TaxRate};
use crate::error::ValidationError;

use super::patch::{
    BrandingPatch, CompanyPatch, LogoPatch, PartialSettings, RolePatch, TaxRateInput, UiPatch,
};

/// Merges `patch` into `settings`, returning every rejected field.
pub fn apply_patch(settings: &mut Settings, patch: PartialSettings) -> Vec<ValidationError> {
    let mut rejected = Vec::new();

    merge_company(settings, patch.company, &mut rejected);
    merge_branding(settings, patch.branding, &mut rejected);
    for (key, enabled) in patch.functions {
        settings.functions.set(key, enabled);
    }
    merge_ui(settings, patch.ui, &mut rejected);
    if let Some(roles) = patch.roles {
        match parse_roles(roles) {
            Ok(roles) => settings.users.roles = roles,
            Err(err) => rejected.push(err),
        }
    }

    for err in &rejected {
        tracing::debug!(field = %err.field, reason = %err.reason, "field rejected during merge");
    }
    rejected
}

/// Assigns `parse(raw)` to `slot` or records why it failed.
fn merge_field<T, E: ToString>(
    slot: &mut T,
    raw: Option<String>,
    field: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
    rejected: &mut Vec<ValidationError>,
) {
    let Some(raw) = raw else {
        return;
    };
    match parse(&raw) {
        Ok(value) => *slot = value,
        Err(err) => rejected.push(ValidationError::new(field, err.to_string())),
    }
}

fn non_blank(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err("must not be blank")
    } else {
        Ok(trimmed.to_string())
    }
}

fn free_text(raw: &str) -> Result<String, &'static str> {
    Ok(raw.to_string())
}

fn currency_code(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err("must be a three-letter currency code")
    }
}

fn tax_rate(input: &TaxRateInput) -> Result<TaxRate, &'static str> {
    const OUT_OF_RANGE: &str = "must be a number between 0 and 100";
    match input {
        TaxRateInput::Number(value) => TaxRate::new(*value).ok_or(OUT_OF_RANGE),
        TaxRateInput::Text(text) => TaxRate::parse(text).ok_or(OUT_OF_RANGE),
    }
}

fn hex_color(raw: &str) -> Result<HexColor, &'static str> {
    HexColor::parse(raw.trim()).ok_or("must be a #RRGGBB hex color")
}

fn merge_company(settings: &mut Settings, patch: CompanyPatch, rejected: &mut Vec<ValidationError>) {
    let company = &mut settings.company;
    merge_field(&mut company.name, patch.name, "company.name", non_blank, rejected);
    merge_field(&mut company.email, patch.email, "company.email", free_text, rejected);
    merge_field(&mut company.phone, patch.phone, "company.phone", free_text, rejected);
    merge_field(&mut company.address, patch.address, "company.address", free_text, rejected);
    merge_field(
        &mut company.business_type,
        patch.business_type,
        "company.type",
        str::parse,
        rejected,
    );
    merge_field(&mut company.currency, patch.currency, "company.currency", currency_code, rejected);
    if let Some(input) = patch.tax_rate {
        match tax_rate(&input) {
            Ok(rate) => company.tax_rate = rate,
            Err(reason) => rejected.push(ValidationError::new("company.taxRate", reason)),
        }
    }
    merge_field(&mut company.timezone, patch.timezone, "company.timezone", non_blank, rejected);
}

fn merge_branding(
    settings: &mut Settings,
    patch: BrandingPatch,
    rejected: &mut Vec<ValidationError>,
) {
    let branding = &mut settings.branding;
    match patch.logo {
        None => {}
        Some(LogoPatch::Remove) => branding.logo = None,
        Some(LogoPatch::Image(image)) => branding.logo = Some(image),
        Some(LogoPatch::DataUrl(url)) => match LogoImage::from_data_url(&url) {
            Ok(image) => branding.logo = Some(image),
            Err(err) => rejected.push(ValidationError::new("branding.logo", err.to_string())),
        },
    }

    let colors = patch.colors;
    for (role, raw) in [
        (ColorRole::Primary, colors.primary),
        (ColorRole::Secondary, colors.secondary),
        (ColorRole::Success, colors.success),
        (ColorRole::Warning, colors.warning),
    ] {
        let Some(raw) = raw else {
            continue;
        };
        match hex_color(&raw) {
            Ok(color) => branding.colors.set(role, color),
            Err(reason) => rejected.push(ValidationError::new(
                format!("branding.colors.{}", role.as_str()),
                reason,
            )),
        }
    }
}

fn merge_ui(settings: &mut Settings, patch: UiPatch, rejected: &mut Vec<ValidationError>) {
    let ui = &mut settings.ui;
    merge_field(&mut ui.sidebar_mode, patch.sidebar_mode, "ui.sidebarMode", str::parse, rejected);
    merge_field(&mut ui.theme, patch.theme, "ui.theme", str::parse, rejected);
    merge_field(
        &mut ui.dashboard_layout,
        patch.dashboard_layout,
        "ui.dashboardLayout",
        str::parse,
        rejected,
    );
    merge_field(
        &mut ui.animation_speed,
        patch.animation_speed,
        "ui.animationSpeed",
        str::parse,
        rejected,
    );
}

/// The role list is one field: a single bad entry rejects it whole.
fn parse_roles(roles: Vec<RolePatch>) -> Result<Vec<UserRole>, ValidationError> {
    roles
        .into_iter()
        .enumerate()
        .map(|(index, role)| {
            let path = format!("users.roles[{index}]");
            let name = non_blank(&role.name)
                .map_err(|reason| ValidationError::new(format!("{path}.name"), reason))?;
            let level: RoleLevel = role
                .level
                .parse()
                .map_err(|err: crate::domain::UnknownVariant| {
                    ValidationError::new(format!("{path}.level"), err.to_string())
                })?;
            let permissions = role
                .permissions
                .iter()
                .map(|raw| raw.parse::<Permission>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| ValidationError::new(format!("{path}.permissions"), err.to_string()))?;
            Ok(UserRole::new(name, level, permissions))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::functions::FunctionKey;
    use crate::domain::settings::{BusinessType, ThemeMode};
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    use crate::application::store::ColorsPatch;

    fn company(patch: CompanyPatch) -> PartialSettings {
        PartialSettings {
            company: patch,
            ..PartialSettings::default()
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut settings = Settings::default();
        let rejected = apply_patch(&mut settings, PartialSettings::default());
        assert!(rejected.is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn valid_fields_replace_base_values() {
        let mut settings = Settings::default();
        let rejected = apply_patch(
            &mut settings,
            company(CompanyPatch {
                name: Some("  Acme Traders ".into()),
                business_type: Some("wholesale".into()),
                currency: Some("eur".into()),
                ..CompanyPatch::default()
            }),
        );
        assert!(rejected.is_empty());
        assert_eq!(settings.company.name, "Acme Traders");
        assert_eq!(settings.company.business_type, BusinessType::Wholesale);
        assert_eq!(settings.company.currency, "EUR");
    }

    #[test]
    fn out_of_range_tax_rate_keeps_base_value() {
        let mut settings = Settings::default();
        let rejected = apply_patch(
            &mut settings,
            company(CompanyPatch {
                tax_rate: Some(150.0.into()),
                ..CompanyPatch::default()
            }),
        );
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, "company.taxRate");
        assert_abs_diff_eq!(settings.company.tax_rate.value(), 10.0, epsilon = F64_EPSILON);
    }

    #[test]
    fn numeric_text_tax_rate_is_parsed() {
        let mut settings = Settings::default();
        let rejected = apply_patch(
            &mut settings,
            company(CompanyPatch {
                tax_rate: Some("18".into()),
                ..CompanyPatch::default()
            }),
        );
        assert!(rejected.is_empty());
        assert_abs_diff_eq!(settings.company.tax_rate.value(), 18.0, epsilon = F64_EPSILON);
    }

    #[test]
    fn invalid_color_is_rejected_alone() {
        let mut settings = Settings::default();
        let patch = PartialSettings {
            branding: BrandingPatch {
                colors: ColorsPatch {
                    primary: Some("blue".into()),
                    success: Some("#20c997".into()),
                    ..ColorsPatch::default()
                },
                ..BrandingPatch::default()
            },
            ..PartialSettings::default()
        };
        let rejected = apply_patch(&mut settings, patch);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, "branding.colors.primary");
        assert_eq!(settings.branding.colors.primary.as_str(), "#0D6EFD");
        assert_eq!(settings.branding.colors.success.as_str(), "#20c997");
    }

    #[test]
    fn blank_name_and_bad_currency_are_rejected() {
        let mut settings = Settings::default();
        let rejected = apply_patch(
            &mut settings,
            company(CompanyPatch {
                name: Some("   ".into()),
                currency: Some("EURO".into()),
                ..CompanyPatch::default()
            }),
        );
        let fields: Vec<_> = rejected.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["company.name", "company.currency"]);
        assert_eq!(settings.company, Default::default());
    }

    #[test]
    fn ui_enums_parse_or_reject() {
        let mut settings = Settings::default();
        let patch = PartialSettings {
            ui: UiPatch {
                theme: Some("dark".into()),
                dashboard_layout: Some("masonry".into()),
                ..UiPatch::default()
            },
            ..PartialSettings::default()
        };
        let rejected = apply_patch(&mut settings, patch);
        assert_eq!(settings.ui.theme, ThemeMode::Dark);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, "ui.dashboardLayout");
    }

    #[test]
    fn function_flags_are_applied() {
        let mut settings = Settings::default();
        let mut patch = PartialSettings::default();
        patch.functions.insert(FunctionKey::Hrm, true);
        patch.functions.insert(FunctionKey::Sales, false);
        apply_patch(&mut settings, patch);
        assert!(settings.is_function_enabled(FunctionKey::Hrm));
        assert!(!settings.is_function_enabled(FunctionKey::Sales));
    }

    #[test]
    fn bad_logo_data_url_is_rejected() {
        let mut settings = Settings::default();
        let patch = PartialSettings {
            branding: BrandingPatch {
                logo: Some(LogoPatch::DataUrl("data:text/plain;base64,aGVsbG8=".into())),
                ..BrandingPatch::default()
            },
            ..PartialSettings::default()
        };
        let rejected = apply_patch(&mut settings, patch);
        assert_eq!(rejected[0].field, "branding.logo");
        assert!(settings.branding.logo.is_none());
    }

    #[test]
    fn role_list_with_unknown_permission_is_rejected_whole() {
        let mut settings = Settings::default();
        let patch = PartialSettings {
            roles: Some(vec![
                RolePatch {
                    name: "Cashier".into(),
                    level: "employee".into(),
                    permissions: vec!["sales".into()],
                },
                RolePatch {
                    name: "Auditor".into(),
                    level: "manager".into(),
                    permissions: vec!["audit".into()],
                },
            ]),
            ..PartialSettings::default()
        };
        let rejected = apply_patch(&mut settings, patch);
        assert_eq!(rejected[0].field, "users.roles[1].permissions");
        assert_eq!(settings.users, Default::default());
    }

    #[test]
    fn valid_role_list_replaces_defaults() {
        let mut settings = Settings::default();
        let patch = PartialSettings {
            roles: Some(vec![RolePatch {
                name: "Owner".into(),
                level: "admin".into(),
                permissions: vec!["all".into()],
            }]),
            ..PartialSettings::default()
        };
        assert!(apply_patch(&mut settings, patch).is_empty());
        assert_eq!(settings.users.roles.len(), 1);
        assert_eq!(settings.users.roles[0].permissions, vec![Permission::All]);
    }
}
