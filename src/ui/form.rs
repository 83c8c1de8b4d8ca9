// SPDX-License-Identifier: MPL-2.0
//! Settings form field values.
//!
//! [`FormFields`] is the text content of every input on the settings form,
//! keyed by the input's element id. It is filled from the current settings
//! and turned back into a [`PartialSettings`] when the user presses save.

use std::fmt;

use crate::application::store::{
    BrandingPatch, ColorsPatch, CompanyPatch, PartialSettings, TaxRateInput, UiPatch,
};
use crate::domain::settings::Settings;

/// An input on the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CompanyName,
    CompanyEmail,
    CompanyPhone,
    CompanyAddress,
    BusinessType,
    Currency,
    TaxRate,
    Timezone,
    PrimaryColor,
    SecondaryColor,
    SuccessColor,
    WarningColor,
    SidebarMode,
    ThemeMode,
    DashboardLayout,
    AnimationSpeed,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 16] = [
        FormField::CompanyName,
        FormField::CompanyEmail,
        FormField::CompanyPhone,
        FormField::CompanyAddress,
        FormField::BusinessType,
        FormField::Currency,
        FormField::TaxRate,
        FormField::Timezone,
        FormField::PrimaryColor,
        FormField::SecondaryColor,
        FormField::SuccessColor,
        FormField::WarningColor,
        FormField::SidebarMode,
        FormField::ThemeMode,
        FormField::DashboardLayout,
        FormField::AnimationSpeed,
    ];

    /// Element id of the input.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            FormField::CompanyName => "companyName",
            FormField::CompanyEmail => "companyEmail",
            FormField::CompanyPhone => "companyPhone",
            FormField::CompanyAddress => "companyAddress",
            FormField::BusinessType => "businessType",
            FormField::Currency => "currency",
            FormField::TaxRate => "taxRate",
            FormField::Timezone => "timezone",
            FormField::PrimaryColor => "primaryColor",
            FormField::SecondaryColor => "secondaryColor",
            FormField::SuccessColor => "successColor",
            FormField::WarningColor => "warningColor",
            FormField::SidebarMode => "sidebarMode",
            FormField::ThemeMode => "themeMode",
            FormField::DashboardLayout => "dashboardLayout",
            FormField::AnimationSpeed => "animationSpeed",
        }
    }

    /// Looks up a field by element id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Text values of every form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    values: [String; 16],
}

impl FormFields {
    /// Fills the form from `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let values = FormField::ALL.map(|field| value_of(settings, field));
        Self { values }
    }

    /// Variants are declared in `ALL` order.
    fn index(field: FormField) -> usize {
        field as usize
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        &self.values[Self::index(field)]
    }

    /// Replaces the text of one input, as typing would.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[Self::index(field)] = value.into();
    }

    /// `(field, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Converts every input into a patch.
    ///
    /// A blank tax rate submits `0`; other text is passed through for the
    /// store to validate.
    #[must_use]
    pub fn to_patch(&self) -> PartialSettings {
        let text = |field| Some(self.get(field).to_string());
        let tax_rate = match self.get(FormField::TaxRate).trim() {
            "" => TaxRateInput::Number(0.0),
            raw => TaxRateInput::Text(raw.to_string()),
        };

        PartialSettings {
            company: CompanyPatch {
                name: text(FormField::CompanyName),
                email: text(FormField::CompanyEmail),
                phone: text(FormField::CompanyPhone),
                address: text(FormField::CompanyAddress),
                business_type: text(FormField::BusinessType),
                currency: text(FormField::Currency),
                tax_rate: Some(tax_rate),
                timezone: text(FormField::Timezone),
            },
            branding: BrandingPatch {
                logo: None,
                colors: ColorsPatch {
                    primary: text(FormField::PrimaryColor),
                    secondary: text(FormField::SecondaryColor),
                    success: text(FormField::SuccessColor),
                    warning: text(FormField::WarningColor),
                },
            },
            ui: UiPatch {
                sidebar_mode: text(FormField::SidebarMode),
                theme: text(FormField::ThemeMode),
                dashboard_layout: text(FormField::DashboardLayout),
                animation_speed: text(FormField::AnimationSpeed),
            },
            ..PartialSettings::default()
        }
    }
}

fn value_of(settings: &Settings, field: FormField) -> String {
    let company = &settings.company;
    let colors = &settings.branding.colors;
    let ui = &settings.ui;
    match field {
        FormField::CompanyName => company.name.clone(),
        FormField::CompanyEmail => company.email.clone(),
        FormField::CompanyPhone => company.phone.clone(),
        FormField::CompanyAddress => company.address.clone(),
        FormField::BusinessType => company.business_type.to_string(),
        FormField::Currency => company.currency.clone(),
        FormField::TaxRate => company.tax_rate.to_string(),
        FormField::Timezone => company.timezone.clone(),
        FormField::PrimaryColor => colors.primary.to_string(),
        FormField::SecondaryColor => colors.secondary.to_string(),
        FormField::SuccessColor => colors.success.to_string(),
        FormField::WarningColor => colors.warning.to_string(),
        FormField::SidebarMode => ui.sidebar_mode.to_string(),
        FormField::ThemeMode => ui.theme.to_string(),
        FormField::DashboardLayout => ui.dashboard_layout.to_string(),
        FormField::AnimationSpeed => ui.animation_speed.to_string(),
    }
}
