// SPDX-License-Identifier: MPL-2.0
//! Dashboard projection of the settings.
//!
//! Everything the dashboard shell reads after a settings change: titles,
//! the color theme variables, and which menu entries are usable.

use std::time::Duration;

use crate::domain::functions::FunctionKey;
use crate::domain::settings::{DashboardLayout, LogoImage, Settings, SidebarMode, ThemeMode};

/// Opacity of a menu entry whose function is switched off.
pub const DISABLED_MENU_OPACITY: f32 = 0.5;

/// One sidebar menu entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuEntry {
    pub key: FunctionKey,
    pub label: &'static str,
    /// Disabled entries are dimmed and ignore clicks.
    pub enabled: bool,
}

impl MenuEntry {
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.enabled {
            1.0
        } else {
            DISABLED_MENU_OPACITY
        }
    }
}

/// Read-only view for the dashboard shell.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Document title, `"<company> - SmartPOS"`.
    pub page_title: String,
    /// Heading and sidebar company label.
    pub company_title: String,
    pub logo: Option<LogoImage>,
    /// `(--custom-property, value)` pairs for the color theme.
    pub css_variables: Vec<(&'static str, String)>,
    pub menu: Vec<MenuEntry>,
    pub sidebar_mode: SidebarMode,
    pub theme: ThemeMode,
    pub layout: DashboardLayout,
    pub transition: Duration,
}

impl DashboardView {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let css_variables = settings
            .branding
            .colors
            .iter()
            .map(|(role, color)| (role.css_variable(), color.to_string()))
            .collect();

        let menu = settings
            .functions
            .entries()
            .map(|entry| MenuEntry {
                key: entry.key,
                label: entry.name,
                enabled: entry.enabled,
            })
            .collect();

        Self {
            page_title: settings.page_title(),
            company_title: settings.company.name.clone(),
            logo: settings.branding.logo.clone(),
            css_variables,
            menu,
            sidebar_mode: settings.ui.sidebar_mode,
            theme: settings.ui.theme,
            layout: settings.ui.dashboard_layout,
            transition: settings.ui.animation_speed.transition(),
        }
    }

    /// The menu entry for `key`.
    #[must_use]
    pub fn menu_entry(&self, key: FunctionKey) -> Option<&MenuEntry> {
        self.menu.iter().find(|entry| entry.key == key)
    }

    /// `:root { ... }` block applying the color theme.
    #[must_use]
    pub fn css_root_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.css_variables {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}
