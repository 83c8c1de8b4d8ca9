// SPDX-License-Identifier: MPL-2.0
//! Closed enums used by the settings sections.

use std::time::Duration;

string_enum! {
    /// Kind of business the installation serves.
    pub enum BusinessType {
        Retail => "retail",
        Wholesale => "wholesale",
        Service => "service",
        Manufacturing => "manufacturing",
        Restaurant => "restaurant",
        Other => "other",
    }
}

string_enum! {
    /// How the dashboard sidebar behaves.
    pub enum SidebarMode {
        /// Collapse on narrow viewports, expand otherwise.
        Auto => "auto",
        Expanded => "expanded",
        Collapsed => "collapsed",
    }
}

string_enum! {
    /// Color scheme of the admin panel.
    pub enum ThemeMode {
        Light => "light",
        Dark => "dark",
        /// Follow the operating system preference.
        Auto => "auto",
    }
}

string_enum! {
    /// Arrangement of dashboard cards.
    pub enum DashboardLayout {
        Grid => "grid",
        List => "list",
        Compact => "compact",
    }
}

string_enum! {
    /// Speed of UI transitions such as KPI counters and panel slides.
    pub enum AnimationSpeed {
        None => "none",
        Slow => "slow",
        Normal => "normal",
        Fast => "fast",
    }
}

impl AnimationSpeed {
    /// Base transition duration for this speed.
    #[must_use]
    pub fn transition(self) -> Duration {
        match self {
            AnimationSpeed::None => Duration::ZERO,
            AnimationSpeed::Slow => Duration::from_millis(600),
            AnimationSpeed::Normal => Duration::from_millis(300),
            AnimationSpeed::Fast => Duration::from_millis(150),
        }
    }
}

string_enum! {
    /// Named slots of the brand palette.
    pub enum ColorRole {
        Primary => "primary",
        Secondary => "secondary",
        Success => "success",
        Warning => "warning",
    }
}

impl ColorRole {
    /// CSS custom property the dashboard reads this color from.
    #[must_use]
    pub fn css_variable(self) -> &'static str {
        match self {
            ColorRole::Primary => "--primary-color",
            ColorRole::Secondary => "--secondary-color",
            ColorRole::Success => "--success-color",
            ColorRole::Warning => "--warning-color",
        }
    }
}
