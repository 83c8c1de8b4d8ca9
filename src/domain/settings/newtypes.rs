// SPDX-License-Identifier: MPL-2.0
//! Settings value newtypes.
//!
//! This module provides type-safe wrappers for settings values,
//! ensuring they are always valid once constructed.

use std::fmt;

// =============================================================================
// Tax Rate Bounds
// =============================================================================

/// Tax rate percentage bounds (0% to 100%).
pub mod tax_rate_bounds {
    /// Minimum tax rate percentage.
    pub const MIN: f64 = 0.0;
    /// Maximum tax rate percentage.
    pub const MAX: f64 = 100.0;
    /// Default tax rate percentage.
    pub const DEFAULT: f64 = 10.0;
}

// =============================================================================
// TaxRate
// =============================================================================

/// Sales tax percentage, guaranteed to be finite and within 0%–100%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate, or `None` if the value is not finite or out of range.
    #[must_use]
    pub fn new(percent: f64) -> Option<Self> {
        (percent.is_finite()
            && (tax_rate_bounds::MIN..=tax_rate_bounds::MAX).contains(&percent))
        .then_some(Self(percent))
    }

    /// Parses a decimal string such as `"18"` or `" 7.5 "`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().and_then(Self::new)
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(tax_rate_bounds::DEFAULT)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// HexColor
// =============================================================================

/// A `#RRGGBB` color string.
///
/// The original spelling is preserved so that values round-trip unchanged;
/// comparisons are case-sensitive on that spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parses `#` followed by exactly six hex digits (either case).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#')?;
        (digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .then(|| Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds a color from a compile-time literal known to be valid.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(Self::parse(raw).is_some(), "invalid color literal {raw}");
        Self(raw.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    // -------------------------------------------------------------------------
    // TaxRate tests
    // -------------------------------------------------------------------------

    #[test]
    fn tax_rate_accepts_bounds() {
        assert!(TaxRate::new(tax_rate_bounds::MIN).is_some());
        assert!(TaxRate::new(tax_rate_bounds::MAX).is_some());
        assert!(TaxRate::new(7.5).is_some());
    }

    #[test]
    fn tax_rate_rejects_out_of_range_and_non_finite() {
        assert!(TaxRate::new(-5.0).is_none());
        assert!(TaxRate::new(150.0).is_none());
        assert!(TaxRate::new(f64::NAN).is_none());
        assert!(TaxRate::new(f64::INFINITY).is_none());
    }

    #[test]
    fn tax_rate_parses_numeric_text() {
        assert_abs_diff_eq!(
            TaxRate::parse("18").map(TaxRate::value).unwrap_or_default(),
            18.0,
            epsilon = F64_EPSILON
        );
        assert!(TaxRate::parse(" 7.5 ").is_some());
        assert!(TaxRate::parse("ten").is_none());
        assert!(TaxRate::parse("").is_none());
        assert!(TaxRate::parse("101").is_none());
    }

    #[test]
    fn tax_rate_default_is_ten_percent() {
        let rate = TaxRate::default();
        assert_abs_diff_eq!(rate.value(), tax_rate_bounds::DEFAULT, epsilon = F64_EPSILON);
    }

    #[test]
    fn tax_rate_displays_whole_numbers_without_fraction() {
        assert_eq!(TaxRate::default().to_string(), "10");
        assert_eq!(TaxRate::new(7.5).map(|r| r.to_string()).as_deref(), Some("7.5"));
    }

    // -------------------------------------------------------------------------
    // HexColor tests
    // -------------------------------------------------------------------------

    #[test]
    fn hex_color_accepts_six_digits_any_case() {
        assert!(HexColor::parse("#0D6EFD").is_some());
        assert!(HexColor::parse("#0d6efd").is_some());
    }

    #[test]
    fn hex_color_rejects_malformed_values() {
        for raw in ["0D6EFD", "#0D6EF", "#0D6EFD0", "#GGGGGG", "#fff", "", "#", "red"] {
            assert!(HexColor::parse(raw).is_none(), "{raw} should be rejected");
        }
    }

    #[test]
    fn hex_color_preserves_spelling() {
        let color = HexColor::parse("#ffc107").expect("valid color");
        assert_eq!(color.as_str(), "#ffc107");
    }
}
