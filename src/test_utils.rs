// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Tax rates and menu opacities are floats; compare them with `approx`
//! rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Epsilon for f32 values that should be exactly equal.
pub const F32_EPSILON: f32 = 1e-6;

/// Epsilon for f64 values that should be exactly equal.
pub const F64_EPSILON: f64 = 1e-10;
