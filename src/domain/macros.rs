// SPDX-License-Identifier: MPL-2.0
//! Helper for closed enums that travel as lowercase strings.

/// Declares a `Copy` enum whose variants map one-to-one to wire strings.
///
/// Generates `ALL`, `as_str`, `Display`, and a `FromStr` that accepts the
/// wire string case-insensitively and fails with [`UnknownVariant`].
///
/// [`UnknownVariant`]: crate::domain::UnknownVariant
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation of the variant.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::domain::UnknownVariant;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err(crate::domain::UnknownVariant::new(
                    trimmed,
                    &[$($wire),+],
                ))
            }
        }
    };
}
