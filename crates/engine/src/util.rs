//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! enum/label mapping and id parsing so every entity converts from its
//! storage model the same way.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Implements `as_str`, `TryFrom<&str>` and `Display` for a closed enum
/// stored as a snake_case label.
macro_rules! impl_labels {
    ($ty:ident, $what:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Canonical label used in the database.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$(Self::$variant,)+];
        }

        impl TryFrom<&str> for $ty {
            type Error = $crate::EngineError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($label => Ok(Self::$variant),)+
                    other => Err($crate::EngineError::InvalidArgument(format!(
                        concat!("invalid ", $what, ": {}"),
                        other
                    ))),
                }
            }
        }

        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

pub(crate) use impl_labels;

/// Parse a UUID from user input and return a labeled error on failure.
pub fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| EngineError::InvalidArgument(format!("invalid {label} id: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uuid_labels_failures() {
        let err = parse_uuid("nope", "trip").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidArgument("invalid trip id: nope".to_string())
        );
        assert!(
            parse_uuid(" 00000000-0000-0000-0000-000000000000 ", "trip").is_ok()
        );
    }
}
