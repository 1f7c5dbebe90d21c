mod entity_type;
mod property_type;
mod source_type;

pub use entity_type::EntityType;
pub use property_type::CustomPropertyType;
pub use source_type::SourceType;

use thiserror::Error as ThisError;

///
/// UnknownVariant
///
/// Returned when parsing a catalog enum from its wire name fails.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// catalog_enum
// Wire names, Display, FromStr and FieldValue for a fieldless catalog enum.
macro_rules! catalog_enum {
    ($type:ident, $kind:literal, { $( $variant:ident => $name:literal ),* $(,)? }) => {
        impl $type {
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),* ];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = $crate::types::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Self::$variant), )*
                    _ => Err($crate::types::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl $crate::value::FieldValue for $type {
            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Text(self.as_str().to_string())
            }
        }
    };
}

pub(crate) use catalog_enum;

///
/// TESTS
///
