use crate::types::catalog_enum;
use serde::{Deserialize, Serialize};

///
/// CustomPropertyType
///
/// Value type of a property registered with the catalog schema.
///

#[remain::sorted]
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomPropertyType {
    Boolean,
    Double,
    Enum,
    Float,
    Integer,
    Long,
    #[default]
    Text,
}

catalog_enum!(CustomPropertyType, "property type", {
    Boolean => "BOOLEAN",
    Double => "DOUBLE",
    Enum => "ENUM",
    Float => "FLOAT",
    Integer => "INTEGER",
    Long => "LONG",
    Text => "TEXT",
});
