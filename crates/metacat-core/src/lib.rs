//! Core runtime for metacat: class models, the per-class registry, the
//! relation type/role table, the relation graph builder, and the document
//! pipeline that turns validated entities into catalog documents.
#![warn(unreachable_pub)]

extern crate self as metacat;

// public exports are one module level down
pub mod config;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod identity;
pub mod model;
pub mod registry;
pub mod relation;
pub mod schema;
pub mod serialize;
pub mod sink;
pub mod traits;
pub mod types;
pub mod value;
pub mod writer;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Attribute carrying the custom model name on every entity document.
pub const INTERNAL_TYPE_ATTRIBUTE: &str = "internalType";

/// Separator placed between the components of a generated identity.
pub const IDENTITY_SEPARATOR: &str = "##";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or writers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        entity::{EndpointProxy, EntityHeader, PropertyChangeSet, TagChangeSet},
        model::{ClassModel, PropertyDecl, RelationDecl},
        relation::{Relation, RelationRole, RelationType},
        traits::{ClassSchema, Entity, MetaClass},
        types::{CustomPropertyType, EntityType, SourceType},
        value::{FieldValue, Value},
    };
}
