use crate::{
    entity::{PropertyChangeSet, TagChangeSet},
    error::ValueExtractionError,
    model::{AccessorDecl, ClassModel, PropertyDecl, ReturnShape},
    traits::{ClassSchema, Entity},
    types::{EntityType, SourceType},
    value::Value,
};
use chrono::{DateTime, Utc};

///
/// EntityHeader
///
/// Attributes every catalog entity carries. Entity classes embed it (directly
/// or through another base class) as their `#[metacat(base)]` field.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityHeader {
    pub identity: String,
    pub source_type: Option<SourceType>,
    pub entity_type: Option<EntityType>,
    pub namespace: Option<String>,
    pub source_id: Option<String>,
    pub original_name: Option<String>,
    pub alias: Option<String>,
    pub deleted: bool,
    /// Milliseconds since the epoch.
    pub deletion_time: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub parent_path: Option<String>,
    pub tags: TagChangeSet,
    pub properties: PropertyChangeSet,
}

impl EntityHeader {
    #[must_use]
    pub fn new(
        identity: impl Into<String>,
        source_type: SourceType,
        entity_type: EntityType,
    ) -> Self {
        Self {
            identity: identity.into(),
            source_type: Some(source_type),
            entity_type: Some(entity_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn has_identity(&self) -> bool {
        !self.identity.is_empty()
    }
}

impl Entity for EntityHeader {
    fn header(&self) -> &EntityHeader {
        self
    }

    fn as_entity(&self) -> &dyn Entity {
        self
    }
}

// readers
// One accessor per header field, named after the field.
mod readers {
    use super::*;
    use crate::value::FieldValue;
    use std::any::Any;

    macro_rules! header_readers {
        ( $( $field:ident ),* $(,)? ) => {
            $(
                pub(super) fn $field(this: &dyn Any) -> Result<Value, ValueExtractionError> {
                    this.downcast_ref::<EntityHeader>()
                        .map(|header| header.$field.to_value())
                        .ok_or_else(|| {
                            ValueExtractionError::type_mismatch("EntityHeader", stringify!($field))
                        })
                }
            )*
        };
    }

    header_readers!(
        identity,
        source_type,
        entity_type,
        namespace,
        source_id,
        original_name,
        alias,
        deleted,
        deletion_time,
        created,
        owner,
        description,
        parent_path,
        tags,
        properties,
    );
}

const PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::new("identity").required(),
    PropertyDecl::new("source_type").attribute("sourceType").required(),
    PropertyDecl::new("entity_type").attribute("type").required(),
    PropertyDecl::new("namespace"),
    PropertyDecl::new("source_id").attribute("sourceId"),
    PropertyDecl::new("original_name").attribute("originalName"),
    PropertyDecl::new("alias"),
    PropertyDecl::new("deleted"),
    PropertyDecl::new("deletion_time").attribute("deletionTime"),
    PropertyDecl::new("created"),
    PropertyDecl::new("owner"),
    PropertyDecl::new("description"),
    PropertyDecl::new("parent_path").attribute("parentPath"),
    PropertyDecl::new("tags"),
    PropertyDecl::new("properties"),
];

const ACCESSORS: &[AccessorDecl] = &[
    AccessorDecl::value("identity", ReturnShape::Scalar, readers::identity),
    AccessorDecl::value("source_type", ReturnShape::Scalar, readers::source_type),
    AccessorDecl::value("entity_type", ReturnShape::Scalar, readers::entity_type),
    AccessorDecl::value("namespace", ReturnShape::Scalar, readers::namespace),
    AccessorDecl::value("source_id", ReturnShape::Scalar, readers::source_id),
    AccessorDecl::value("original_name", ReturnShape::Scalar, readers::original_name),
    AccessorDecl::value("alias", ReturnShape::Scalar, readers::alias),
    AccessorDecl::value("is_deleted", ReturnShape::Scalar, readers::deleted),
    AccessorDecl::value("deletion_time", ReturnShape::Scalar, readers::deletion_time),
    AccessorDecl::value("created", ReturnShape::Scalar, readers::created),
    AccessorDecl::value("owner", ReturnShape::Scalar, readers::owner),
    AccessorDecl::value("description", ReturnShape::Scalar, readers::description),
    AccessorDecl::value("parent_path", ReturnShape::Scalar, readers::parent_path),
    AccessorDecl::value("tags", ReturnShape::Scalar, readers::tags),
    AccessorDecl::value("properties", ReturnShape::Scalar, readers::properties),
];

impl ClassSchema for EntityHeader {
    const MODEL: &'static ClassModel =
        &ClassModel::new("metacat::entity::EntityHeader", "EntityHeader")
            .properties(PROPERTIES)
            .accessors(ACCESSORS);
}

///
/// TESTS
///
