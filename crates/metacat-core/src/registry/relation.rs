use crate::{
    discovery::{Declaration, Discovered},
    error::{Error, SchemaError, ValueExtractionError},
    model::{Accessor, ClassModel, EntityReader, Projection, RelationDecl},
    registry::project,
    relation::{Relation, RelationBuilder, RelationRole, RelationType, RoleTable},
    traits::{Entity, MetaClass},
    types::SourceType,
};
use std::{fmt, sync::Arc};

///
/// RelationEntry
///
/// One discovered relation field. The relation type is resolved from the
/// declared role when the entry is built, so an unknown role fails while
/// the class is registered rather than when an instance is written.
///

#[derive(Clone)]
pub struct RelationEntry {
    declaring: &'static ClassModel,
    decl: &'static RelationDecl,
    relation_type: RelationType,
    collection: bool,
    read: EntityReader,
    path: Arc<[Projection]>,
}

impl RelationEntry {
    pub(crate) fn from_discovered(
        found: &Discovered,
        roles: &RoleTable,
    ) -> Result<Option<Self>, SchemaError> {
        let (Declaration::Relation(decl), Accessor::Entities(read)) =
            (found.declaration, found.accessor.read)
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            declaring: found.declaring,
            decl,
            relation_type: roles.type_for_role(decl.role)?,
            collection: found.accessor.returns.is_collection(),
            read,
            path: Arc::clone(&found.path),
        }))
    }

    /// Role of the entity on the other end of the relation.
    #[must_use]
    pub const fn declared_role(&self) -> RelationRole {
        self.decl.role
    }

    #[must_use]
    pub const fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.decl.required
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.collection
    }

    #[must_use]
    pub const fn source_type(&self) -> Option<SourceType> {
        self.decl.source_type
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.decl.field
    }

    #[must_use]
    pub const fn declaring_class(&self) -> &'static ClassModel {
        self.declaring
    }

    /// Entities the field points at: one for a direct reference, the whole
    /// collection otherwise, in collection order with duplicates kept.
    pub fn connected_entities<'a>(
        &self,
        owner: &'a dyn MetaClass,
    ) -> Result<Vec<&'a dyn Entity>, ValueExtractionError> {
        let target = project(owner.as_any(), &self.path)
            .ok_or_else(|| ValueExtractionError::type_mismatch(self.declaring.path, self.decl.field))?;

        (self.read)(target)
    }

    /// One relation per connected entity, all of this entry's type and all
    /// stamped with the builder's namespace.
    pub fn build_relations(
        &self,
        owner: &dyn Entity,
        builder: &RelationBuilder<'_>,
    ) -> Result<Vec<Relation>, Error> {
        let others = self.connected_entities(owner)?;

        Ok(self.relations_to(owner, &others, builder)?)
    }

    /// Relations from `owner` to entities already resolved through
    /// [`connected_entities`](Self::connected_entities).
    pub fn relations_to(
        &self,
        owner: &dyn Entity,
        others: &[&dyn Entity],
        builder: &RelationBuilder<'_>,
    ) -> Result<Vec<Relation>, SchemaError> {
        builder.create_relations(
            self.relation_type,
            owner,
            others,
            self.decl.role,
            self.decl.source_type,
        )
    }
}

impl PartialEq for RelationEntry {
    fn eq(&self, other: &Self) -> bool {
        self.declaring.path == other.declaring.path && self.decl.field == other.decl.field
    }
}

impl Eq for RelationEntry {}

impl fmt::Debug for RelationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationEntry")
            .field("class", &self.declaring.path)
            .field("field", &self.decl.field)
            .field("role", &self.decl.role)
            .field("relation_type", &self.relation_type)
            .field("required", &self.decl.required)
            .finish_non_exhaustive()
    }
}
