use crate::{
    error::ValueExtractionError,
    model::{AccessorDecl, ClassModel, PropertyDecl, ReturnShape},
    relation::{RelationRole, RelationType},
    traits::ClassSchema,
    types::{EntityType, SourceType},
    value::{FieldValue, Value},
};
use std::any::Any;

///
/// Endpoint
/// One side of a [`Relation`].
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    pub ids: Vec<String>,
    pub role: RelationRole,
    pub source_type: SourceType,
    pub entity_type: Option<EntityType>,
    pub source_id: Option<String>,
}

///
/// Relation
///
/// A directed, typed connection between two endpoints, produced fresh each
/// time relation declarations are expanded. Endpoint 1 always plays the
/// first role of `relation_type`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relation {
    pub identity: String,
    pub relation_type: RelationType,
    pub namespace: String,
    pub ep1: Endpoint,
    pub ep2: Endpoint,
}

impl Relation {
    /// Endpoint whose role is `role`, if either plays it.
    #[must_use]
    pub fn endpoint(&self, role: RelationRole) -> Option<&Endpoint> {
        [&self.ep1, &self.ep2]
            .into_iter()
            .find(|endpoint| endpoint.role == role)
    }
}

// readers
mod readers {
    use super::*;

    macro_rules! relation_readers {
        ( $( $reader:ident => $($path:ident).+ ),* $(,)? ) => {
            $(
                pub(super) fn $reader(this: &dyn Any) -> Result<Value, ValueExtractionError> {
                    this.downcast_ref::<Relation>()
                        .map(|relation| relation.$($path).+.to_value())
                        .ok_or_else(|| {
                            ValueExtractionError::type_mismatch("Relation", stringify!($reader))
                        })
                }
            )*
        };
    }

    relation_readers!(
        identity => identity,
        relation_type => relation_type,
        namespace => namespace,
        ep1_ids => ep1.ids,
        ep1_role => ep1.role,
        ep1_source_type => ep1.source_type,
        ep1_type => ep1.entity_type,
        ep1_source_id => ep1.source_id,
        ep2_ids => ep2.ids,
        ep2_role => ep2.role,
        ep2_source_type => ep2.source_type,
        ep2_type => ep2.entity_type,
        ep2_source_id => ep2.source_id,
    );
}

const PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::new("identity").required(),
    PropertyDecl::new("relation_type").attribute("type").required(),
    PropertyDecl::new("namespace").required(),
    PropertyDecl::new("ep1_ids").attribute("ep1Ids").required(),
    PropertyDecl::new("ep1_role").attribute("ep1Role").required(),
    PropertyDecl::new("ep1_source_type")
        .attribute("ep1SourceType")
        .required(),
    PropertyDecl::new("ep1_type").attribute("ep1Type"),
    PropertyDecl::new("ep1_source_id").attribute("ep1SourceId"),
    PropertyDecl::new("ep2_ids").attribute("ep2Ids").required(),
    PropertyDecl::new("ep2_role").attribute("ep2Role").required(),
    PropertyDecl::new("ep2_source_type")
        .attribute("ep2SourceType")
        .required(),
    PropertyDecl::new("ep2_type").attribute("ep2Type"),
    PropertyDecl::new("ep2_source_id").attribute("ep2SourceId"),
];

const ACCESSORS: &[AccessorDecl] = &[
    AccessorDecl::value("identity", ReturnShape::Scalar, readers::identity),
    AccessorDecl::value("relation_type", ReturnShape::Scalar, readers::relation_type),
    AccessorDecl::value("namespace", ReturnShape::Scalar, readers::namespace),
    AccessorDecl::value("ep1_ids", ReturnShape::Collection, readers::ep1_ids),
    AccessorDecl::value("ep1_role", ReturnShape::Scalar, readers::ep1_role),
    AccessorDecl::value("ep1_source_type", ReturnShape::Scalar, readers::ep1_source_type),
    AccessorDecl::value("ep1_type", ReturnShape::Scalar, readers::ep1_type),
    AccessorDecl::value("ep1_source_id", ReturnShape::Scalar, readers::ep1_source_id),
    AccessorDecl::value("ep2_ids", ReturnShape::Collection, readers::ep2_ids),
    AccessorDecl::value("ep2_role", ReturnShape::Scalar, readers::ep2_role),
    AccessorDecl::value("ep2_source_type", ReturnShape::Scalar, readers::ep2_source_type),
    AccessorDecl::value("ep2_type", ReturnShape::Scalar, readers::ep2_type),
    AccessorDecl::value("ep2_source_id", ReturnShape::Scalar, readers::ep2_source_id),
];

impl ClassSchema for Relation {
    const MODEL: &'static ClassModel = &ClassModel::new("metacat::relation::Relation", "Relation")
        .properties(PROPERTIES)
        .accessors(ACCESSORS);
}
