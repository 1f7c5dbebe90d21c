use crate::{
    error::SchemaError,
    identity,
    relation::{Endpoint, EndpointSlot, Relation, RelationRole, RelationType},
    traits::Entity,
    types::SourceType,
};
use tracing::trace;

///
/// RelationBuilder
///
/// Materializes [`Relation`] records between an owner and the entities one
/// of its relation fields points at. Every relation it builds is stamped
/// with the builder's namespace, whatever the endpoints' own namespaces are.
///

#[derive(Clone, Copy, Debug)]
pub struct RelationBuilder<'a> {
    namespace: &'a str,
    default_source_type: Option<SourceType>,
}

impl<'a> RelationBuilder<'a> {
    #[must_use]
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace,
            default_source_type: None,
        }
    }

    /// Source type used for an endpoint when neither the entity nor the
    /// relation declaration provides one.
    #[must_use]
    pub const fn with_default_source_type(mut self, source_type: Option<SourceType>) -> Self {
        self.default_source_type = source_type;
        self
    }

    #[must_use]
    pub const fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Build the relation between `owner` and `other`, where `other` plays
    /// `role_of_other`. The owner gets the complementary role of the type.
    pub fn create_relation(
        &self,
        relation_type: RelationType,
        owner: &dyn Entity,
        other: &dyn Entity,
        role_of_other: RelationRole,
        other_source_hint: Option<SourceType>,
    ) -> Result<Relation, SchemaError> {
        let owner_role = relation_type.complement(role_of_other)?;

        let owner_end = self.endpoint(owner, owner_role, None);
        let other_end = self.endpoint(other, role_of_other, other_source_hint);

        let (ep1, ep2) = match owner_role.slot() {
            EndpointSlot::First => (owner_end, other_end),
            EndpointSlot::Second => (other_end, owner_end),
        };

        let relation = Relation {
            identity: identity::relation(
                relation_type,
                &ep1.ids,
                ep1.source_type,
                &ep2.ids,
                ep2.source_type,
            ),
            relation_type,
            namespace: self.namespace.to_string(),
            ep1,
            ep2,
        };

        trace!(
            relation_type = %relation.relation_type,
            identity = %relation.identity,
            namespace = %relation.namespace,
            "built relation"
        );

        Ok(relation)
    }

    /// One relation per entry of `others`, in order. Duplicates are kept.
    pub fn create_relations(
        &self,
        relation_type: RelationType,
        owner: &dyn Entity,
        others: &[&dyn Entity],
        role_of_other: RelationRole,
        other_source_hint: Option<SourceType>,
    ) -> Result<Vec<Relation>, SchemaError> {
        others
            .iter()
            .map(|other| {
                self.create_relation(relation_type, owner, *other, role_of_other, other_source_hint)
            })
            .collect()
    }

    fn endpoint(
        &self,
        entity: &dyn Entity,
        role: RelationRole,
        source_hint: Option<SourceType>,
    ) -> Endpoint {
        let header = entity.header();
        let source_type = header
            .source_type
            .filter(|source_type| source_type.is_set())
            .or(source_hint)
            .or(self.default_source_type)
            .unwrap_or_default();

        Endpoint {
            ids: vec![header.identity.clone()],
            role,
            source_type,
            entity_type: header.entity_type,
            source_id: header.source_id.clone(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::{EndpointProxy, EntityHeader},
        types::EntityType,
    };

    fn script() -> EntityHeader {
        EntityHeader::new("script-1", SourceType::Sdk, EntityType::File).with_namespace("custom")
    }

    #[test]
    fn owner_takes_the_complementary_role() {
        let owner = script();
        let operation = EndpointProxy::new("op-1", SourceType::Oozie, EntityType::Operation);

        let relation = RelationBuilder::new("nav")
            .create_relation(
                RelationType::LogicalPhysical,
                &owner,
                &operation,
                RelationRole::Physical,
                None,
            )
            .expect("physical should belong to logical/physical");

        assert_eq!(relation.ep1.role, RelationRole::Logical);
        assert_eq!(relation.ep1.ids, vec!["script-1".to_string()]);
        assert_eq!(relation.ep2.role, RelationRole::Physical);
        assert_eq!(relation.ep2.ids, vec!["op-1".to_string()]);
        assert_eq!(relation.namespace, "nav");
        assert!(identity::is_valid(&relation.identity));
    }

    #[test]
    fn endpoints_are_ordered_by_slot_not_by_ownership() {
        let owner = script();
        let parent = EndpointProxy::new("dir-1", SourceType::Hdfs, EntityType::Directory);

        let relation = RelationBuilder::new("nav")
            .create_relation(
                RelationType::ParentChild,
                &owner,
                &parent,
                RelationRole::Parent,
                None,
            )
            .expect("parent should belong to parent/child");

        assert_eq!(relation.ep1.ids, vec!["dir-1".to_string()]);
        assert_eq!(relation.ep2.ids, vec!["script-1".to_string()]);
        assert_eq!(
            relation.endpoint(RelationRole::Child).map(|ep| ep.ids.clone()),
            Some(vec!["script-1".to_string()])
        );
    }

    #[test]
    fn source_type_falls_back_from_entity_to_hint_to_default() {
        let owner = script();
        let mut bare = EntityHeader::new("bare", SourceType::None, EntityType::Field);
        bare.source_type = None;

        let builder = RelationBuilder::new("nav").with_default_source_type(Some(SourceType::Spark));

        let hinted = builder
            .create_relation(
                RelationType::DataFlow,
                &owner,
                &bare,
                RelationRole::Target,
                Some(SourceType::Hive),
            )
            .expect("target should belong to data flow");
        assert_eq!(hinted.ep2.source_type, SourceType::Hive);
        assert_eq!(hinted.ep1.source_type, SourceType::Sdk);

        let defaulted = builder
            .create_relation(RelationType::DataFlow, &owner, &bare, RelationRole::Target, None)
            .expect("target should belong to data flow");
        assert_eq!(defaulted.ep2.source_type, SourceType::Spark);

        let unset = RelationBuilder::new("nav")
            .create_relation(RelationType::DataFlow, &owner, &bare, RelationRole::Target, None)
            .expect("target should belong to data flow");
        assert_eq!(unset.ep2.source_type, SourceType::None);
    }

    #[test]
    fn unset_source_type_on_entity_yields_to_hint_and_default() {
        let owner = script();
        let unknown = EndpointProxy::new("t", SourceType::None, EntityType::Table);
        let builder = RelationBuilder::new("nav").with_default_source_type(Some(SourceType::Spark));

        let hinted = builder
            .create_relation(
                RelationType::DataFlow,
                &owner,
                &unknown,
                RelationRole::Target,
                Some(SourceType::Hive),
            )
            .expect("target should belong to data flow");
        assert_eq!(hinted.ep2.source_type, SourceType::Hive);

        let defaulted = builder
            .create_relation(RelationType::DataFlow, &owner, &unknown, RelationRole::Target, None)
            .expect("target should belong to data flow");
        assert_eq!(defaulted.ep2.source_type, SourceType::Spark);
    }

    #[test]
    fn batch_keeps_order_and_duplicates() {
        let owner = script();
        let a = EndpointProxy::new("a", SourceType::Hdfs, EntityType::File);
        let b = EndpointProxy::new("b", SourceType::Hdfs, EntityType::File);

        let relations = RelationBuilder::new("nav")
            .create_relations(
                RelationType::DataFlow,
                &owner,
                &[&a, &b, &a],
                RelationRole::Source,
                None,
            )
            .expect("source should belong to data flow");

        let sources: Vec<_> = relations.iter().map(|r| r.ep1.ids[0].as_str()).collect();
        assert_eq!(sources, vec!["a", "b", "a"]);
        assert!(relations.iter().all(|r| r.ep2.ids == vec!["script-1".to_string()]));
        assert_eq!(relations[0].identity, relations[2].identity);
        assert_ne!(relations[0].identity, relations[1].identity);
    }

    #[test]
    fn foreign_role_is_rejected() {
        let owner = script();
        let other = script();

        let err = RelationBuilder::new("nav")
            .create_relation(
                RelationType::InstanceOf,
                &owner,
                &other,
                RelationRole::Source,
                None,
            )
            .expect_err("source should not belong to instance-of");

        assert!(matches!(err, SchemaError::RoleNotInType { .. }));
    }
}
