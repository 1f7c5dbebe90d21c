//! Serialization dispatcher: entities and relations to ordered documents.

mod document;

pub use document::Document;

use crate::{
    INTERNAL_TYPE_ATTRIBUTE,
    error::{Error, SchemaError},
    registry::Registry,
    relation::Relation,
    traits::{Entity, MetaClass},
    value::Value,
};

///
/// Dispatcher
///
/// Generic writer for every registered class. It never switches on the
/// concrete type: the registry's property list for the instance's runtime
/// class decides what is written, and in which order.
///

#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Every property of the runtime class, in registry order.
    pub fn serialize_class(&self, instance: &dyn MetaClass) -> Result<Document, Error> {
        let entries = self.registry.entries_of(instance)?;
        let mut document = Document::with_capacity(entries.properties().len() + 1);

        for property in entries.properties() {
            document.push(property.attribute_name(), property.value_of(instance)?);
        }

        Ok(document)
    }

    /// Entity document: its properties followed by the `internalType`
    /// discriminator naming the custom model.
    pub fn serialize_entity(&self, entity: &dyn Entity) -> Result<Document, Error> {
        let model = entity.class_model();
        let name = model
            .model
            .ok_or(SchemaError::MissingModel { class: model.path })?;

        let mut document = self.serialize_class(entity)?;
        document.push(INTERNAL_TYPE_ATTRIBUTE, Value::Text(name.to_string()));

        Ok(document)
    }

    /// Relation document, emitted on its own stream next to the entities.
    pub fn serialize_relation(&self, relation: &Relation) -> Result<Document, Error> {
        self.serialize_class(relation)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::EntityHeader,
        relation::{RelationBuilder, RelationRole, RelationType},
        test_fixtures::script,
        types::{EntityType, SourceType},
    };

    #[test]
    fn entity_document_ends_with_internal_type() {
        let registry = Registry::new();
        let document = Dispatcher::new(&registry)
            .serialize_entity(&script("s-1", "load.sql"))
            .expect("script should serialize");

        let attributes: Vec<_> = document.attributes().collect();
        assert_eq!(attributes.first(), Some(&"name"));
        assert_eq!(attributes.last(), Some(&INTERNAL_TYPE_ATTRIBUTE));
        assert_eq!(
            document.get(INTERNAL_TYPE_ATTRIBUTE),
            Some(&Value::Text("script".into()))
        );
        assert_eq!(document.get("identity"), Some(&Value::Text("s-1".into())));
    }

    #[test]
    fn serialization_is_byte_identical_across_calls() {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(&registry);
        let script = script("s-1", "load.sql");

        let encode = || {
            dispatcher
                .serialize_entity(&script)
                .expect("script should serialize")
                .to_json()
                .expect("document should encode")
        };

        let first = encode();
        let second = encode();

        assert_eq!(first, second);
    }

    #[test]
    fn entity_without_model_name_is_a_schema_error() {
        let registry = Registry::new();
        let header = EntityHeader::new("h-1", SourceType::Sdk, EntityType::File);

        let err = Dispatcher::new(&registry)
            .serialize_entity(&header)
            .expect_err("header has no model name");

        assert!(matches!(
            err,
            Error::Schema(SchemaError::MissingModel { .. })
        ));
    }

    #[test]
    fn relation_document_carries_type_endpoints_and_namespace() {
        let registry = Registry::new();
        let script = script("s-1", "load.sql");
        let relation = RelationBuilder::new("nav")
            .create_relation(
                RelationType::LogicalPhysical,
                &script,
                &script.operation,
                RelationRole::Physical,
                None,
            )
            .expect("relation should build");

        let document = Dispatcher::new(&registry)
            .serialize_relation(&relation)
            .expect("relation should serialize");

        assert_eq!(document.get("type"), Some(&Value::Text("LOGICAL_PHYSICAL".into())));
        assert_eq!(document.get("namespace"), Some(&Value::Text("nav".into())));
        assert_eq!(document.get("ep1Role"), Some(&Value::Text("LOGICAL".into())));
        assert_eq!(
            document.get("ep1Ids"),
            Some(&Value::List(vec![Value::Text("s-1".into())]))
        );
        assert!(document.get(INTERNAL_TYPE_ATTRIBUTE).is_none());
    }
}
