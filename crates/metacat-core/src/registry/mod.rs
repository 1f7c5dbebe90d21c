//! Per-class registry of discovered property and relation entries.

mod property;
mod relation;
mod validate;

pub use property::PropertyEntry;
pub use relation::RelationEntry;

use crate::{
    discovery::{self, Marker},
    error::SchemaError,
    model::{ClassModel, Projection},
    relation::RoleTable,
    traits::{ClassSchema, MetaClass},
};
use std::{
    any::{Any, TypeId},
    collections::{HashMap, hash_map::Entry},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

///
/// ClassEntries
/// Everything the registry knows about one concrete class.
///

#[derive(Debug)]
pub struct ClassEntries {
    model: &'static ClassModel,
    properties: Arc<[PropertyEntry]>,
    relations: Arc<[RelationEntry]>,
}

impl ClassEntries {
    /// Discover and bind every entry of `model`. Fails on the first
    /// declaration that breaks the contract.
    pub fn build(model: &'static ClassModel) -> Result<Self, SchemaError> {
        let roles = RoleTable::global()?;

        let properties = discovery::discover(model, Marker::Property)?
            .iter()
            .filter_map(PropertyEntry::from_discovered)
            .collect();

        let relations = discovery::discover(model, Marker::Relation)?
            .iter()
            .filter_map(|found| RelationEntry::from_discovered(found, roles).transpose())
            .collect::<Result<Arc<[_]>, _>>()?;

        Ok(Self {
            model,
            properties,
            relations,
        })
    }

    #[must_use]
    pub const fn model(&self) -> &'static ClassModel {
        self.model
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyEntry] {
        &self.properties
    }

    #[must_use]
    pub fn relations(&self) -> &[RelationEntry] {
        &self.relations
    }
}

///
/// Registry
///
/// Long-lived cache of [`ClassEntries`] keyed by concrete type. Entries are
/// built outside the lock and inserted only if absent, so concurrent first
/// accesses all end up sharing the first entry stored. Dropping the
/// registry drops the cache.
///

#[derive(Debug, Default)]
pub struct Registry {
    cache: RwLock<HashMap<TypeId, Arc<ClassEntries>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries_for<T: ClassSchema>(&self) -> Result<Arc<ClassEntries>, SchemaError> {
        self.entries(TypeId::of::<T>(), T::MODEL)
    }

    /// Entries for the runtime class of `instance`.
    pub fn entries_of(&self, instance: &dyn MetaClass) -> Result<Arc<ClassEntries>, SchemaError> {
        self.entries(Any::type_id(instance.as_any()), instance.class_model())
    }

    pub fn properties_of<T: ClassSchema>(&self) -> Result<Arc<[PropertyEntry]>, SchemaError> {
        Ok(Arc::clone(&self.entries_for::<T>()?.properties))
    }

    pub fn relations_of<T: ClassSchema>(&self) -> Result<Arc<[RelationEntry]>, SchemaError> {
        Ok(Arc::clone(&self.entries_for::<T>()?.relations))
    }

    /// Register `T` up front so a broken declaration surfaces before any
    /// instance is processed.
    pub fn register<T: ClassSchema>(&self) -> Result<(), SchemaError> {
        self.entries_for::<T>().map(|_| ())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read_cache().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_cache().is_empty()
    }

    fn entries(
        &self,
        id: TypeId,
        model: &'static ClassModel,
    ) -> Result<Arc<ClassEntries>, SchemaError> {
        if let Some(entries) = self.read_cache().get(&id) {
            return Ok(Arc::clone(entries));
        }

        let built = Arc::new(ClassEntries::build(model)?);

        let mut cache = self.write_cache();
        let entries = match cache.entry(id) {
            Entry::Occupied(slot) => Arc::clone(slot.get()),
            Entry::Vacant(slot) => {
                debug!(
                    class = model.path,
                    properties = built.properties.len(),
                    relations = built.relations.len(),
                    "registered class"
                );
                Arc::clone(slot.insert(built))
            }
        };

        Ok(entries)
    }

    // The cache is insert-only and every value is complete before it is
    // inserted, so a poisoned lock still guards a consistent map.
    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<ClassEntries>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<ClassEntries>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Follow a projection path from a concrete instance to a base-class value.
pub(crate) fn project<'a>(instance: &'a dyn Any, path: &[Projection]) -> Option<&'a dyn Any> {
    path.iter().try_fold(instance, |target, step| step(target))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::{EndpointProxy, EntityHeader},
        relation::{RelationRole, RelationType},
        test_fixtures::{Dataset, Script, script},
        traits::Entity,
        types::{EntityType, SourceType},
        value::Value,
    };
    use std::{collections::HashSet, thread};

    #[test]
    fn properties_include_every_ancestor_field_once() {
        let registry = Registry::new();
        let properties = registry
            .properties_of::<Dataset>()
            .expect("dataset should register");

        let header_fields = EntityHeader::MODEL.properties.len();
        assert_eq!(properties.len(), 3 + 1 + header_fields);

        let unique: HashSet<_> = properties
            .iter()
            .map(|p| (p.declaring_class().path, p.field()))
            .collect();
        assert_eq!(unique.len(), properties.len());
    }

    #[test]
    fn value_of_reads_through_the_base_chain() {
        let registry = Registry::new();
        let script = script("s-1", "load.sql");
        let entries = registry.entries_of(&script).expect("script should register");

        let identity = entries
            .properties()
            .iter()
            .find(|p| p.attribute_name() == "identity")
            .expect("identity should be inherited from the header");
        assert_eq!(
            identity.value_of(&script).expect("identity should read"),
            Value::Text("s-1".into())
        );

        let name = entries
            .properties()
            .iter()
            .find(|p| p.attribute_name() == "name")
            .expect("name should be declared on the script");
        assert_eq!(
            name.value_of(&script).expect("name should read"),
            Value::Text("load.sql".into())
        );
    }

    #[test]
    fn value_of_rejects_an_instance_of_another_class() {
        let registry = Registry::new();
        let entries = registry.entries_for::<Script>().expect("script should register");
        let name = &entries.properties()[0];
        let header = EntityHeader::new("h", SourceType::Sdk, EntityType::File);

        let err = name.value_of(&header).expect_err("header is not a script");
        assert!(matches!(err, crate::error::ValueExtractionError::TypeMismatch { .. }));
    }

    #[test]
    fn entry_equality_is_declaring_class_and_field() {
        let registry = Registry::new();
        let script_props = registry.properties_of::<Script>().expect("script should register");
        let dataset_props = registry.properties_of::<Dataset>().expect("dataset should register");

        let from_script = script_props
            .iter()
            .find(|p| p.field() == "identity")
            .expect("identity should be present");
        let from_dataset = dataset_props
            .iter()
            .find(|p| p.field() == "identity")
            .expect("identity should be present");

        assert_eq!(from_script, from_dataset);
        assert_ne!(&script_props[0], from_script);
    }

    #[test]
    fn relation_entries_resolve_type_at_registration() {
        let registry = Registry::new();
        let relations = registry.relations_of::<Script>().expect("script should register");

        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].declared_role(), RelationRole::Physical);
        assert_eq!(relations[0].relation_type(), RelationType::LogicalPhysical);
        assert!(relations[0].is_required());
        assert!(!relations[0].is_collection());
    }

    #[test]
    fn connected_entities_follow_field_order() {
        let registry = Registry::new();
        let mut dataset = Dataset::sample("d-1");
        dataset.parents = vec![
            EndpointProxy::new("p-2", SourceType::Hdfs, EntityType::Directory),
            EndpointProxy::new("p-1", SourceType::Hdfs, EntityType::Directory),
        ];

        let relations = registry.relations_of::<Dataset>().expect("dataset should register");
        let connected = relations[0]
            .connected_entities(&dataset)
            .expect("parents should read");
        let ids: Vec<_> = connected.iter().map(|e| e.identity()).collect();

        assert_eq!(ids, vec!["p-2", "p-1"]);
        assert!(relations[0].is_collection());
    }

    #[test]
    fn instance_and_type_lookups_share_the_cache_entry() {
        let registry = Registry::new();
        let script = script("s-1", "a");

        let by_type = registry.entries_for::<Script>().expect("script should register");
        let by_instance = registry.entries_of(&script).expect("script should register");
        let as_entity: &dyn Entity = &script;
        let by_dyn = registry.entries_of(as_entity).expect("script should register");

        assert!(Arc::ptr_eq(&by_type, &by_instance));
        assert!(Arc::ptr_eq(&by_type, &by_dyn));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_first_access_converges_on_one_entry() {
        let registry = Arc::new(Registry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .entries_for::<Dataset>()
                        .expect("dataset should register")
                })
            })
            .collect();

        let entries: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("registration thread should not panic"))
            .collect();

        for entry in &entries {
            assert!(Arc::ptr_eq(entry, &entries[0]));
        }
        assert_eq!(registry.len(), 1);
    }
}
