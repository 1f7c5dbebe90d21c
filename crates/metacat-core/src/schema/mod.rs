//! Catalog schema registration: namespaces, packages, classes and the
//! custom properties they publish.

use crate::{
    error::SchemaError,
    model::ClassModel,
    registry::{ClassEntries, PropertyEntry},
    types::CustomPropertyType,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use tracing::debug;

/// Namespace owned by the catalog itself.
pub const DEFAULT_NAMESPACE: &str = "nav";

///
/// Namespace
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub external: bool,
}

impl Namespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external: false,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_NAMESPACE
    }
}

///
/// MetaClassPackage
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaClassPackage {
    pub name: String,
}

///
/// MetaClassDef
/// A custom class as the catalog sees it.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaClassDef {
    pub package_name: String,
    pub name: String,
}

impl MetaClassDef {
    /// Key used in [`MetadataModel::mappings`].
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_name, self.name)
    }
}

///
/// CustomProperty
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProperty {
    pub namespace: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: CustomPropertyType,
    pub multi_valued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl CustomProperty {
    fn from_entry(namespace: &str, entry: &PropertyEntry) -> Result<Option<Self>, SchemaError> {
        let Some(registration) = entry.registration() else {
            return Ok(None);
        };

        let enum_values = match registration.field_type {
            CustomPropertyType::Enum if registration.values.is_empty() => {
                return Err(SchemaError::EnumWithoutValues {
                    class: entry.declaring_class().name,
                    field: entry.field(),
                });
            }
            CustomPropertyType::Enum => Some(
                registration
                    .values
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            _ => None,
        };

        Ok(Some(Self {
            namespace: namespace.to_string(),
            name: entry.attribute_name().to_string(),
            property_type: registration.field_type,
            multi_valued: entry.is_multi_valued(),
            enum_values,
            pattern: registration.pattern.map(str::to_string),
            max_length: registration.max_length,
        }))
    }

    /// Key used in [`MetadataModel::mappings`].
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

///
/// MetadataModel
///
/// Everything the catalog needs to know about a set of custom classes
/// before their instances can be published.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataModel {
    pub namespaces: BTreeSet<Namespace>,
    pub packages: BTreeSet<MetaClassPackage>,
    pub classes: BTreeSet<MetaClassDef>,
    /// Registered properties, ordered by name.
    pub properties: Vec<CustomProperty>,
    /// `"package.class"` to the `"namespace.property"` names it publishes.
    pub mappings: BTreeMap<String, BTreeSet<String>>,
}

impl MetadataModel {
    /// Build the schema for `classes` under `namespace`. The namespace is
    /// used for both the class package and the custom properties.
    ///
    /// Every class must declare a model name. Only properties marked for
    /// registration are included, inherited ones too. A property name
    /// registered by two classes must agree on type and multi-valuedness.
    pub fn build(classes: &[&'static ClassModel], namespace: &str) -> Result<Self, SchemaError> {
        if namespace.trim().is_empty() {
            return Err(SchemaError::EmptyNamespace);
        }

        let package = MetaClassPackage {
            name: namespace.to_string(),
        };
        let mut model = Self {
            namespaces: BTreeSet::from([Namespace::new(namespace)]),
            ..Self::default()
        };
        let mut properties = BTreeMap::<String, CustomProperty>::new();

        for &class in classes {
            let name = class
                .model
                .ok_or(SchemaError::MissingModel { class: class.name })?;
            let def = MetaClassDef {
                package_name: package.name.clone(),
                name: name.to_string(),
            };

            let entries = ClassEntries::build(class)?;
            let mut mapped = BTreeSet::new();

            for entry in entries.properties() {
                let Some(property) = CustomProperty::from_entry(namespace, entry)? else {
                    continue;
                };
                mapped.insert(property.qualified_name());

                match properties.entry(property.name.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(property);
                    }
                    Entry::Occupied(slot) => check_compatible(slot.get(), &property)?,
                }
            }

            model
                .mappings
                .entry(def.qualified_name())
                .or_default()
                .extend(mapped);
            model.classes.insert(def);
        }

        model.packages.insert(package);
        model.properties = properties.into_values().collect();

        debug!(
            namespace,
            classes = model.classes.len(),
            properties = model.properties.len(),
            "built metadata model"
        );

        Ok(model)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&CustomProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

fn check_compatible(existing: &CustomProperty, found: &CustomProperty) -> Result<(), SchemaError> {
    if existing.property_type == found.property_type && existing.multi_valued == found.multi_valued
    {
        return Ok(());
    }

    Err(SchemaError::ConflictingProperty {
        name: found.name.clone(),
        existing: existing.property_type,
        existing_multi: existing.multi_valued,
        found: found.property_type,
        found_multi: found.multi_valued,
    })
}

///
/// TESTS
///
