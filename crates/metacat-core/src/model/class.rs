use crate::model::{AccessorDecl, PropertyDecl, RelationDecl};
use std::{any::Any, fmt};

///
/// Projection
///
/// Reads the embedded base-class value out of a derived instance.
/// Returns `None` when handed an instance of a different type.
///

pub type Projection = for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>;

///
/// ClassModel
/// Registration table for one class.
///

#[derive(Debug)]
pub struct ClassModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Class name used in error messages.
    pub name: &'static str,
    /// Custom model name published as the entity discriminator.
    pub model: Option<&'static str>,
    /// Embedded base class, if any.
    pub parent: Option<ParentLink>,
    /// Property declarations, in field order.
    pub properties: &'static [PropertyDecl],
    /// Relation declarations, in field order.
    pub relations: &'static [RelationDecl],
    /// Public read accessors available on the class.
    pub accessors: &'static [AccessorDecl],
}

impl ClassModel {
    #[must_use]
    pub const fn new(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            model: None,
            parent: None,
            properties: &[],
            relations: &[],
            accessors: &[],
        }
    }

    #[must_use]
    pub const fn model(mut self, model: &'static str) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub const fn parent(mut self, parent: ParentLink) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub const fn properties(mut self, properties: &'static [PropertyDecl]) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub const fn relations(mut self, relations: &'static [RelationDecl]) -> Self {
        self.relations = relations;
        self
    }

    #[must_use]
    pub const fn accessors(mut self, accessors: &'static [AccessorDecl]) -> Self {
        self.accessors = accessors;
        self
    }

    /// Find an accessor by exact name.
    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&'static AccessorDecl> {
        self.accessors.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn property(&self, field: &str) -> Option<&'static PropertyDecl> {
        self.properties.iter().find(|p| p.field == field)
    }

    #[must_use]
    pub fn relation(&self, field: &str) -> Option<&'static RelationDecl> {
        self.relations.iter().find(|r| r.field == field)
    }

    /// Iterate this class and its ancestors, most-derived first.
    ///
    /// The walk stops after `limit` classes so a malformed chain cannot spin.
    pub fn ancestry(&'static self, limit: usize) -> impl Iterator<Item = &'static Self> {
        std::iter::successors(Some(self), |model| model.parent.map(|link| link.model)).take(limit)
    }
}

///
/// ParentLink
///
/// Link from a derived class to the base class it embeds.
///

#[derive(Clone, Copy)]
pub struct ParentLink {
    pub model: &'static ClassModel,
    pub project: Projection,
}

impl ParentLink {
    #[must_use]
    pub const fn new(model: &'static ClassModel, project: Projection) -> Self {
        Self { model, project }
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentLink")
            .field("model", &self.model.path)
            .finish_non_exhaustive()
    }
}
