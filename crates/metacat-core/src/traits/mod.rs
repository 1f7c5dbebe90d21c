use crate::{entity::EntityHeader, model::ClassModel};
use std::any::Any;

///
/// ClassSchema
///
/// Static registration table of a class. Implemented by
/// `#[derive(MetaClass)]` or by hand with a `const` model.
///

pub trait ClassSchema: Any {
    const MODEL: &'static ClassModel;
}

///
/// MetaClass
///
/// Object-safe view of [`ClassSchema`], so the registry and dispatcher can
/// work on `&dyn` instances and dispatch purely on runtime type.
///

pub trait MetaClass: Any {
    fn class_model(&self) -> &'static ClassModel;

    fn as_any(&self) -> &dyn Any;
}

impl<T: ClassSchema> MetaClass for T {
    fn class_model(&self) -> &'static ClassModel {
        T::MODEL
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// Entity
///
/// A catalog-addressable class. Every entity embeds an [`EntityHeader`] at
/// the root of its base-class chain.
///

pub trait Entity: MetaClass {
    fn header(&self) -> &EntityHeader;

    /// Upcast used by relation readers; implement as `self`.
    fn as_entity(&self) -> &dyn Entity;

    /// Proxies stand in for entities already in the catalog and are never
    /// written as entity documents.
    fn is_proxy(&self) -> bool {
        false
    }

    fn identity(&self) -> &str {
        &self.header().identity
    }
}
