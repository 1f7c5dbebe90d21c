use crate::{error::ValueExtractionError, traits::Entity, value::Value};
use std::{any::Any, fmt};

///
/// ValueReader
/// Reads one property value off an instance of the declaring class.
///

pub type ValueReader = fn(&dyn Any) -> Result<Value, ValueExtractionError>;

///
/// EntityReader
/// Reads the entities a relation field points at, in field order.
///

pub type EntityReader =
    for<'a> fn(&'a dyn Any) -> Result<Vec<&'a dyn Entity>, ValueExtractionError>;

///
/// ReturnShape
/// What an accessor hands back, as far as discovery cares.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReturnShape {
    Collection,
    Entity,
    EntityCollection,
    Scalar,
}

impl ReturnShape {
    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(self, Self::Entity | Self::EntityCollection)
    }

    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Collection | Self::EntityCollection)
    }
}

impl fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Collection => "a collection of values",
            Self::Entity => "an entity",
            Self::EntityCollection => "a collection of entities",
            Self::Scalar => "a scalar value",
        };

        f.write_str(label)
    }
}

///
/// Accessor
///

#[derive(Clone, Copy)]
pub enum Accessor {
    Value(ValueReader),
    Entities(EntityReader),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Accessor::Value"),
            Self::Entities(_) => f.write_str("Accessor::Entities"),
        }
    }
}

///
/// AccessorDecl
///
/// A public, argument-free read accessor. Discovery binds declared fields
/// to these by name.
///

#[derive(Clone, Copy, Debug)]
pub struct AccessorDecl {
    pub name: &'static str,
    pub returns: ReturnShape,
    pub read: Accessor,
}

impl AccessorDecl {
    #[must_use]
    pub const fn value(name: &'static str, returns: ReturnShape, read: ValueReader) -> Self {
        Self {
            name,
            returns,
            read: Accessor::Value(read),
        }
    }

    #[must_use]
    pub const fn entities(name: &'static str, returns: ReturnShape, read: EntityReader) -> Self {
        Self {
            name,
            returns,
            read: Accessor::Entities(read),
        }
    }
}
