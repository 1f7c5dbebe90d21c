use crate::{
    config::ConfigError,
    model::ReturnShape,
    relation::{RelationRole, RelationType},
    sink::SinkError,
    types::CustomPropertyType,
};
use std::{error::Error as StdError, fmt};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error returned by the registry, dispatcher, and writer.
/// Every concern keeps its own structured enum; this one only routes.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ValueExtractionError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Config(_) => ErrorClass::Config,
            Self::Extraction(_) => ErrorClass::Extraction,
            Self::Schema(_) => ErrorClass::Schema,
            Self::Sink(_) => ErrorClass::Sink,
            Self::Validation(_) => ErrorClass::Validation,
        }
    }

    /// Whether the failure belongs to one instance rather than to a class
    /// declaration or the surrounding environment.
    #[must_use]
    pub const fn is_instance_error(&self) -> bool {
        matches!(self.class(), ErrorClass::Extraction | ErrorClass::Validation)
    }
}

///
/// ErrorClass
/// Coarse taxonomy used by callers to decide whether to abort the batch
/// or only reject the current instance.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Config,
    Extraction,
    Schema,
    Sink,
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Extraction => "extraction",
            Self::Schema => "schema",
            Self::Sink => "sink",
            Self::Validation => "validation",
        };

        write!(f, "{label}")
    }
}

///
/// SchemaError
///
/// A declared class breaks the declaration contract. Detected while a
/// class is registered, before any instance of it is processed.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error(
        "accessor '{accessor}' on class '{class}' cannot serve {expected} field '{field}'"
    )]
    AccessorKind {
        class: &'static str,
        field: &'static str,
        accessor: &'static str,
        expected: &'static str,
    },

    #[error("relation role {role} is claimed by both {first} and {second}")]
    AmbiguousRole {
        role: RelationRole,
        first: RelationType,
        second: RelationType,
    },

    #[error(
        "property '{name}' is registered as {existing} (multi-valued: {existing_multi}), \
         redeclared as {found} (multi-valued: {found_multi})"
    )]
    ConflictingProperty {
        name: String,
        existing: CustomPropertyType,
        existing_multi: bool,
        found: CustomPropertyType,
        found_multi: bool,
    },

    #[error("class '{class}' appears twice in its own inheritance chain")]
    CyclicHierarchy { class: &'static str },

    #[error(
        "class '{class}' publishes attribute '{attribute}' from both '{first}' and '{second}'"
    )]
    DuplicateAttribute {
        class: &'static str,
        attribute: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("namespace must not be empty")]
    EmptyNamespace,

    #[error("enum property '{field}' on class '{class}' declares no values")]
    EnumWithoutValues {
        class: &'static str,
        field: &'static str,
    },

    #[error(
        "relation field '{field}' on class '{class}' must return an entity or a collection \
         of entities, but accessor '{accessor}' returns {returns}"
    )]
    InvalidRelationAccessor {
        class: &'static str,
        field: &'static str,
        accessor: &'static str,
        returns: ReturnShape,
    },

    #[error(
        "no accessor for field '{field}' on class '{class}' \
         (looked for '{field}', 'get_{field}', 'is_{field}')"
    )]
    MissingAccessor {
        class: &'static str,
        field: &'static str,
    },

    #[error("class '{class}' declares no model name")]
    MissingModel { class: &'static str },

    #[error("role {role} is not an endpoint of relation type {relation_type}")]
    RoleNotInType {
        role: RelationRole,
        relation_type: RelationType,
    },

    #[error("relation role {role} is not bound to any relation type")]
    UnknownRole { role: RelationRole },
}

///
/// ValidationError
///
/// A specific instance is missing something its class requires.
/// Rejects that instance only.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("identity component {index} is empty")]
    EmptyIdentityComponent { index: usize },

    #[error("{class} instance has no identity")]
    MissingIdentity { class: &'static str },

    #[error("value of required property '{attribute}' on {class} is null or empty")]
    MissingProperty {
        class: &'static str,
        attribute: &'static str,
    },

    #[error("required relation '{field}' on {class} has no connected entities")]
    MissingRelation {
        class: &'static str,
        field: &'static str,
    },
}

impl ValidationError {
    /// Attribute or field the violation is about, when there is one.
    #[must_use]
    pub const fn attribute(&self) -> Option<&'static str> {
        match self {
            Self::MissingProperty { attribute, .. } => Some(*attribute),
            Self::MissingRelation { field, .. } => Some(*field),
            Self::EmptyIdentityComponent { .. } | Self::MissingIdentity { .. } => None,
        }
    }
}

///
/// ValueExtractionError
///
/// A bound accessor failed while being read. The original failure is kept
/// as the error source.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ValueExtractionError {
    #[error("accessor for '{field}' on {class} failed")]
    AccessorFailed {
        class: &'static str,
        field: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    #[error("accessor for '{field}' was handed an instance that is not a {class}")]
    TypeMismatch {
        class: &'static str,
        field: &'static str,
    },
}

impl ValueExtractionError {
    pub fn accessor_failed(
        class: &'static str,
        field: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::AccessorFailed {
            class,
            field,
            source: source.into(),
        }
    }

    #[must_use]
    pub const fn type_mismatch(class: &'static str, field: &'static str) -> Self {
        Self::TypeMismatch { class, field }
    }
}

///
/// TESTS
///
