//! Relation types, their endpoint roles, and the records built from
//! relation declarations.

mod builder;
mod record;
mod role_table;

pub use builder::RelationBuilder;
pub use record::{Endpoint, Relation};
pub use role_table::{RoleTable, type_for_role};

use crate::{error::SchemaError, types::catalog_enum};
use serde::{Deserialize, Serialize};

///
/// EndpointSlot
/// Position of a role within its relation type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EndpointSlot {
    First,
    Second,
}

///
/// RelationType
///
/// Closed set of relation kinds. Each defines exactly two roles; the first
/// role always occupies endpoint 1.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    DataFlow,
    InstanceOf,
    LogicalPhysical,
    ParentChild,
}

catalog_enum!(RelationType, "relation type", {
    DataFlow => "DATA_FLOW",
    InstanceOf => "INSTANCE_OF",
    LogicalPhysical => "LOGICAL_PHYSICAL",
    ParentChild => "PARENT_CHILD",
});

impl RelationType {
    /// The two roles of this type, endpoint 1 first.
    #[must_use]
    pub const fn roles(self) -> [RelationRole; 2] {
        match self {
            Self::DataFlow => [RelationRole::Source, RelationRole::Target],
            Self::InstanceOf => [RelationRole::Template, RelationRole::Instance],
            Self::LogicalPhysical => [RelationRole::Logical, RelationRole::Physical],
            Self::ParentChild => [RelationRole::Parent, RelationRole::Child],
        }
    }

    #[must_use]
    pub const fn role_at(self, slot: EndpointSlot) -> RelationRole {
        let [first, second] = self.roles();
        match slot {
            EndpointSlot::First => first,
            EndpointSlot::Second => second,
        }
    }

    #[must_use]
    pub fn contains(self, role: RelationRole) -> bool {
        self.roles().contains(&role)
    }

    /// The other role of this type. The owner of a relation always plays
    /// the complement of the role declared for the entity it points at.
    pub fn complement(self, role: RelationRole) -> Result<RelationRole, SchemaError> {
        match self.roles() {
            [first, second] if first == role => Ok(second),
            [first, second] if second == role => Ok(first),
            _ => Err(SchemaError::RoleNotInType {
                role,
                relation_type: self,
            }),
        }
    }
}

///
/// RelationRole
///
/// `Endpoint1`/`Endpoint2` are generic conjoint roles that no relation type
/// binds; resolving them is a schema error.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationRole {
    Child,
    Endpoint1,
    Endpoint2,
    Instance,
    Logical,
    Parent,
    Physical,
    Source,
    Target,
    Template,
}

catalog_enum!(RelationRole, "relation role", {
    Child => "CHILD",
    Endpoint1 => "ENDPOINT1",
    Endpoint2 => "ENDPOINT2",
    Instance => "INSTANCE",
    Logical => "LOGICAL",
    Parent => "PARENT",
    Physical => "PHYSICAL",
    Source => "SOURCE",
    Target => "TARGET",
    Template => "TEMPLATE",
});

impl RelationRole {
    #[must_use]
    pub const fn slot(self) -> EndpointSlot {
        match self {
            Self::Endpoint1 | Self::Logical | Self::Parent | Self::Source | Self::Template => {
                EndpointSlot::First
            }
            Self::Child | Self::Endpoint2 | Self::Instance | Self::Physical | Self::Target => {
                EndpointSlot::Second
            }
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Child => Self::Parent,
            Self::Endpoint1 => Self::Endpoint2,
            Self::Endpoint2 => Self::Endpoint1,
            Self::Instance => Self::Template,
            Self::Logical => Self::Physical,
            Self::Parent => Self::Child,
            Self::Physical => Self::Logical,
            Self::Source => Self::Target,
            Self::Target => Self::Source,
            Self::Template => Self::Instance,
        }
    }
}

///
/// TESTS
///
