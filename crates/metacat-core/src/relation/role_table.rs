use crate::{
    error::SchemaError,
    relation::{RelationRole, RelationType},
};
use std::{collections::HashMap, sync::OnceLock};

static GLOBAL: OnceLock<Result<RoleTable, SchemaError>> = OnceLock::new();

///
/// RoleTable
///
/// Role → relation type lookup. The process-wide table is built from
/// [`RelationType::ALL`] on first use and never rebuilt or mutated.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoleTable {
    by_role: HashMap<RelationRole, RelationType>,
}

impl RoleTable {
    /// The shared table, built on first call.
    pub fn global() -> Result<&'static Self, SchemaError> {
        GLOBAL
            .get_or_init(|| Self::from_types(RelationType::ALL))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn from_types(types: &[RelationType]) -> Result<Self, SchemaError> {
        Self::from_bindings(types.iter().flat_map(|relation_type| {
            relation_type
                .roles()
                .map(|role| (*relation_type, role))
        }))
    }

    /// Build a table from explicit `(type, role)` bindings. A role bound to
    /// two different types is rejected.
    pub fn from_bindings(
        bindings: impl IntoIterator<Item = (RelationType, RelationRole)>,
    ) -> Result<Self, SchemaError> {
        let mut by_role = HashMap::new();

        for (relation_type, role) in bindings {
            match by_role.insert(role, relation_type) {
                Some(existing) if existing != relation_type => {
                    return Err(SchemaError::AmbiguousRole {
                        role,
                        first: existing,
                        second: relation_type,
                    });
                }
                _ => {}
            }
        }

        Ok(Self { by_role })
    }

    pub fn type_for_role(&self, role: RelationRole) -> Result<RelationType, SchemaError> {
        self.by_role
            .get(&role)
            .copied()
            .ok_or(SchemaError::UnknownRole { role })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_role.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_role.is_empty()
    }
}

/// Resolve a role through the process-wide table.
pub fn type_for_role(role: RelationRole) -> Result<RelationType, SchemaError> {
    RoleTable::global()?.type_for_role(role)
}

///
/// TESTS
///
