//! Annotation discovery.
//!
//! Walks a class and its base-class chain, binding every declared property
//! or relation field to one of the class's public accessors. Pure: reads
//! only the static [`ClassModel`] tables.

use crate::{
    error::SchemaError,
    model::{Accessor, AccessorDecl, ClassModel, Projection, PropertyDecl, RelationDecl},
};
use std::{collections::HashSet, sync::Arc};

/// Upper bound on base-class depth; a deeper chain is treated as cyclic.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

///
/// Marker
/// Which declaration kind to discover.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Marker {
    Property,
    Relation,
}

///
/// Declaration
///

#[derive(Clone, Copy, Debug)]
pub enum Declaration {
    Property(&'static PropertyDecl),
    Relation(&'static RelationDecl),
}

impl Declaration {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Property(decl) => decl.field,
            Self::Relation(decl) => decl.field,
        }
    }
}

///
/// Discovered
///
/// A declared field bound to its accessor. `path` projects a concrete
/// instance down to the declaring class, outermost step first.
///

#[derive(Clone, Debug)]
pub struct Discovered {
    pub declaring: &'static ClassModel,
    pub declaration: Declaration,
    pub accessor: &'static AccessorDecl,
    pub path: Arc<[Projection]>,
}

/// Discover every `marker` declaration on `model` and its ancestors.
///
/// Fields come most-derived class first, in declaration order within each
/// class; an inherited field appears exactly once.
pub fn discover(
    model: &'static ClassModel,
    marker: Marker,
) -> Result<Vec<Discovered>, SchemaError> {
    let mut found = Vec::new();
    let mut seen_fields = HashSet::new();
    let mut seen_classes = HashSet::new();
    let mut path: Vec<Projection> = Vec::new();
    let mut current = Some(model);

    while let Some(class) = current {
        if !seen_classes.insert(class.path) || seen_classes.len() > MAX_HIERARCHY_DEPTH {
            return Err(SchemaError::CyclicHierarchy { class: class.path });
        }

        let shared: Arc<[Projection]> = Arc::from(path.as_slice());
        for declaration in declarations(class, marker) {
            if !seen_fields.insert((class.path, declaration.field())) {
                continue;
            }

            let accessor = resolve_accessor(class, declaration.field())?;
            check_accessor(class, declaration, accessor)?;

            found.push(Discovered {
                declaring: class,
                declaration,
                accessor,
                path: Arc::clone(&shared),
            });
        }

        current = class.parent.map(|link| {
            path.push(link.project);
            link.model
        });
    }

    if marker == Marker::Property {
        check_unique_attributes(model, &found)?;
    }

    Ok(found)
}

/// Bean-style lookup: `field`, then `get_field`, then `is_field`.
pub fn resolve_accessor(
    class: &'static ClassModel,
    field: &'static str,
) -> Result<&'static AccessorDecl, SchemaError> {
    let matches = |name: &str, prefix: &str| {
        name.strip_prefix(prefix)
            .is_some_and(|rest| rest == field)
    };

    class
        .accessor(field)
        .or_else(|| class.accessors.iter().find(|a| matches(a.name, "get_")))
        .or_else(|| class.accessors.iter().find(|a| matches(a.name, "is_")))
        .ok_or(SchemaError::MissingAccessor {
            class: class.path,
            field,
        })
}

fn declarations(
    class: &'static ClassModel,
    marker: Marker,
) -> Box<dyn Iterator<Item = Declaration>> {
    match marker {
        Marker::Property => Box::new(class.properties.iter().map(Declaration::Property)),
        Marker::Relation => Box::new(class.relations.iter().map(Declaration::Relation)),
    }
}

fn check_accessor(
    class: &'static ClassModel,
    declaration: Declaration,
    accessor: &'static AccessorDecl,
) -> Result<(), SchemaError> {
    match (declaration, accessor.read) {
        (Declaration::Property(_), Accessor::Value(_)) => Ok(()),
        (Declaration::Property(decl), Accessor::Entities(_)) => Err(SchemaError::AccessorKind {
            class: class.path,
            field: decl.field,
            accessor: accessor.name,
            expected: "property",
        }),
        (Declaration::Relation(decl), _) if !accessor.returns.is_entity() => {
            Err(SchemaError::InvalidRelationAccessor {
                class: class.path,
                field: decl.field,
                accessor: accessor.name,
                returns: accessor.returns,
            })
        }
        (Declaration::Relation(_), Accessor::Entities(_)) => Ok(()),
        (Declaration::Relation(decl), Accessor::Value(_)) => Err(SchemaError::AccessorKind {
            class: class.path,
            field: decl.field,
            accessor: accessor.name,
            expected: "relation",
        }),
    }
}

fn check_unique_attributes(
    model: &'static ClassModel,
    found: &[Discovered],
) -> Result<(), SchemaError> {
    let mut published: Vec<(&'static str, &'static str)> = Vec::with_capacity(found.len());

    for entry in found {
        let Declaration::Property(decl) = entry.declaration else {
            continue;
        };
        let attribute = decl.attribute_name();

        if let Some((_, first)) = published.iter().find(|(name, _)| *name == attribute) {
            return Err(SchemaError::DuplicateAttribute {
                class: model.path,
                attribute,
                first,
                second: entry.declaring.path,
            });
        }
        published.push((attribute, entry.declaring.path));
    }

    Ok(())
}

///
/// TESTS
///
