use syn::{GenericArgument, PathArguments, Type};

const COLLECTIONS: &[&str] = &["Vec", "VecDeque", "BTreeSet", "LinkedList"];

// Hash order changes between runs, so these never back a relation.
const UNORDERED: &[&str] = &["HashSet", "HashMap"];

///
/// Shape
/// What a field holds, judged from its declared type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    Collection,
    Optional,
    Single,
}

impl Shape {
    pub fn of(ty: &Type) -> Self {
        match last_segment(ty) {
            Some(name) if COLLECTIONS.contains(&name.as_str()) => Self::Collection,
            Some(name) if name == "Option" => Self::Optional,
            _ => Self::Single,
        }
    }

    /// Multi-valued as far as the catalog is concerned: a collection, or an
    /// optional collection.
    pub fn is_multi_valued(ty: &Type) -> bool {
        match Self::of(ty) {
            Self::Collection => true,
            Self::Optional => option_inner(ty).is_some_and(|inner| Self::of(inner) == Self::Collection),
            Self::Single => false,
        }
    }

    /// A hashed collection, directly or behind `Option`.
    pub fn is_unordered(ty: &Type) -> bool {
        let outer = match Self::of(ty) {
            Self::Optional => option_inner(ty),
            _ => Some(ty),
        };

        outer
            .and_then(last_segment)
            .is_some_and(|name| UNORDERED.contains(&name.as_str()))
    }
}

fn last_segment(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };

    path.path
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let PathArguments::AngleBracketed(args) = &path.path.segments.last()?.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}
