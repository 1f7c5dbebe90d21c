use crate::{
    discovery::{Declaration, Discovered},
    error::ValueExtractionError,
    model::{Accessor, ClassModel, Projection, PropertyDecl, PropertyRegistration, ValueReader},
    registry::project,
    traits::MetaClass,
    value::Value,
};
use std::{fmt, sync::Arc};

///
/// PropertyEntry
///
/// One discovered property, bound to its accessor. Built once per
/// (class, field) and shared through the registry cache.
///

#[derive(Clone)]
pub struct PropertyEntry {
    declaring: &'static ClassModel,
    decl: &'static PropertyDecl,
    accessor_name: &'static str,
    multi_valued: bool,
    read: ValueReader,
    path: Arc<[Projection]>,
}

impl PropertyEntry {
    pub(crate) fn from_discovered(found: &Discovered) -> Option<Self> {
        let (Declaration::Property(decl), Accessor::Value(read)) =
            (found.declaration, found.accessor.read)
        else {
            return None;
        };

        Some(Self {
            declaring: found.declaring,
            decl,
            accessor_name: found.accessor.name,
            multi_valued: found.accessor.returns.is_collection(),
            read,
            path: Arc::clone(&found.path),
        })
    }

    /// Published name; the field name unless an attribute was given.
    #[must_use]
    pub const fn attribute_name(&self) -> &'static str {
        self.decl.attribute_name()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.decl.required
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.decl.field
    }

    #[must_use]
    pub const fn accessor_name(&self) -> &'static str {
        self.accessor_name
    }

    #[must_use]
    pub const fn declaring_class(&self) -> &'static ClassModel {
        self.declaring
    }

    #[must_use]
    pub const fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    #[must_use]
    pub const fn registration(&self) -> Option<&'static PropertyRegistration> {
        self.decl.registration.as_ref()
    }

    /// Read the property off `instance` through the bound accessor.
    ///
    /// Accessor failures come back untouched; nothing is substituted.
    pub fn value_of(&self, instance: &dyn MetaClass) -> Result<Value, ValueExtractionError> {
        let target = project(instance.as_any(), &self.path)
            .ok_or_else(|| ValueExtractionError::type_mismatch(self.declaring.path, self.decl.field))?;

        (self.read)(target)
    }
}

impl PartialEq for PropertyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.declaring.path == other.declaring.path && self.decl.field == other.decl.field
    }
}

impl Eq for PropertyEntry {}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("class", &self.declaring.path)
            .field("field", &self.decl.field)
            .field("attribute", &self.attribute_name())
            .field("required", &self.decl.required)
            .finish_non_exhaustive()
    }
}
