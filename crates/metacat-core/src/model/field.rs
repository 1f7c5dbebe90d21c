use crate::{
    relation::RelationRole,
    types::{CustomPropertyType, SourceType},
};

///
/// PropertyDecl
/// One `#[property]` declaration.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyDecl {
    /// Rust field name; also the base of accessor resolution.
    pub field: &'static str,
    /// Published attribute name, when it differs from the field name.
    pub attribute: Option<&'static str>,
    pub required: bool,
    /// Present when the property is registered with the catalog schema.
    pub registration: Option<PropertyRegistration>,
}

impl PropertyDecl {
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            attribute: None,
            required: false,
            registration: None,
        }
    }

    #[must_use]
    pub const fn attribute(mut self, attribute: &'static str) -> Self {
        self.attribute = Some(attribute);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn register(mut self, registration: PropertyRegistration) -> Self {
        self.registration = Some(registration);
        self
    }

    /// Published name, falling back to the field name.
    #[must_use]
    pub const fn attribute_name(&self) -> &'static str {
        match self.attribute {
            Some(attribute) => attribute,
            None => self.field,
        }
    }
}

///
/// PropertyRegistration
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyRegistration {
    pub field_type: CustomPropertyType,
    /// Allowed values for `ENUM` properties.
    pub values: &'static [&'static str],
    pub pattern: Option<&'static str>,
    pub max_length: Option<u32>,
}

impl PropertyRegistration {
    #[must_use]
    pub const fn new(field_type: CustomPropertyType) -> Self {
        Self {
            field_type,
            values: &[],
            pattern: None,
            max_length: None,
        }
    }

    #[must_use]
    pub const fn values(mut self, values: &'static [&'static str]) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

///
/// RelationDecl
///
/// One `#[relation]` declaration. `role` is the role of the entity at the
/// other end; the owner's role is derived from it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelationDecl {
    pub field: &'static str,
    pub role: RelationRole,
    /// Source type used for the other endpoint when that entity has none.
    pub source_type: Option<SourceType>,
    pub required: bool,
}

impl RelationDecl {
    #[must_use]
    pub const fn new(field: &'static str, role: RelationRole) -> Self {
        Self {
            field,
            role,
            source_type: None,
            required: false,
        }
    }

    #[must_use]
    pub const fn source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = Some(source_type);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
