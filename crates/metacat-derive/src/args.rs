use darling::{
    FromDeriveInput, FromField, FromMeta,
    ast::{Data, NestedMeta},
    util::Ignored,
};
use syn::{Attribute, Generics, Ident, Lit, Meta, Type};

///
/// ClassArgs
///

#[derive(FromDeriveInput)]
#[darling(attributes(metacat), supports(struct_named))]
pub struct ClassArgs {
    pub ident: Ident,
    pub generics: Generics,
    pub data: Data<Ignored, FieldArgs>,

    /// Custom model name written as the entity discriminator.
    #[darling(default)]
    pub model: Option<String>,
}

///
/// FieldArgs
///

#[derive(FromField)]
#[darling(attributes(metacat), forward_attrs(property, relation))]
pub struct FieldArgs {
    pub ident: Option<Ident>,
    pub ty: Type,
    pub attrs: Vec<Attribute>,

    #[darling(default)]
    pub base: bool,
}

///
/// Marker
/// What a field declares, after its forwarded attributes are parsed.
///

#[derive(Debug)]
pub enum Marker {
    Property(PropertyArgs),
    Relation(RelationArgs),
}

impl FieldArgs {
    pub fn marker(&self) -> darling::Result<Option<Marker>> {
        let mut found = None;

        for attr in &self.attrs {
            let marker = if attr.path().is_ident("property") {
                Marker::Property(PropertyArgs::from_attr(attr)?)
            } else if attr.path().is_ident("relation") {
                Marker::Relation(RelationArgs::from_meta(&attr.meta)?)
            } else {
                continue;
            };

            if found.is_some() {
                return Err(darling::Error::custom(
                    "a field can carry one #[property] or #[relation], not both",
                )
                .with_span(attr));
            }
            found = Some(marker);
        }

        Ok(found)
    }
}

///
/// PropertyArgs
///

#[derive(Debug, Default, FromMeta)]
pub struct PropertyArgs {
    #[darling(default)]
    pub attribute: Option<String>,

    #[darling(default)]
    pub required: bool,

    #[darling(default)]
    pub getter: Option<Ident>,

    /// Fallible getter; its error becomes the extraction error's source.
    #[darling(default)]
    pub try_getter: Option<Ident>,

    #[darling(default)]
    pub register: bool,

    #[darling(default)]
    pub field_type: Option<String>,

    #[darling(default)]
    pub values: Option<StringList>,

    #[darling(default)]
    pub pattern: Option<String>,

    #[darling(default)]
    pub max_length: Option<u32>,
}

impl PropertyArgs {
    // bare `#[property]` has no list to parse
    fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        let args = match &attr.meta {
            Meta::Path(_) => Self::default(),
            meta => Self::from_meta(meta)?,
        };
        args.validate().map_err(|err| err.with_span(attr))?;

        Ok(args)
    }

    pub const fn is_registered(&self) -> bool {
        self.register || self.field_type.is_some()
    }

    fn validate(&self) -> darling::Result<()> {
        if self.getter.is_some() && self.try_getter.is_some() {
            return Err(darling::Error::custom(
                "`getter` and `try_getter` are mutually exclusive",
            ));
        }

        let constrains =
            self.values.is_some() || self.pattern.is_some() || self.max_length.is_some();
        if constrains && !self.is_registered() {
            return Err(darling::Error::custom(
                "`values`, `pattern` and `max_length` need `register`",
            ));
        }

        Ok(())
    }
}

///
/// RelationArgs
///

#[derive(Debug, FromMeta)]
pub struct RelationArgs {
    /// Role of the entity on the other end.
    pub role: String,

    #[darling(default)]
    pub source_type: Option<String>,

    #[darling(default)]
    pub required: bool,
}

///
/// StringList
/// `values("A", "B")`
///

#[derive(Debug, Default)]
pub struct StringList(pub Vec<String>);

impl FromMeta for StringList {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        items
            .iter()
            .map(|item| match item {
                NestedMeta::Lit(Lit::Str(value)) => Ok(value.value()),
                _ => Err(darling::Error::unexpected_type("non-string literal")),
            })
            .collect::<darling::Result<Vec<_>>>()
            .map(Self)
    }
}
