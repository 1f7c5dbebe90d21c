use crate::{
    args::{ClassArgs, FieldArgs, Marker, PropertyArgs, RelationArgs},
    names,
    shape::Shape,
};
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, LitStr, Type};

// derive_meta_class
pub fn derive_meta_class(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match ClassArgs::from_derive_input(&input).and_then(|args| Class::parse(&args)) {
        Ok(class) => class.expand(),
        Err(err) => err.write_errors(),
    }
}

///
/// Class
/// A derive input with every field attribute resolved.
///

struct Class {
    ident: Ident,
    model: Option<String>,
    base: Option<(Ident, Type)>,
    properties: Vec<Property>,
    relations: Vec<Relation>,
}

struct Property {
    field: Ident,
    ty: Type,
    args: PropertyArgs,
}

struct Relation {
    field: Ident,
    ty: Type,
    args: RelationArgs,
}

impl Class {
    fn parse(args: &ClassArgs) -> darling::Result<Self> {
        if !args.generics.params.is_empty() {
            return Err(
                darling::Error::custom("MetaClass cannot be derived for generic types")
                    .with_span(&args.generics),
            );
        }

        let fields = args
            .data
            .as_ref()
            .take_struct()
            .ok_or_else(|| darling::Error::unsupported_shape("enum"))?;

        let mut errors = darling::Error::accumulator();
        let mut class = Self {
            ident: args.ident.clone(),
            model: args.model.clone(),
            base: None,
            properties: Vec::new(),
            relations: Vec::new(),
        };

        for field in fields.fields {
            if let Err(err) = class.add_field(field) {
                errors.push(err);
            }
        }
        errors.finish()?;

        Ok(class)
    }

    fn add_field(&mut self, field: &FieldArgs) -> darling::Result<()> {
        let Some(ident) = field.ident.clone() else {
            return Err(darling::Error::unsupported_shape("tuple field"));
        };
        let marker = field.marker()?;

        if field.base {
            if marker.is_some() {
                return Err(darling::Error::custom(
                    "the base field cannot also be a property or relation",
                )
                .with_span(&ident));
            }
            if self.base.is_some() {
                return Err(
                    darling::Error::custom("a class has at most one base field").with_span(&ident)
                );
            }
            self.base = Some((ident, field.ty.clone()));

            return Ok(());
        }

        match marker {
            Some(Marker::Property(args)) => self.properties.push(Property {
                field: ident,
                ty: field.ty.clone(),
                args,
            }),
            Some(Marker::Relation(_)) if Shape::is_unordered(&field.ty) => {
                return Err(darling::Error::custom(
                    "relation collections must have a stable iteration order; use Vec or BTreeSet",
                )
                .with_span(&ident));
            }
            Some(Marker::Relation(args)) => self.relations.push(Relation {
                field: ident,
                ty: field.ty.clone(),
                args,
            }),
            None => {}
        }

        Ok(())
    }

    fn expand(&self) -> TokenStream {
        let ident = &self.ident;
        let name = ident.to_string();

        let mut readers = Vec::new();
        let mut accessors = Vec::new();
        let mut property_decls = Vec::new();
        let mut relation_decls = Vec::new();
        let mut errors = darling::Error::accumulator();

        for property in &self.properties {
            readers.push(property.reader(&name));
            accessors.push(property.accessor());
            if let Some(decl) = errors.handle(property.decl()) {
                property_decls.push(decl);
            }
        }
        for relation in &self.relations {
            readers.push(relation.reader(&name));
            accessors.push(relation.accessor());
            if let Some(decl) = errors.handle(relation.decl()) {
                relation_decls.push(decl);
            }
        }
        if let Err(err) = errors.finish() {
            return err.write_errors();
        }

        let model = self.model.as_ref().map(|model| quote!(.model(#model)));
        let (projection, parent, entity) = match &self.base {
            Some((field, ty)) => (
                Some(projection(field)),
                Some(quote! {
                    .parent(::metacat::model::ParentLink::new(
                        <#ty as ::metacat::traits::ClassSchema>::MODEL,
                        Self::__metacat_project_base,
                    ))
                }),
                Some(entity_impl(ident, field)),
            ),
            None => (None, None, None),
        };

        quote! {
            #[doc(hidden)]
            impl #ident {
                const __METACAT_PROPERTIES: &'static [::metacat::model::PropertyDecl] =
                    &[#(#property_decls),*];

                const __METACAT_RELATIONS: &'static [::metacat::model::RelationDecl] =
                    &[#(#relation_decls),*];

                const __METACAT_ACCESSORS: &'static [::metacat::model::AccessorDecl] =
                    &[#(#accessors),*];

                #(#readers)*

                #projection
            }

            impl ::metacat::traits::ClassSchema for #ident {
                const MODEL: &'static ::metacat::model::ClassModel =
                    &::metacat::model::ClassModel::new(
                        ::std::concat!(::std::module_path!(), "::", #name),
                        #name,
                    )
                    #model
                    #parent
                    .properties(Self::__METACAT_PROPERTIES)
                    .relations(Self::__METACAT_RELATIONS)
                    .accessors(Self::__METACAT_ACCESSORS);
            }

            #entity
        }
    }
}

impl Property {
    // accessor named after the getter when one is given
    fn accessor_name(&self) -> String {
        self.args
            .getter
            .as_ref()
            .or(self.args.try_getter.as_ref())
            .unwrap_or(&self.field)
            .to_string()
    }

    fn reader_ident(&self) -> Ident {
        format_ident!("__metacat_get_{}", self.field)
    }

    fn reader(&self, class: &str) -> TokenStream {
        let reader = self.reader_ident();
        let field = &self.field;
        let field_name = field.to_string();

        let read = match (&self.args.getter, &self.args.try_getter) {
            (Some(getter), _) => quote! {
                ::std::result::Result::Ok(::metacat::value::FieldValue::to_value(&this.#getter()))
            },
            (None, Some(getter)) => quote! {
                this.#getter()
                    .map(|value| ::metacat::value::FieldValue::to_value(&value))
                    .map_err(|err| {
                        ::metacat::error::ValueExtractionError::accessor_failed(
                            #class,
                            #field_name,
                            err,
                        )
                    })
            },
            (None, None) => quote! {
                ::std::result::Result::Ok(::metacat::value::FieldValue::to_value(&this.#field))
            },
        };

        quote! {
            fn #reader(
                this: &dyn ::std::any::Any,
            ) -> ::std::result::Result<
                ::metacat::value::Value,
                ::metacat::error::ValueExtractionError,
            > {
                let this = this.downcast_ref::<Self>().ok_or_else(|| {
                    ::metacat::error::ValueExtractionError::type_mismatch(#class, #field_name)
                })?;

                #read
            }
        }
    }

    fn accessor(&self) -> TokenStream {
        let name = self.accessor_name();
        let reader = self.reader_ident();
        let returns = if Shape::is_multi_valued(&self.ty) {
            quote!(::metacat::model::ReturnShape::Collection)
        } else {
            quote!(::metacat::model::ReturnShape::Scalar)
        };

        quote!(::metacat::model::AccessorDecl::value(#name, #returns, Self::#reader))
    }

    fn decl(&self) -> darling::Result<TokenStream> {
        let field = self.field.to_string();
        let attribute = self
            .args
            .attribute
            .clone()
            .unwrap_or_else(|| names::attribute_name(&self.field));

        let mut decl = quote!(::metacat::model::PropertyDecl::new(#field));
        if attribute != field {
            decl.extend(quote!(.attribute(#attribute)));
        }
        if self.args.required {
            decl.extend(quote!(.required()));
        }
        if self.args.is_registered() {
            let registration = self.registration()?;
            decl.extend(quote!(.register(#registration)));
        }

        Ok(decl)
    }

    fn registration(&self) -> darling::Result<TokenStream> {
        let field_type = names::property_type(
            self.args.field_type.as_deref().unwrap_or("TEXT"),
            &self.field,
        )?;

        let mut registration =
            quote!(::metacat::model::PropertyRegistration::new(#field_type));
        if let Some(values) = &self.args.values {
            let values = values.0.iter().map(|value| LitStr::new(value, self.field.span()));
            registration.extend(quote!(.values(&[#(#values),*])));
        }
        if let Some(pattern) = &self.args.pattern {
            registration.extend(quote!(.pattern(#pattern)));
        }
        if let Some(max_length) = self.args.max_length {
            registration.extend(quote!(.max_length(#max_length)));
        }

        Ok(registration)
    }
}

impl Relation {
    fn reader_ident(&self) -> Ident {
        format_ident!("__metacat_rel_{}", self.field)
    }

    fn reader(&self, class: &str) -> TokenStream {
        let reader = self.reader_ident();
        let field = &self.field;
        let field_name = field.to_string();

        let collect = match Shape::of(&self.ty) {
            Shape::Collection | Shape::Optional => quote! {
                this.#field.iter().map(|entity| entity.as_entity()).collect()
            },
            Shape::Single => quote! {
                ::std::vec![this.#field.as_entity()]
            },
        };

        quote! {
            fn #reader(
                this: &dyn ::std::any::Any,
            ) -> ::std::result::Result<
                ::std::vec::Vec<&dyn ::metacat::traits::Entity>,
                ::metacat::error::ValueExtractionError,
            > {
                use ::metacat::traits::Entity as _;

                let this = this.downcast_ref::<Self>().ok_or_else(|| {
                    ::metacat::error::ValueExtractionError::type_mismatch(#class, #field_name)
                })?;

                ::std::result::Result::Ok(#collect)
            }
        }
    }

    fn accessor(&self) -> TokenStream {
        let name = self.field.to_string();
        let reader = self.reader_ident();
        let returns = match Shape::of(&self.ty) {
            Shape::Collection => quote!(::metacat::model::ReturnShape::EntityCollection),
            Shape::Optional | Shape::Single => quote!(::metacat::model::ReturnShape::Entity),
        };

        quote!(::metacat::model::AccessorDecl::entities(#name, #returns, Self::#reader))
    }

    fn decl(&self) -> darling::Result<TokenStream> {
        let field = self.field.to_string();
        let role = names::role(&self.args.role, &self.field)?;

        let mut decl = quote!(::metacat::model::RelationDecl::new(#field, #role));
        if let Some(source_type) = &self.args.source_type {
            let source_type = names::source_type(source_type, &self.field)?;
            decl.extend(quote!(.source_type(#source_type)));
        }
        if self.args.required {
            decl.extend(quote!(.required()));
        }

        Ok(decl)
    }
}

fn projection(field: &Ident) -> TokenStream {
    quote! {
        fn __metacat_project_base(this: &dyn ::std::any::Any) -> ::std::option::Option<&dyn ::std::any::Any> {
            this.downcast_ref::<Self>()
                .map(|this| &this.#field as &dyn ::std::any::Any)
        }
    }
}

fn entity_impl(ident: &Ident, base: &Ident) -> TokenStream {
    quote! {
        impl ::metacat::traits::Entity for #ident {
            fn header(&self) -> &::metacat::entity::EntityHeader {
                ::metacat::traits::Entity::header(&self.#base)
            }

            fn as_entity(&self) -> &dyn ::metacat::traits::Entity {
                self
            }
        }
    }
}
