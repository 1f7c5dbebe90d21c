use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

const ROLES: &[&str] = &[
    "Child",
    "Endpoint1",
    "Endpoint2",
    "Instance",
    "Logical",
    "Parent",
    "Physical",
    "Source",
    "Target",
    "Template",
];

const SOURCE_TYPES: &[&str] = &[
    "Hdfs",
    "Hive",
    "Impala",
    "Mapreduce",
    "None",
    "Oozie",
    "Pig",
    "Plugin",
    "Sdk",
    "Spark",
    "Sqoop",
    "Yarn",
];

const PROPERTY_TYPES: &[&str] = &["Boolean", "Double", "Enum", "Float", "Integer", "Long", "Text"];

/// Published attribute name for a Rust field: `row_count` becomes `rowCount`.
pub fn attribute_name(field: &Ident) -> String {
    field.to_string().to_case(Case::Camel)
}

pub fn role(name: &str, at: &Ident) -> darling::Result<TokenStream> {
    let variant = variant("relation role", name, ROLES, at)?;

    Ok(quote!(::metacat::relation::RelationRole::#variant))
}

pub fn source_type(name: &str, at: &Ident) -> darling::Result<TokenStream> {
    let variant = variant("source type", name, SOURCE_TYPES, at)?;

    Ok(quote!(::metacat::types::SourceType::#variant))
}

pub fn property_type(name: &str, at: &Ident) -> darling::Result<TokenStream> {
    let variant = variant("property type", name, PROPERTY_TYPES, at)?;

    Ok(quote!(::metacat::types::CustomPropertyType::#variant))
}

// Wire names (`PHYSICAL`), snake (`endpoint_1`) and variant names all match.
fn variant(kind: &str, name: &str, known: &[&str], at: &Ident) -> darling::Result<Ident> {
    let wanted = normalize(name);

    known
        .iter()
        .find(|candidate| normalize(candidate) == wanted)
        .map(|candidate| Ident::new(candidate, at.span()))
        .ok_or_else(|| {
            darling::Error::custom(format!(
                "unknown {kind} '{name}', expected one of: {}",
                known.join(", ")
            ))
            .with_span(at)
        })
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
