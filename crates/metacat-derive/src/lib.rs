//! `#[derive(MetaClass)]`: builds the static class model, accessor table,
//! base-class projection and `Entity` impl for a metacat class.

use proc_macro::TokenStream;

mod args;
mod class;
mod names;
mod shape;

///
/// MetaClass
///
/// Struct attributes: `#[metacat(model = "...")]`.
/// Field attributes: `#[metacat(base)]`, `#[property(...)]`, `#[relation(...)]`.
///

#[proc_macro_derive(MetaClass, attributes(metacat, property, relation))]
pub fn derive_meta_class(input: TokenStream) -> TokenStream {
    class::derive_meta_class(input.into()).into()
}
