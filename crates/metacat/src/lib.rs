//! ## Crate layout
//! - `model`, `traits`, `discovery`: static class models and how fields bind to accessors.
//! - `registry`: cached per-class property/relation entries and required-field validation.
//! - `relation`: relation types, roles, records and the graph builder.
//! - `serialize`, `sink`, `writer`: documents, sinks and the publishing pipeline.
//! - `schema`: catalog schema registration for custom classes.
//!
//! Classes are declared with `#[derive(MetaClass)]`; the `prelude` brings
//! the derive and the domain vocabulary into scope together.

pub use metacat_core as core;
pub use metacat_core::{
    IDENTITY_SEPARATOR, INTERNAL_TYPE_ATTRIBUTE, config, discovery, entity, error, identity,
    model, registry, relation, schema, serialize, sink, traits, types, value, writer,
};
pub use metacat_derive::MetaClass;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{
        config::PublishConfig,
        registry::Registry,
        serialize::Dispatcher,
        writer::MetadataWriter,
    };
    pub use metacat_derive::MetaClass;
}
