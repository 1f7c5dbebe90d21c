//! Static declaration tables produced by the registration step.
//!
//! A [`ClassModel`] is what `#[derive(MetaClass)]` (or a hand-written
//! `const`) emits for one type; discovery and the registry read nothing
//! else.

pub mod accessor;
pub mod class;
pub mod field;

pub use accessor::{Accessor, AccessorDecl, EntityReader, ReturnShape, ValueReader};
pub use class::{ClassModel, ParentLink, Projection};
pub use field::{PropertyDecl, PropertyRegistration, RelationDecl};
