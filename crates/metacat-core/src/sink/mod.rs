//! Document sink boundary.
//!
//! The core never talks to a catalog directly. Validated documents flow
//! through [`MetadataSink`]; framing and transport live behind it.

mod json_lines;
mod memory;

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

use crate::serialize::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// SinkError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum SinkError {
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sink i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink rejected write: {reason}")]
    Rejected { reason: String },
}

///
/// MetadataSink
///
/// Accepts one document at a time. `flush` marks the end of a batch and
/// reports what the receiving side made of it.
///

pub trait MetadataSink {
    fn write_entity(&mut self, document: Document) -> Result<(), SinkError>;

    fn write_relation(&mut self, document: Document) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<ResultSet, SinkError>;
}

impl<S: MetadataSink + ?Sized> MetadataSink for &mut S {
    fn write_entity(&mut self, document: Document) -> Result<(), SinkError> {
        (**self).write_entity(document)
    }

    fn write_relation(&mut self, document: Document) -> Result<(), SinkError> {
        (**self).write_relation(document)
    }

    fn flush(&mut self) -> Result<ResultSet, SinkError> {
        (**self).flush()
    }
}

///
/// UpdateSummary
/// Outcome of one document stream in a flushed batch.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub count: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl UpdateSummary {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

///
/// ResultSet
///
/// Per-batch report for the entity and relation streams. Shaped like the
/// catalog's reply so a transport can deserialize it directly.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub entities: UpdateSummary,
    #[serde(default)]
    pub relations: UpdateSummary,
}

impl ResultSet {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entities.has_errors() || self.relations.has_errors()
    }
}

///
/// TESTS
///
