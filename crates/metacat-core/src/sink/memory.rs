use crate::{
    serialize::Document,
    sink::{MetadataSink, ResultSet, SinkError, UpdateSummary},
};

///
/// MemorySink
///
/// Keeps every document in memory. Counts in the flushed [`ResultSet`]
/// cover the documents written since the previous flush.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    entities: Vec<Document>,
    relations: Vec<Document>,
    flushed_entities: usize,
    flushed_relations: usize,
    flushes: u32,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entities(&self) -> &[Document] {
        &self.entities
    }

    #[must_use]
    pub fn relations(&self) -> &[Document] {
        &self.relations
    }

    #[must_use]
    pub const fn flushes(&self) -> u32 {
        self.flushes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}

impl MetadataSink for MemorySink {
    fn write_entity(&mut self, document: Document) -> Result<(), SinkError> {
        self.entities.push(document);
        Ok(())
    }

    fn write_relation(&mut self, document: Document) -> Result<(), SinkError> {
        self.relations.push(document);
        Ok(())
    }

    fn flush(&mut self) -> Result<ResultSet, SinkError> {
        let entities = self.entities.len().saturating_sub(self.flushed_entities);
        let relations = self.relations.len().saturating_sub(self.flushed_relations);

        self.flushed_entities = self.entities.len();
        self.flushed_relations = self.relations.len();
        self.flushes = self.flushes.saturating_add(1);

        Ok(ResultSet {
            entities: UpdateSummary::new(u64::try_from(entities).unwrap_or(u64::MAX)),
            relations: UpdateSummary::new(u64::try_from(relations).unwrap_or(u64::MAX)),
        })
    }
}
