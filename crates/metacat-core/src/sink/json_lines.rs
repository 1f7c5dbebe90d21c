use crate::{
    serialize::Document,
    sink::{MetadataSink, ResultSet, SinkError, UpdateSummary},
};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Line<'a> {
    Entity(&'a Document),
    Relation(&'a Document),
}

///
/// JsonLinesSink
///
/// Writes one JSON object per line, tagged `{"entity": …}` or
/// `{"relation": …}`.
///

#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    entities: u64,
    relations: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            entities: 0,
            relations: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &Line<'_>) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;

        Ok(())
    }
}

impl<W: Write> MetadataSink for JsonLinesSink<W> {
    fn write_entity(&mut self, document: Document) -> Result<(), SinkError> {
        self.write_line(&Line::Entity(&document))?;
        self.entities = self.entities.saturating_add(1);

        Ok(())
    }

    fn write_relation(&mut self, document: Document) -> Result<(), SinkError> {
        self.write_line(&Line::Relation(&document))?;
        self.relations = self.relations.saturating_add(1);

        Ok(())
    }

    fn flush(&mut self) -> Result<ResultSet, SinkError> {
        self.writer.flush()?;

        let result = ResultSet {
            entities: UpdateSummary::new(self.entities),
            relations: UpdateSummary::new(self.relations),
        };
        self.entities = 0;
        self.relations = 0;

        Ok(result)
    }
}
