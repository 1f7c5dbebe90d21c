//! Writer pipeline: validate, expand relations, serialize, hand to a sink.

use crate::{
    config::PublishConfig,
    error::{Error, ValidationError},
    registry::Registry,
    relation::RelationBuilder,
    serialize::{Dispatcher, Document},
    sink::{MetadataSink, ResultSet},
    traits::Entity,
};
use std::collections::HashSet;
use tracing::{debug, warn};

///
/// MetadataGraph
///
/// Every document produced for one batch, entities and relations kept on
/// separate streams. Nothing reaches a sink until the whole graph is built.
///

#[derive(Clone, Debug, Default)]
pub struct MetadataGraph {
    entities: Vec<Document>,
    relations: Vec<Document>,
}

impl MetadataGraph {
    #[must_use]
    pub fn entities(&self) -> &[Document] {
        &self.entities
    }

    #[must_use]
    pub fn relations(&self) -> &[Document] {
        &self.relations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}

///
/// MetadataWriter
///

#[derive(Debug)]
pub struct MetadataWriter<'r, S: MetadataSink> {
    registry: &'r Registry,
    config: PublishConfig,
    sink: S,
}

impl<'r, S: MetadataSink> MetadataWriter<'r, S> {
    pub const fn new(registry: &'r Registry, config: PublishConfig, sink: S) -> Self {
        Self {
            registry,
            config,
            sink,
        }
    }

    pub const fn config(&self) -> &PublishConfig {
        &self.config
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Build the documents for `entities` and everything reachable from
    /// them through relation fields. Proxies are related to but never
    /// visited; an identity already seen in this batch is skipped.
    pub fn build_graph(&self, entities: &[&dyn Entity]) -> Result<MetadataGraph, Error> {
        let mut batch = Batch {
            dispatcher: Dispatcher::new(self.registry),
            builder: self.config.relation_builder(),
            seen_entities: HashSet::new(),
            seen_relations: HashSet::new(),
            graph: MetadataGraph::default(),
        };

        for entity in entities {
            batch.visit(*entity)?;
        }

        debug!(
            namespace = %self.config.namespace,
            entities = batch.graph.entities.len(),
            relations = batch.graph.relations.len(),
            "assembled metadata graph"
        );

        Ok(batch.graph)
    }

    /// Write a batch. Either every document reaches the sink or, when any
    /// entity fails, none does. With autocommit the sink is flushed and its
    /// report returned.
    pub fn write(&mut self, entities: &[&dyn Entity]) -> Result<Option<ResultSet>, Error> {
        let graph = self.build_graph(entities)?;

        for document in graph.entities {
            self.sink.write_entity(document)?;
        }
        for document in graph.relations {
            self.sink.write_relation(document)?;
        }

        if self.config.autocommit {
            return self.flush().map(Some);
        }

        Ok(None)
    }

    pub fn write_entity(&mut self, entity: &dyn Entity) -> Result<Option<ResultSet>, Error> {
        self.write(&[entity])
    }

    pub fn flush(&mut self) -> Result<ResultSet, Error> {
        let result = self.sink.flush()?;

        if result.has_errors() {
            warn!(
                entity_errors = ?result.entities.errors,
                relation_errors = ?result.relations.errors,
                "sink reported errors"
            );
        } else {
            debug!(
                entities = result.entities.count,
                relations = result.relations.count,
                "flushed batch"
            );
        }

        Ok(result)
    }
}

// Batch
// State for one `build_graph` call.
struct Batch<'r, 'c> {
    dispatcher: Dispatcher<'r>,
    builder: RelationBuilder<'c>,
    seen_entities: HashSet<String>,
    seen_relations: HashSet<String>,
    graph: MetadataGraph,
}

impl Batch<'_, '_> {
    fn visit(&mut self, entity: &dyn Entity) -> Result<(), Error> {
        if entity.is_proxy() {
            return Ok(());
        }

        let identity = entity.identity();
        if identity.is_empty() {
            return Err(ValidationError::MissingIdentity {
                class: entity.class_model().name,
            }
            .into());
        }
        if !self.seen_entities.insert(identity.to_string()) {
            return Ok(());
        }

        let registry = self.dispatcher.registry();
        registry.validate_required(entity)?;
        self.graph
            .entities
            .push(self.dispatcher.serialize_entity(entity)?);

        let entries = registry.entries_of(entity)?;
        for entry in entries.relations() {
            let connected = entry.connected_entities(entity)?;

            for other in &connected {
                self.visit(*other)?;
            }

            let relations = entry.relations_to(entity, &connected, &self.builder)?;

            for relation in relations {
                registry.validate_required(&relation)?;
                if self.seen_relations.insert(relation.identity.clone()) {
                    self.graph
                        .relations
                        .push(self.dispatcher.serialize_relation(&relation)?);
                }
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
