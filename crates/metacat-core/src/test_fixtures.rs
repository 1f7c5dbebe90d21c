//! Classes declared with the derive, shared by unit tests.

use crate::{
    entity::{EndpointProxy, EntityHeader},
    types::{EntityType, SourceType},
};
use metacat_derive::MetaClass;

///
/// Script
///

#[derive(Clone, Debug, MetaClass)]
#[metacat(model = "script")]
pub(crate) struct Script {
    #[metacat(base)]
    pub(crate) base: EntityHeader,

    #[property(required)]
    pub(crate) name: String,

    #[property]
    pub(crate) language: Option<String>,

    #[relation(role = "physical", required)]
    pub(crate) operation: EndpointProxy,
}

pub(crate) fn script(identity: &str, name: &str) -> Script {
    Script {
        base: EntityHeader::new(identity, SourceType::Sdk, EntityType::File),
        name: name.to_string(),
        language: Some("sql".into()),
        operation: EndpointProxy::new("op-1", SourceType::Oozie, EntityType::Operation),
    }
}

///
/// Artifact
/// Intermediate base class without a model name.
///

#[derive(Clone, Debug, MetaClass)]
pub(crate) struct Artifact {
    #[metacat(base)]
    pub(crate) base: EntityHeader,

    #[property]
    pub(crate) owner_team: Option<String>,
}

///
/// Dataset
///

#[derive(Clone, Debug, MetaClass)]
#[metacat(model = "dataset")]
pub(crate) struct Dataset {
    #[metacat(base)]
    pub(crate) base: Artifact,

    #[property(required)]
    pub(crate) columns: Vec<String>,

    #[property(getter = "get_row_count")]
    pub(crate) row_count: Option<u64>,

    #[property(register, field_type = "enum", values("RAW", "CURATED"))]
    pub(crate) tier: String,

    #[relation(role = "parent")]
    pub(crate) parents: Vec<EndpointProxy>,

    #[relation(role = "source", required)]
    pub(crate) sources: Vec<EndpointProxy>,

    #[relation(role = "source")]
    pub(crate) upstream: Vec<Dataset>,
}

impl Dataset {
    pub(crate) fn sample(identity: &str) -> Self {
        Self {
            base: Artifact {
                base: EntityHeader::new(identity, SourceType::Hdfs, EntityType::Dataset),
                owner_team: Some("data-eng".into()),
            },
            columns: vec!["id".into(), "amount".into()],
            row_count: Some(42),
            tier: "RAW".into(),
            parents: Vec::new(),
            sources: vec![EndpointProxy::new(
                "raw-orders",
                SourceType::Hdfs,
                EntityType::File,
            )],
            upstream: Vec::new(),
        }
    }

    pub(crate) const fn get_row_count(&self) -> Option<u64> {
        self.row_count
    }
}
