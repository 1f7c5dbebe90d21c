use crate::{
    entity::EntityHeader,
    model::{ClassModel, ParentLink},
    traits::{ClassSchema, Entity},
    types::{EntityType, SourceType},
};
use std::any::Any;

///
/// EndpointProxy
///
/// Stand-in for an entity that already exists in the catalog. It can sit at
/// either end of a relation but is never written as an entity document.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EndpointProxy {
    pub header: EntityHeader,
}

impl EndpointProxy {
    /// The identity must be the catalog identity of the existing entity.
    #[must_use]
    pub fn new(identity: impl Into<String>, source_type: SourceType, entity_type: EntityType) -> Self {
        Self {
            header: EntityHeader::new(identity, source_type, entity_type),
        }
    }
}

impl Entity for EndpointProxy {
    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn as_entity(&self) -> &dyn Entity {
        self
    }

    fn is_proxy(&self) -> bool {
        true
    }
}

fn project_header(this: &dyn Any) -> Option<&dyn Any> {
    this.downcast_ref::<EndpointProxy>()
        .map(|proxy| &proxy.header as &dyn Any)
}

impl ClassSchema for EndpointProxy {
    const MODEL: &'static ClassModel =
        &ClassModel::new("metacat::entity::EndpointProxy", "EndpointProxy")
            .model("proxy")
            .parent(ParentLink::new(EntityHeader::MODEL, project_header));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MetaClass;

    #[test]
    fn proxy_projects_onto_its_header() {
        let proxy = EndpointProxy::new("id-1", SourceType::Hive, EntityType::Table);
        let link = EndpointProxy::MODEL.parent.expect("proxy should link to the header");

        let header = (link.project)(proxy.as_any())
            .and_then(|any| any.downcast_ref::<EntityHeader>())
            .expect("projection should reach the header");

        assert_eq!(header.identity, "id-1");
        assert!(proxy.is_proxy());
        assert!((link.project)(&5_i32).is_none());
    }
}
