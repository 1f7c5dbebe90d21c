use metacat::{
    INTERNAL_TYPE_ATTRIBUTE,
    error::{Error, ValidationError},
    identity,
    prelude::*,
    schema::MetadataModel,
    sink::{JsonLinesSink, MemorySink},
};
use serde_json::Value as Json;
use std::{sync::Arc, thread};

///
/// Script
///

#[derive(Clone, Debug, MetaClass)]
#[metacat(model = "script")]
struct Script {
    #[metacat(base)]
    base: EntityHeader,

    #[property(required)]
    name: String,

    #[property(register, max_length = 64)]
    script_text: Option<String>,

    #[relation(role = "physical", required)]
    operation_id: EndpointProxy,
}

impl Script {
    fn new(identity: &str, name: &str) -> Self {
        Self {
            base: EntityHeader::new(identity, SourceType::Sdk, EntityType::File)
                .with_namespace("custom"),
            name: name.into(),
            script_text: Some("select 1".into()),
            operation_id: EndpointProxy::new("op-7", SourceType::Oozie, EntityType::Operation),
        }
    }
}

fn config() -> PublishConfig {
    PublishConfig::new("nav").expect("namespace is set")
}

fn lines(bytes: &[u8]) -> Vec<Json> {
    String::from_utf8(bytes.to_vec())
        .expect("sink output should be utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect()
}

#[test]
fn script_publishes_one_entity_and_one_relation() {
    let registry = Registry::new();
    let script = Script::new("s-1", "x");
    let mut writer = MetadataWriter::new(
        &registry,
        config().with_autocommit(true),
        JsonLinesSink::new(Vec::new()),
    );

    let result = writer
        .write(&[&script])
        .expect("script should publish")
        .expect("autocommit should flush");
    assert_eq!(result.entities.count, 1);
    assert_eq!(result.relations.count, 1);
    assert!(!result.has_errors());

    let written = lines(&writer.into_sink().into_inner());
    assert_eq!(written.len(), 2);

    let entity = &written[0]["entity"];
    assert_eq!(entity["name"], "x");
    assert_eq!(entity[INTERNAL_TYPE_ATTRIBUTE], "script");
    assert_eq!(entity["identity"], "s-1");
    assert_eq!(entity["namespace"], "custom");

    let relation = &written[1]["relation"];
    assert_eq!(relation["type"], "LOGICAL_PHYSICAL");
    assert_eq!(relation["namespace"], "nav");
    assert_eq!(relation["ep1Role"], "LOGICAL");
    assert_eq!(relation["ep1Ids"], serde_json::json!(["s-1"]));
    assert_eq!(relation["ep2Role"], "PHYSICAL");
    assert_eq!(relation["ep2Ids"], serde_json::json!(["op-7"]));
    assert_eq!(relation["ep2SourceType"], "OOZIE");

    let expected = identity::relation(
        RelationType::LogicalPhysical,
        &["s-1".to_string()],
        SourceType::Sdk,
        &["op-7".to_string()],
        SourceType::Oozie,
    );
    assert_eq!(relation["identity"], expected.as_str());
    assert!(identity::is_valid(&expected));
}

#[test]
fn failing_entity_leaves_the_sink_untouched() {
    let registry = Registry::new();
    let good = Script::new("s-1", "x");
    let bad = Script::new("s-2", "");
    let mut writer = MetadataWriter::new(&registry, config(), MemorySink::new());

    let err = writer
        .write(&[&good, &bad])
        .expect_err("blank name should fail the batch");

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingProperty {
            class: "Script",
            attribute: "name",
        })
    ));
    assert!(err.is_instance_error());
    assert!(writer.sink().is_empty());
}

#[test]
fn serialization_is_deterministic() {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let script = Script::new("s-1", "x");

    let first = dispatcher
        .serialize_entity(&script)
        .expect("script should serialize")
        .to_json()
        .expect("document should encode");
    let again = Dispatcher::new(&Registry::new())
        .serialize_entity(&script)
        .expect("script should serialize")
        .to_json()
        .expect("document should encode");

    assert_eq!(first, again);
    assert!(first.starts_with(r#"{"name":"x","scriptText":"select 1","identity":"s-1""#));
    assert!(first.ends_with(r#""internalType":"script"}"#));
}

#[test]
fn concurrent_pipelines_share_one_registry() {
    let registry = Arc::new(Registry::new());

    let outputs: Vec<String> = (0..6)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let script = Script::new("s-1", "x");
                Dispatcher::new(&registry)
                    .serialize_entity(&script)
                    .expect("script should serialize")
                    .to_json()
                    .expect("document should encode")
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("worker should not panic"))
        .collect();

    assert!(outputs.iter().all(|output| output == &outputs[0]));
    assert_eq!(registry.len(), 1);
}

#[test]
fn schema_registers_only_marked_properties() {
    let model = MetadataModel::build(&[Script::MODEL], "custom").expect("schema should build");

    assert_eq!(model.properties.len(), 1);
    let text = model
        .property("scriptText")
        .expect("scriptText should be registered");
    assert_eq!(text.property_type, CustomPropertyType::Text);
    assert_eq!(text.max_length, Some(64));
    assert!(model.mappings["custom.script"].contains("custom.scriptText"));
}
