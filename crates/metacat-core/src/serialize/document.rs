use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

///
/// Document
///
/// Ordered attribute → value map emitted for one entity or relation.
/// Field order is insertion order, which the dispatcher takes from the
/// registry, so the same instance always serializes to the same bytes.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    fields: Vec<(&'static str, Value)>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, attribute: &'static str, value: Value) {
        self.fields.push((attribute, value));
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Map(
            self.fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
