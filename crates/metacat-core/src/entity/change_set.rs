use crate::{
    identity,
    value::{FieldValue, Value},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// TagChangeSet
///
/// Pending tag edits for one entity: tags to append, tags to remove, and an
/// optional full replacement set. A tag is only ever pending in one place.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TagChangeSet {
    pub add: BTreeSet<String>,
    pub del: BTreeSet<String>,
    pub set: Option<BTreeSet<String>>,
}

impl TagChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags.into_iter().map(Into::into) {
            self.del.remove(&tag);
            if let Some(set) = &mut self.set {
                set.remove(&tag);
            }
            self.add.insert(tag);
        }
    }

    pub fn remove_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags.into_iter().map(Into::into) {
            self.add.remove(&tag);
            if let Some(set) = &mut self.set {
                set.remove(&tag);
            }
            self.del.insert(tag);
        }
    }

    /// Replace the entity's tags outright. `None` drops a pending override.
    pub fn set_tags<I, S>(&mut self, tags: Option<I>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set = tags.map(|tags| {
            let set: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
            self.add.retain(|tag| !set.contains(tag));
            self.del.retain(|tag| !set.contains(tag));
            set
        });
    }

    /// Remove every tag on the entity, including ones not known locally.
    pub fn clear(&mut self) {
        self.reset();
        self.del.insert(identity::wildcard());
    }

    pub fn reset(&mut self) {
        self.add.clear();
        self.del.clear();
        self.set = None;
    }

    #[must_use]
    pub const fn has_overrides(&self) -> bool {
        self.set.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.del.is_empty() && self.set.is_none()
    }
}

impl FieldValue for TagChangeSet {
    fn to_value(&self) -> Value {
        Value::Map(vec![
            ("add".to_string(), self.add.to_value()),
            ("del".to_string(), self.del.to_value()),
            ("set".to_string(), self.set.to_value()),
        ])
    }
}

///
/// PropertyChangeSet
/// Pending edits to an entity's user-defined key/value properties.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyChangeSet {
    pub add: BTreeMap<String, String>,
    pub del: BTreeSet<String>,
}

impl PropertyChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_all<I, K, V>(&mut self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in properties {
            let key = key.into();
            self.del.remove(&key);
            self.add.insert(key, value.into());
        }
    }

    pub fn remove_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys.into_iter().map(Into::into) {
            self.add.remove(&key);
            self.del.insert(key);
        }
    }

    /// Remove every user-defined property, including ones not known locally.
    pub fn clear(&mut self) {
        self.add.clear();
        self.del.clear();
        self.del.insert(identity::wildcard());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.del.is_empty()
    }
}

impl FieldValue for PropertyChangeSet {
    fn to_value(&self) -> Value {
        Value::Map(vec![
            ("add".to_string(), self.add.to_value()),
            ("del".to_string(), self.del.to_value()),
        ])
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appending_cancels_pending_removal() {
        let mut tags = TagChangeSet::new();
        tags.remove_tags(["pii", "raw"]);
        tags.append_tags(["pii"]);

        assert!(tags.add.contains("pii"));
        assert!(!tags.del.contains("pii"));
        assert!(tags.del.contains("raw"));
    }

    #[test]
    fn override_clears_conflicting_edits() {
        let mut tags = TagChangeSet::new();
        tags.append_tags(["a", "b"]);
        tags.remove_tags(["c"]);
        tags.set_tags(Some(["a", "c"]));

        assert!(tags.has_overrides());
        assert_eq!(tags.add.iter().collect::<Vec<_>>(), vec!["b"]);
        assert!(tags.del.is_empty());

        tags.remove_tags(["a"]);
        let set = tags.set.as_ref().expect("override should still be present");
        assert!(!set.contains("a"));
        assert!(set.contains("c"));

        tags.set_tags(None::<Vec<String>>);
        assert!(!tags.has_overrides());
    }

    #[test]
    fn clear_marks_wildcard_removal() {
        let mut props = PropertyChangeSet::new();
        props.add_all([("owner", "etl")]);
        props.clear();

        assert!(props.add.is_empty());
        assert_eq!(props.del.len(), 1);
        assert!(props.del.contains("3389dae361af79b04c9c8e7057f60cc6"));

        let mut tags = TagChangeSet::new();
        tags.append_tags(["x"]);
        tags.clear();
        assert!(tags.add.is_empty());
        assert!(tags.del.contains("3389dae361af79b04c9c8e7057f60cc6"));
        assert!(tags.del.contains(&identity::wildcard()));
    }

    #[test]
    fn change_sets_convert_to_ordered_maps() {
        let mut props = PropertyChangeSet::new();
        props.add_all([("team", "data")]);
        props.remove_all(["legacy"]);

        let json = serde_json::to_string(&props.to_value()).expect("value should serialize");
        assert_eq!(json, r#"{"add":{"team":"data"},"del":["legacy"]}"#);

        let tags = TagChangeSet::new().to_value();
        assert_eq!(tags.get("set"), Some(&Value::Null));
        assert!(!tags.is_blank());
    }
}
