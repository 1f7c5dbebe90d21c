use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// Maps go out in stored order; serde_json never sees a HashMap here.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Null => serializer.serialize_none(),
            Self::Text(v) => serializer.serialize_str(v),
            Self::Uint(v) => serializer.serialize_u64(*v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_serializes_in_insertion_order() {
        let value = Value::Map(vec![
            ("zeta".into(), Value::Int(1)),
            ("alpha".into(), Value::List(vec![Value::Bool(true), Value::Null])),
        ]);

        let json = serde_json::to_string(&value).expect("value should serialize");
        assert_eq!(json, r#"{"zeta":1,"alpha":[true,null]}"#);
    }
}
