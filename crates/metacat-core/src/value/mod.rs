mod wire;

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

///
/// Value
///
/// Runtime value read from a property accessor. Maps keep insertion order
/// so a document built from them serializes the same way every time.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Map(Vec<(String, Self)>),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null, the empty string, or an empty list/map.
    ///
    /// This is the test applied to required properties.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Bool(_) | Self::Float(_) | Self::Int(_) | Self::Uint(_) => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key in a `Map` value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn from_list<T: FieldValue>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(|item| item.to_value()).collect())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// FieldValue
///
/// Conversion from a field's Rust type to a runtime [`Value`]. Every
/// property type read through a generated accessor implements this.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FieldValue> FieldValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<T: FieldValue> FieldValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<V: FieldValue> FieldValue for BTreeMap<String, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Text(self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    f32 => Float,
    f64 => Float,
    bool => Bool,
);

impl FieldValue for usize {
    fn to_value(&self) -> Value {
        Value::Uint(u64::try_from(*self).unwrap_or(u64::MAX))
    }
}

impl FieldValue for isize {
    fn to_value(&self) -> Value {
        Value::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn blank_covers_null_empty_text_and_empty_collections() {
        assert!(Value::Null.is_blank());
        assert!(Value::Text(String::new()).is_blank());
        assert!(Value::List(vec![]).is_blank());
        assert!(Value::Map(vec![]).is_blank());

        assert!(!Value::Text(" ".into()).is_blank());
        assert!(!Value::Int(0).is_blank());
        assert!(!Value::Bool(false).is_blank());
        assert!(!Value::List(vec![Value::Null]).is_blank());
    }

    #[test]
    fn option_and_collections_convert() {
        let missing: Option<i32> = None;
        assert_eq!(missing.to_value(), Value::Null);
        assert_eq!(Some(5_i32).to_value(), Value::Int(5));

        let coll = vec!["foo".to_string(), "bar".to_string()];
        assert_eq!(
            coll.to_value(),
            Value::List(vec![Value::Text("foo".into()), Value::Text("bar".into())])
        );

        let set: BTreeSet<String> = ["b".to_string(), "a".to_string()].into();
        assert_eq!(set.to_value().as_list().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn map_keeps_key_order_and_supports_lookup() {
        let map: BTreeMap<String, u32> = [("b".to_string(), 2), ("a".to_string(), 1)].into();
        let value = map.to_value();

        assert_eq!(value.get("a"), Some(&Value::Uint(1)));
        let Value::Map(entries) = value else {
            panic!("map should convert into Value::Map");
        };
        assert_eq!(entries[0].0, "a");
    }

    #[test]
    fn timestamps_render_as_utc_rfc3339() {
        let ts = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("timestamp should be unambiguous");

        assert_eq!(ts.to_value(), Value::Text("2024-03-01T12:30:00.000Z".into()));
    }
}
