//! The dynamic [`Value`] type.
//!
//! `Value` mirrors the loosely-typed data found in configuration documents
//! and JSON payloads, with two additions that JSON lacks: `Undefined` (an
//! absent value, distinct from `Null`) and `Callable` (a function value that
//! may carry properties).

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;

use crate::callable::Callable;
use crate::key::Key;

/// Property table of an object or callable, kept in insertion order.
///
/// Re-inserting an existing key updates the value in place without moving
/// it. Equality ignores order.
pub type Object = IndexMap<String, Value>;

/// Largest integer magnitude that survives an `f64` round trip.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A dynamically typed value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    Bool(bool),
    /// A double-precision number. `NaN` and infinities are representable.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Callable(Callable),
}

impl Value {
    /// Create an empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Returns `true` for `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for values whose properties can be read during path
    /// traversal: arrays, objects, and callables.
    pub fn is_traversable(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_) | Value::Callable(_))
    }

    /// Truthiness: `Undefined`, `Null`, `false`, `0`, `-0`, `NaN` and the
    /// empty string are falsy. Everything else, including empty arrays and
    /// objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Callable(_) => true,
        }
    }

    /// A short name for the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Callable(_) => "function",
        }
    }

    /// Returns `true` if the value holds `key` as an own property.
    pub fn has_key(&self, key: &Key) -> bool {
        self.property(key).is_some()
    }

    /// Read an own property, including an array's computed `length`.
    ///
    /// Stored members are borrowed; `length` is produced on the fly.
    pub fn property(&self, key: &Key) -> Option<Cow<'_, Value>> {
        if let (Value::Array(items), Key::Name(name)) = (self, key) {
            if name == "length" {
                return Some(Cow::Owned(Value::from(items.len())));
            }
        }
        self.get(key).map(Cow::Borrowed)
    }

    /// Look up a stored property or array element.
    ///
    /// Non-traversable values never hold keys.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match self {
            Value::Array(items) => key.array_index(items.len()).map(|i| &items[i]),
            Value::Object(map) => map.get(&key.property_name()),
            Value::Callable(f) => f.properties().get(&key.property_name()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable property table of an object or callable.
    pub fn properties_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(map) => Some(map),
            Value::Callable(f) => Some(f.properties_mut()),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Lossy in the same places the JSON encoding is: `Undefined` and
    /// callables become `null` (or are dropped from objects), non-finite
    /// numbers become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Undefined | Value::Null | Value::Callable(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => Json::Object(
                map.iter()
                    .filter(|(_, v)| v.is_encodable())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Values that appear as object members when encoded.
    fn is_encodable(&self) -> bool {
        !matches!(self, Value::Undefined | Value::Callable(_))
    }
}

fn safe_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER).then_some(n as i64)
}

fn number_to_json(n: f64) -> Json {
    match safe_integer(n) {
        Some(i) => Json::from(i),
        None => serde_json::Number::from_f64(n)
            .map(Json::Number)
            .unwrap_or(Json::Null),
    }
}

// ---------------------------------------------------------------
// Serde
// ---------------------------------------------------------------

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Callable(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match safe_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_unit(),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries = serializer.serialize_map(None)?;
                for (key, value) in map.iter().filter(|(_, v)| v.is_encodable()) {
                    entries.serialize_entry(key, value)?;
                }
                entries.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Json::deserialize(deserializer).map(Value::from)
    }
}

// ---------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Callable(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_nested() {
        let value = Value::from(json!({"a": [1, "two", null], "b": {"c": true}}));
        let map = value.as_object().unwrap();
        assert_eq!(
            map["a"],
            Value::Array(vec![Value::Number(1.0), "two".into(), Value::Null])
        );
        assert_eq!(map["b"].get(&Key::from("c")), Some(&Value::Bool(true)));
    }

    #[test]
    fn encodes_integral_numbers_without_fraction() {
        let value = Value::from(json!({"a": 1, "b": 1.5}));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":1,"b":1.5}"#);
    }

    #[test]
    fn encodes_non_finite_numbers_as_null() {
        let value = Value::Array(vec![Value::Number(f64::NAN), Value::Number(f64::INFINITY)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[null,null]");
    }

    #[test]
    fn encoding_drops_undefined_and_callable_members() {
        let mut map = Object::new();
        map.insert("keep".into(), Value::Null);
        map.insert("gone".into(), Value::Undefined);
        map.insert("fn".into(), Callable::new(|_| Value::Null).into());
        let encoded = serde_json::to_string(&Value::Object(map)).unwrap();
        assert_eq!(encoded, r#"{"keep":null}"#);
    }

    #[test]
    fn encoding_nulls_undefined_inside_arrays() {
        let value = Value::Array(vec![Value::Undefined, Callable::new(|_| Value::Null).into()]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[null,null]");
    }

    #[test]
    fn deserialize_through_json() {
        let value: Value = serde_json::from_str(r#"{"x": [true, 2]}"#).unwrap();
        assert_eq!(value, Value::from(json!({"x": [true, 2]})));
    }

    #[test]
    fn to_json_matches_encoding() {
        let mut map = Object::new();
        map.insert("n".into(), Value::Number(3.0));
        map.insert("u".into(), Value::Undefined);
        assert_eq!(Value::Object(map).to_json(), json!({"n": 3}));
    }

    #[test]
    fn truthiness() {
        for falsy in [
            Value::Undefined,
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(-0.0),
            Value::Number(f64::NAN),
            Value::from(""),
        ] {
            assert!(!falsy.is_truthy(), "{falsy:?} should be falsy");
        }
        for truthy in [
            Value::Bool(true),
            Value::Number(-1.0),
            Value::from("0"),
            Value::Array(vec![]),
            Value::object(),
            Value::Callable(Callable::new(|_| Value::Null)),
        ] {
            assert!(truthy.is_truthy(), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn traversable_kinds() {
        assert!(Value::object().is_traversable());
        assert!(Value::Array(vec![]).is_traversable());
        assert!(Value::Callable(Callable::new(|_| Value::Null)).is_traversable());
        assert!(!Value::Null.is_traversable());
        assert!(!Value::from("abc").is_traversable());
    }

    #[test]
    fn get_on_callable_reads_properties() {
        let f = Value::Callable(Callable::new(|_| Value::Null).with_property("x", 5));
        assert_eq!(f.get(&Key::from("x")), Some(&Value::Number(5.0)));
        assert!(!f.has_key(&Key::from("y")));
    }

    #[test]
    fn array_length_is_a_property() {
        let list = Value::from(json!([4, 8, 9, 1]));
        let length = Key::from("length");
        assert_eq!(list.property(&length).as_deref(), Some(&Value::from(4)));
        assert!(list.has_key(&length));
        assert_eq!(list.get(&length), None);
        assert!(!Value::object().has_key(&length));
    }

    #[test]
    fn object_keeps_insertion_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn get_on_scalars_is_none() {
        assert_eq!(Value::from("hello").get(&Key::from("0")), None);
        assert_eq!(Value::Number(1.0).get(&Key::from("x")), None);
        assert_eq!(Value::Null.get(&Key::from("x")), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Undefined.kind(), "undefined");
        assert_eq!(Value::Number(f64::NAN).kind(), "number");
        assert_eq!(Value::Callable(Callable::new(|_| Value::Null)).kind(), "function");
    }
}
