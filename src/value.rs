//! Generic JSON value tree handed to the inference engine.
//!
//! Numbers are classified here, while parsing, so the engine only ever
//! dispatches on an already-typed scalar:
//! - fits `i32` → `Int`
//! - fits `i64` → `Long`
//! - anything wider, or with a fraction/exponent → `Double`
//!
//! Objects keep key insertion order. A repeated key keeps its first position
//! and its last value.
use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Classify a signed integer literal by magnitude.
    pub fn from_i64(n: i64) -> Self {
        match i32::try_from(n) {
            Ok(small) => JsonValue::Int(small),
            Err(_) => JsonValue::Long(n),
        }
    }

    pub fn from_u64(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(signed) => Self::from_i64(signed),
            // no big-integer kind downstream
            Err(_) => JsonValue::Double(n as f64),
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Human name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Int(_) => "integer",
            JsonValue::Long(_) => "long",
            JsonValue::Double(_) => "double",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Look up a value by RFC 6901 JSON Pointer (e.g. `/data/items/0`).
    ///
    /// The empty pointer selects `self`.
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        if pointer.is_empty() {
            return Some(self);
        }
        if !pointer.starts_with('/') {
            return None;
        }
        pointer
            .split('/')
            .skip(1)
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
            .try_fold(self, |target, token| match target {
                JsonValue::Object(map) => map.get(&token),
                JsonValue::Array(items) => parse_index(&token).and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

fn parse_index(token: &str) -> Option<usize> {
    if token.starts_with('+') || (token.starts_with('0') && token.len() != 1) {
        return None;
    }
    token.parse().ok()
}

// ————————————————————————————————————————————————————————————————————————————
// SERDE
// ————————————————————————————————————————————————————————————————————————————

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::from_i64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        Ok(JsonValue::from_u64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(JsonValue::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<JsonValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<JsonValue>()? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<JsonValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            entries.insert(key, value);
        }
        Ok(JsonValue::Object(entries))
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Int(n) => serializer.serialize_i32(*n),
            JsonValue::Long(n) => serializer.serialize_i64(*n),
            JsonValue::Double(n) => serializer.serialize_f64(*n),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => items.serialize(serializer),
            JsonValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(src: &str) -> JsonValue {
        serde_json::from_str(src).unwrap()
    }

    #[test]
    fn integers_are_classified_by_magnitude() {
        assert_eq!(parse("30"), JsonValue::Int(30));
        assert_eq!(parse("-2147483648"), JsonValue::Int(i32::MIN));
        assert_eq!(parse("2147483648"), JsonValue::Long(2_147_483_648));
        assert_eq!(parse("-9223372036854775808"), JsonValue::Long(i64::MIN));
        assert_eq!(parse("18446744073709551615"), JsonValue::Double(u64::MAX as f64));
        assert_eq!(parse("1.5"), JsonValue::Double(1.5));
        assert_eq!(parse("1e3"), JsonValue::Double(1000.0));
    }

    #[test]
    fn object_keys_keep_insertion_order() {
        let v = parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_key_keeps_first_slot_and_last_value() {
        let v = parse(r#"{"a": 1, "b": 2, "a": "x"}"#);
        let map = v.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&"a".to_string(), &JsonValue::String("x".into()))));
    }

    #[test]
    fn pointer_walks_objects_and_arrays() {
        let v: JsonValue = serde_json::from_value(json!({
            "data": {"items": [{"id": 7}], "a/b": true, "m~n": null}
        }))
        .unwrap();
        assert_eq!(v.pointer(""), Some(&v));
        assert_eq!(v.pointer("/data/items/0/id"), Some(&JsonValue::Int(7)));
        assert_eq!(v.pointer("/data/a~1b"), Some(&JsonValue::Bool(true)));
        assert_eq!(v.pointer("/data/m~0n"), Some(&JsonValue::Null));
        assert_eq!(v.pointer("/data/items/01"), None);
        assert_eq!(v.pointer("/data/items/1"), None);
        assert_eq!(v.pointer("data"), None);
    }

    #[test]
    fn serializes_back_in_order() {
        let src = r#"{"b":[1,2147483648,2.5],"a":{"x":null,"y":"s"},"c":false}"#;
        let v = parse(src);
        assert_eq!(serde_json::to_string(&v).unwrap(), src);
    }
}
