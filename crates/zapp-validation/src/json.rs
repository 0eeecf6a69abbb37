//! Duplicate-aware JSON decoding.
//!
//! `serde_json::Value` keeps the last value when an object repeats a key,
//! which hides exactly the defect `requirements.json` must reject. The
//! decoder here builds the same `Value` but records every repeated key on
//! the way, at any nesting depth.
//!
//! Last-value-wins is preserved for the returned value so callers that
//! choose to ignore duplicates see what `serde_json` would have produced.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

/// A parsed JSON document plus the object keys that appeared more than once.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedJson {
    /// The document, with last-value-wins for repeated keys.
    pub value: Value,
    /// Repeated keys, distinct, in the order their repetition was first seen.
    pub duplicate_keys: Vec<String>,
}

impl CheckedJson {
    /// Whether any object in the document repeated a key.
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_keys.is_empty()
    }
}

/// Parse `input`, recording repeated object keys instead of dropping them.
pub fn parse_checked(input: &str) -> Result<CheckedJson, serde_json::Error> {
    let CheckedValue { value, duplicates } = serde_json::from_str(input)?;
    let mut duplicate_keys: Vec<String> = Vec::with_capacity(duplicates.len());
    for key in duplicates {
        if !duplicate_keys.contains(&key) {
            duplicate_keys.push(key);
        }
    }
    Ok(CheckedJson {
        value,
        duplicate_keys,
    })
}

struct CheckedValue {
    value: Value,
    duplicates: Vec<String>,
}

impl CheckedValue {
    fn leaf(value: Value) -> Self {
        Self {
            value,
            duplicates: Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for CheckedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CheckedVisitor)
    }
}

struct CheckedVisitor;

impl<'de> Visitor<'de> for CheckedVisitor {
    type Value = CheckedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::Number(v.into())))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::Number(v.into())))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        // JSON text cannot encode NaN or infinity, so this never yields Null in practice.
        Ok(CheckedValue::leaf(
            Number::from_f64(v).map_or(Value::Null, Value::Number),
        ))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::String(v.to_string())))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::String(v)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::Null))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(CheckedValue::leaf(Value::Null))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        CheckedValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        let mut duplicates = Vec::new();
        while let Some(item) = seq.next_element::<CheckedValue>()? {
            duplicates.extend(item.duplicates);
            items.push(item.value);
        }
        Ok(CheckedValue {
            value: Value::Array(items),
            duplicates,
        })
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::new();
        let mut duplicates = Vec::new();
        while let Some(key) = access.next_key::<String>()? {
            let item: CheckedValue = access.next_value()?;
            duplicates.extend(item.duplicates);
            if map.contains_key(&key) {
                duplicates.push(key.clone());
            }
            map.insert(key, item.value);
        }
        Ok(CheckedValue {
            value: Value::Object(map),
            duplicates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_no_duplicates() {
        let parsed = parse_checked(r#"{"a": {"b": 1, "c": [1, 2.5, null, true]}}"#).unwrap();
        assert!(!parsed.has_duplicates());
        assert_eq!(parsed.value, json!({"a": {"b": 1, "c": [1, 2.5, null, true]}}));
    }

    #[test]
    fn test_nested_duplicate_is_recorded() {
        let parsed = parse_checked(r#"{ "a": { "b": 1, "b": 2 }}"#).unwrap();
        assert_eq!(parsed.duplicate_keys, vec!["b".to_string()]);
        // Last value wins, as with plain serde_json.
        assert_eq!(parsed.value, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_duplicates_inside_arrays_are_recorded() {
        let parsed = parse_checked(r#"[{"x": 1, "x": 1}]"#).unwrap();
        assert_eq!(parsed.duplicate_keys, vec!["x".to_string()]);
    }

    #[test]
    fn test_repeated_duplicate_reported_once() {
        let parsed = parse_checked(r#"{"k": 1, "k": 2, "k": 3, "m": {"k": 0, "k": 1}}"#).unwrap();
        assert_eq!(parsed.duplicate_keys, vec!["k".to_string()]);
    }

    #[test]
    fn test_duplicates_in_document_order() {
        let parsed = parse_checked(r#"{"t": {"x": {"title": 1, "title": 2}}, "t": {}}"#).unwrap();
        assert_eq!(
            parsed.duplicate_keys,
            vec!["title".to_string(), "t".to_string()]
        );
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(parse_checked("{").is_err());
        assert!(parse_checked("").is_err());
    }

    #[test]
    fn test_preserves_key_order() {
        let parsed = parse_checked(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let keys: Vec<&String> = parsed.value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    proptest! {
        #[test]
        fn prop_matches_serde_json_without_duplicates(
            keys in proptest::collection::btree_set("[a-z]{1,8}", 0..12),
            n in any::<i64>(),
        ) {
            let object: Map<String, Value> =
                keys.iter().map(|k| (k.clone(), json!(n))).collect();
            let text = serde_json::to_string(&Value::Object(object)).unwrap();
            let parsed = parse_checked(&text).unwrap();
            let expected: Value = serde_json::from_str(&text).unwrap();
            prop_assert!(!parsed.has_duplicates());
            prop_assert_eq!(parsed.value, expected);
        }

        #[test]
        fn prop_repeated_key_always_detected(key in "[a-z_]{1,12}", a in any::<u32>(), b in any::<u32>()) {
            let text = format!(r#"{{"outer": {{"{key}": {a}, "{key}": {b}}}}}"#);
            let parsed = parse_checked(&text).unwrap();
            prop_assert_eq!(parsed.duplicate_keys, vec![key]);
        }
    }
}
