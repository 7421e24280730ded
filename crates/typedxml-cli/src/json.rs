//! Conversion between JSON settings files and settings values

use serde_json::{Map, Number};
use typedxml::{Mapping, Value};

/// JSON integers become `Int`, every other number `Float`
pub fn to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => number_to_value(&n),
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => {
            Value::from(items.into_iter().map(to_value).collect::<Vec<_>>())
        }
        serde_json::Value::Object(entries) => Value::Mapping(to_mapping(entries)),
    }
}

pub fn to_mapping(entries: Map<String, serde_json::Value>) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key, to_value(value)))
        .collect()
}

fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Non-finite floats have no JSON form and come out as `null`
pub fn from_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => {
            Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(from_value).collect()),
        Value::Mapping(entries) => serde_json::Value::Object(from_mapping(entries)),
    }
}

pub fn from_mapping(entries: &Mapping) -> Map<String, serde_json::Value> {
    entries
        .iter()
        .map(|(key, value)| (key.clone(), from_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_keep_their_kind() {
        let value = to_value(json!({"port": 389, "timeout": 300.0, "ratio": 0.5}));
        let expected: Mapping = [
            ("port", Value::Int(389)),
            ("timeout", Value::Float(300.0)),
            ("ratio", Value::Float(0.5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(value, Value::Mapping(expected));
    }

    #[test]
    fn test_nested_values_convert_both_ways() {
        let original = json!({
            "users": {"objectClasses": ["inetOrgPerson", "person"], "scope": 2},
            "cache": false,
            "unset": null
        });
        let value = to_value(original.clone());
        assert_eq!(from_value(&value), original);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(from_value(&Value::Float(f64::NAN)), serde_json::Value::Null);
        assert_eq!(from_value(&Value::Float(f64::INFINITY)), serde_json::Value::Null);
    }
}
