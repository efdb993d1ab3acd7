//! Serde support for [`Value`] (feature-gated)
//!
//! Values serialize as plain JSON: `Undefined` and `Null` both become `null`,
//! integral numbers are written as integers. Deserialization goes through
//! `serde_json::Value`; JSON objects have no counterpart and are rejected.
//!
//! # Example
//!
//! ```rust
//! use rulechain::Value;
//!
//! let value: Value = serde_json::from_str(r#"["a", 1, true, null]"#).unwrap();
//! assert_eq!(value.len(), Some(4));
//! assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a",1,true,null]"#);
//! assert!(serde_json::from_str::<Value>(r#"{"a": 1}"#).is_err());
//! ```

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Value;

/// Error converting a JSON object into a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("JSON objects cannot be used as rule values")]
pub struct ObjectValueError;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(json).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ObjectValueError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(_) => return Err(ObjectValueError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let value = Value::from(vec![
            Value::from(1),
            Value::from(1.5),
            Value::from("a"),
            Value::Undefined,
            Value::from(false),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,1.5,"a",null,false]"#);
    }

    #[test]
    fn test_deserialize() {
        let value: Value = serde_json::from_str(r#"["x", 2, null, [true]]"#).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::from("x"),
                Value::from(2),
                Value::Null,
                Value::Array(vec![Value::Bool(true)]),
            ])
        );
    }

    #[test]
    fn test_deserialize_object_fails() {
        let result: Result<Value, _> = serde_json::from_str(r#"{"a": 1}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("JSON objects"));
    }

    #[test]
    fn test_try_from_nested_object_fails() {
        let json = serde_json::json!([1, {"a": 1}]);
        assert_eq!(Value::try_from(json), Err(ObjectValueError));
    }
}
