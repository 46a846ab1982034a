//! `serde_json::Value` as a conversion source.
//!
//! Numbers lower to `i64` when they fit, then `u64`, then `f64`. Arrays become slices and
//! objects become maps with string keys in key order.

use crate::to_value::ToValue;
use crate::value::Value;

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    n.as_f64().map_or(Value::Nil, Value::F64)
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Slice(items.iter().map(ToValue::to_value).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (Value::String(k.clone()), v.to_value()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lowers_document() {
        let doc = json!({ "port": 8080, "ratio": 0.5, "big": u64::MAX, "tags": ["a"], "none": null });
        let Value::Map(entries) = doc.to_value() else {
            panic!("expected map");
        };
        let get = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| *k == Value::from(key))
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("port"), Some(Value::I64(8080)));
        assert_eq!(get("ratio"), Some(Value::F64(0.5)));
        assert_eq!(get("big"), Some(Value::U64(u64::MAX)));
        assert_eq!(get("tags"), Some(Value::Slice(vec![Value::from("a")])));
        assert_eq!(get("none"), Some(Value::Nil));
    }
}
