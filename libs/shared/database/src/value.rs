//! Conversions between typed document-store values and plain JSON.
//!
//! The store wraps every field in a single-key type wrapper
//! (`{"stringValue": ...}`, `{"timestampValue": ...}`, ...). Writers build
//! `fields` maps with the encode helpers below; readers flatten a whole
//! document resource back into plain JSON so entity structs can be
//! deserialized with serde directly. Timestamps travel as RFC 3339 strings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use shared_models::error::AppError;

pub fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

pub fn timestamp_value(ts: DateTime<Utc>) -> Value {
    json!({ "timestampValue": ts.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

pub fn double_value(v: f64) -> Value {
    json!({ "doubleValue": v })
}

// Integers are transported as decimal strings.
pub fn integer_value(v: i64) -> Value {
    json!({ "integerValue": v.to_string() })
}

pub fn boolean_value(v: bool) -> Value {
    json!({ "booleanValue": v })
}

/// Flatten a document resource (`{"name": ..., "fields": {...}}`) into a
/// plain JSON object, injecting the trailing path segment of `name` as `id`.
pub fn document_to_json(doc: &Value) -> Result<Value, AppError> {
    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Decode("document resource has no name".to_string()))?;
    let id = name.rsplit('/').next().unwrap_or(name);

    let mut out = Map::new();
    out.insert("id".to_string(), json!(id));

    if let Some(fields) = doc.get("fields").and_then(Value::as_object) {
        for (key, value) in fields {
            out.insert(key.clone(), decode_value(value)?);
        }
    }

    Ok(Value::Object(out))
}

fn decode_value(value: &Value) -> Result<Value, AppError> {
    let wrapper = value
        .as_object()
        .ok_or_else(|| AppError::Decode("field value is not a type wrapper".to_string()))?;
    let (kind, inner) = wrapper
        .iter()
        .next()
        .ok_or_else(|| AppError::Decode("empty field value".to_string()))?;

    match kind.as_str() {
        "stringValue" | "timestampValue" | "doubleValue" | "booleanValue" => Ok(inner.clone()),
        "nullValue" => Ok(Value::Null),
        "integerValue" => {
            let raw = inner
                .as_str()
                .ok_or_else(|| AppError::Decode("integerValue is not a string".to_string()))?;
            let parsed: i64 = raw
                .parse()
                .map_err(|_| AppError::Decode(format!("bad integerValue: {raw}")))?;
            Ok(json!(parsed))
        }
        "mapValue" => {
            let mut out = Map::new();
            if let Some(fields) = inner.get("fields").and_then(Value::as_object) {
                for (key, value) in fields {
                    out.insert(key.clone(), decode_value(value)?);
                }
            }
            Ok(Value::Object(out))
        }
        "arrayValue" => {
            let mut out = Vec::new();
            if let Some(values) = inner.get("values").and_then(Value::as_array) {
                for value in values {
                    out.push(decode_value(value)?);
                }
            }
            Ok(Value::Array(out))
        }
        other => Err(AppError::Decode(format!("unsupported value type: {other}"))),
    }
}
