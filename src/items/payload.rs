// Request payload extraction
// Loose JSON field access for create/update bodies

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Parse a request body into a JSON object
///
/// A missing body or a literal `null` counts as `{}`. Anything that is not an
/// object is a failure of the request, not a validation error.
pub fn parse_object(body: Option<&str>) -> Result<Map<String, Value>, ApiError> {
    let Some(raw) = body else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(raw)? {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        Value::Bool(_) => Err(ApiError::NotAnObject("boolean")),
        Value::Number(_) => Err(ApiError::NotAnObject("number")),
        Value::String(_) => Err(ApiError::NotAnObject("string")),
        Value::Array(_) => Err(ApiError::NotAnObject("array")),
    }
}

/// Truthiness: null, false, zero, and empty strings/arrays/objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Read a field as text, falling back to `default` when absent or null
///
/// Non-string values are rendered as their JSON text.
pub fn text_or(map: &Map<String, Value>, key: &str, default: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => as_text(value),
    }
}

pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trailing path segment, e.g. `/items/42` -> `42`
pub fn item_id(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}
