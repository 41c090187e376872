//! Decoding of stored field values.
//!
//! A stored value arrives in one of several loose shapes: nothing, a JSON
//! string, an array or object of `"<tag>:<uid>"` strings, or a single string.
//! These helpers flatten all of them into one ordered list of entries so the
//! legacy shapes never reach the normalizer.

use serde_json::Value;

/// Whether a string should be treated as encoded JSON.
fn looks_like_json(raw: &str) -> bool {
    raw.is_empty() || raw.starts_with('[') || raw.starts_with('{')
}

/// Decode `raw` if it looks like JSON.
///
/// An empty string decodes to `Null`. A string that looks like JSON but
/// fails to parse, or does not look like JSON at all, is returned unchanged
/// as a `Value::String`.
#[must_use]
pub fn decode_if_json(raw: &str) -> Value {
    if !looks_like_json(raw) {
        return Value::String(raw.to_owned());
    }
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Decode a string value in place; any other value is returned as is.
#[must_use]
pub fn decode_value(raw: Value) -> Value {
    match raw {
        Value::String(s) if looks_like_json(&s) => decode_if_json(&s),
        other => other,
    }
}

/// Flatten a decoded value into its ordered list of entries.
///
/// Arrays keep element order and objects keep value order. Scalars become a
/// one-element list; nested arrays, objects and nulls inside a collection
/// are skipped.
#[must_use]
pub fn entries(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(scalar_entry).collect(),
        Value::Object(map) => map.values().filter_map(scalar_entry).collect(),
        scalar => scalar_entry(scalar).into_iter().collect(),
    }
}

fn scalar_entry(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
