//! # Submission Coercion
//!
//! Prepares raw form values for schema validation.
//!
//! - Empty strings are dropped, so a blank control is reported by the
//!   schema's `required` keyword rather than by `minLength`.
//! - `quantity` strings that read as numbers become JSON numbers.
//!   Whole numbers (including `"5.0"`) become integers; fractional values
//!   stay floats and are rejected by the `integer` type.
//! - Anything else passes through unchanged, including unknown keys, so
//!   `additionalProperties` can report them.

use serde_json::{Map, Number, Value};

use orderform_core::FieldKind;

/// Largest magnitude at which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Build a coerced JSON document from raw `(field, value)` string pairs.
pub fn coerce_submission<I, K, V>(raw: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: Map<String, Value> = raw
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect();
    coerce_document(Value::Object(map))
}

/// Coerce an already-parsed document (e.g. loaded from JSON or YAML).
///
/// Non-object documents are returned unchanged and left for the schema's
/// `type` keyword to reject.
pub fn coerce_document(document: Value) -> Value {
    match document {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(key, value)| coerce_entry(&key, value).map(|v| (key, v)))
                .collect(),
        ),
        other => other,
    }
}

fn coerce_entry(key: &str, value: Value) -> Option<Value> {
    let is_quantity = key == FieldKind::Quantity.as_str();
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) if is_quantity => Some(coerce_number(s)),
        Value::Number(n) if is_quantity => Some(normalize_number(n)),
        other => Some(other),
    }
}

fn coerce_number(raw: String) -> Value {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => normalize_float(f),
        _ => Value::String(raw),
    }
}

fn normalize_number(n: Number) -> Value {
    if n.is_i64() || n.is_u64() {
        return Value::Number(n);
    }
    match n.as_f64() {
        Some(f) => normalize_float(f),
        None => Value::Number(n),
    }
}

fn normalize_float(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}
