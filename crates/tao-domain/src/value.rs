//! Dynamic values
//!
//! Options, call arguments and call results are untyped at the runtime
//! boundary and are carried as [`serde_json::Value`].

use std::collections::BTreeMap;

pub use serde_json::Value;

/// Flat option mapping applied to services before `init`
pub type Options = BTreeMap<String, Value>;

/// Type label used in argument-type errors
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `"0"` and empty
/// collections are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Unwraps a single array argument into the positional list
pub fn normalize_args(mut args: Vec<Value>) -> Vec<Value> {
    if args.len() == 1 && args[0].is_array() {
        if let Some(Value::Array(inner)) = args.pop() {
            return inner;
        }
    }
    args
}

/// Text form of a scalar as used by encoded call descriptions.
///
/// Strings are written raw; other values use their JSON text.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Inverse of [`scalar_text`] for scalars.
///
/// Numbers, booleans and `null` decode to the value they spell only when
/// `text` is exactly that value's text form; `007`, `1e3` or `-0` stay
/// strings so a decoded call writes back the text it was read from.
pub fn parse_scalar(text: &str) -> Value {
    let typed = match text {
        "null" => Some(Value::Null),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => text.parse::<i64>().ok().map(Value::from).or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .map(Value::from)
        }),
    };
    match typed {
        Some(value) if scalar_text(&value) == text => value,
        _ => Value::String(text.to_string()),
    }
}
