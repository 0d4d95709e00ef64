//! Typed parameter extraction from a `serde_json::Value` object.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if the key is
/// missing or not a number. Never fails; partial parameter objects are the
/// normal case.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}
