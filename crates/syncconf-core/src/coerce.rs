//! Scalar coercion for parameter values.
//!
//! Two policies coexist and must stay separate: the lenient [`coerce`] used
//! for generic `NAME=VALUE` assignments, and [`parse_strict_bool`] used as
//! the argument parser for boolean-only flags. Folding the strict parser
//! into the lenient one would turn a rejected token into a silent string.

use serde_json::Value;

/// Case-insensitive boolean vocabulary shared by both policies.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

/// Best-effort coercion: boolean token, then integer, then the string as-is.
pub fn coerce(raw: &str) -> Value {
    if let Some(b) = parse_bool_token(raw) {
        return Value::Bool(b);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    Value::String(raw.to_string())
}

/// Strict boolean parse for flags that only accept booleans.
/// Anything outside the recognized vocabulary is an argument error.
pub fn parse_strict_bool(raw: &str) -> Result<bool, String> {
    parse_bool_token(raw)
        .ok_or_else(|| format!("boolean value expected (yes/true/no/false), got '{raw}'"))
}
