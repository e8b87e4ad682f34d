//! Strict operand extraction for `/add`.
//!
//! Query values must parse with `str::parse::<i64>`; body values must already
//! be JSON integers that fit in `i64`.

use serde_json::Value;

use super::dto::AddQuery;
use super::error::GatewayError;

/// Parse both operands from query parameters.
///
/// # Errors
/// [`GatewayError::Validation`] if either operand is missing or not an integer.
pub fn operands_from_query(query: &AddQuery) -> Result<(i64, i64), GatewayError> {
    let a = parse_param("a", query.a.as_deref())?;
    let b = parse_param("b", query.b.as_deref())?;
    Ok((a, b))
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<i64, GatewayError> {
    let raw =
        raw.ok_or_else(|| GatewayError::Validation(format!("missing query parameter '{name}'")))?;
    raw.parse::<i64>().map_err(|e| {
        GatewayError::Validation(format!("invalid value for '{name}': '{raw}' ({e})"))
    })
}

/// Parse both operands from a JSON request body.
///
/// # Errors
/// [`GatewayError::Validation`] if the body is not a JSON object or an operand
/// is missing or not an integer number.
pub fn operands_from_body(body: &[u8]) -> Result<(i64, i64), GatewayError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| GatewayError::Validation(format!("request body is not valid JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(GatewayError::Validation(
            "request body must be a JSON object".to_owned(),
        ));
    };
    let a = json_operand("a", fields.get("a"))?;
    let b = json_operand("b", fields.get("b"))?;
    Ok((a, b))
}

fn json_operand(name: &str, value: Option<&Value>) -> Result<i64, GatewayError> {
    match value {
        None => Err(GatewayError::Validation(format!("missing field '{name}'"))),
        Some(v) => v.as_i64().ok_or_else(|| {
            GatewayError::Validation(format!(
                "'{name}' must be an integer number, got {}",
                kind(v)
            ))
        }),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "a fractional number",
        Value::Number(_) => "an out-of-range number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
