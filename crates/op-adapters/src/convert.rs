//! Conversores para `Property::converts`.
//!
//! Siguen la semántica laxa habitual: un string numérico se convierte a
//! entero y cualquier escalar se puede representar como texto. Lo que no
//! tiene conversión razonable (objetos, arrays) se rechaza.

use serde_json::Value;

/// Coerción a entero.
pub fn to_integer(value: Value) -> Result<Value, String> {
    match value {
        Value::Number(n) if n.is_i64() => Ok(Value::Number(n)),
        Value::Number(n) => n.as_f64()
                             .map(f64::trunc)
                             .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                             .map(|f| Value::from(f as i64))
                             .ok_or_else(|| format!("{n} is not representable as an integer")),
        Value::String(s) => s.trim()
                             .parse::<i64>()
                             .map(Value::from)
                             .map_err(|e| format!("`{s}` is not an integer: {e}")),
        Value::Bool(b) => Ok(Value::from(i64::from(b))),
        other => Err(format!("cannot convert {other} to an integer")),
    }
}

/// Coerción a string.
pub fn to_text(value: Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value),
        Value::Number(_) | Value::Bool(_) => Ok(Value::String(value.to_string())),
        other => Err(format!("cannot convert {other} to text")),
    }
}

/// Representación textual de un valor para concatenar: los strings van sin
/// comillas.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
