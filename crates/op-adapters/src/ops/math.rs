//! Operaciones numéricas pequeñas, útiles para ejercitar el reparto de
//! arrays entre stages.
use op_core::{InputKind, OperationError, OperationType, Property};
use serde_json::{json, Value};

/// Sin inputs; produce `[1, 2]`.
pub fn pair_generator() -> OperationType {
    OperationType::define("PairGenerator").execute(|_| Ok(json!([1, 2])))
                                          .build()
}

/// Suma `a + b`. Enteros si ambos lo son; flotantes en otro caso.
pub fn sum() -> OperationType {
    OperationType::define("Sum").input_with(InputKind::Positional, Property::new("a").accepts(Value::is_number))
                                .input_with(InputKind::Positional, Property::new("b").accepts(Value::is_number))
                                .execute(|op| Ok(add(op.get("a"), op.get("b"))?))
                                .build()
}

/// Devuelve el segundo de dos posicionales.
pub fn second_of_pair() -> OperationType {
    OperationType::define("SecondOfPair").input("first", InputKind::Positional)
                                         .input("second", InputKind::Positional)
                                         .execute(|op| Ok(op.get("second").clone()))
                                         .build()
}

fn add(a: &Value, b: &Value) -> Result<Value, OperationError> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.checked_add(y)
                .map(Value::from)
                .ok_or_else(|| OperationError::raised("OverflowError", format!("{x} + {y}")));
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => Ok(json!(x + y)),
        _ => Err(OperationError::InvalidArguments(format!("cannot add {a} and {b}"))),
    }
}
