//! Operaciones sobre texto.
use op_core::{InputKind, OperationError, OperationType, Property};
use serde_json::Value;

use crate::convert::{display, to_integer, to_text};

/// Tope de repeticiones del multiplicador.
pub const MAX_REPETITIONS: i64 = 10_000;

fn text_input(name: &str) -> Property {
    Property::new(name).accepts(Value::is_string)
}

fn text_of(value: &Value, name: &str) -> Result<String, OperationError> {
    value.as_str()
         .map(str::to_string)
         .ok_or_else(|| OperationError::InvalidArguments(format!("`{name}` must be a string")))
}

/// Sin inputs; produce siempre `"chunky bacon"`.
pub fn string_generator() -> OperationType {
    OperationType::define("StringGenerator").execute(|_| Ok(Value::from("chunky bacon")))
                                            .build()
}

/// `text` en mayúsculas.
pub fn string_capitalizer() -> OperationType {
    OperationType::define("StringCapitalizer").input_with(InputKind::Positional, text_input("text"))
                                              .execute(|op| Ok(Value::from(text_of(op.get("text"), "text")?.to_uppercase())))
                                              .build()
}

/// Repite `text` `multiplicator` veces unido por `separator`. Si `text` es
/// un array, se repite la secuencia completa.
pub fn string_multiplier() -> OperationType {
    OperationType::define("StringMultiplier")
        .input("text", InputKind::Positional)
        .property(Property::new("multiplicator").required().with_default(1).converts(to_integer))
        .property(Property::new("separator").required().with_default(" ").converts(to_text))
        .execute(|op| {
            let parts: Vec<String> = match op.get("text") {
                Value::Array(items) => items.iter().map(display).collect(),
                other => vec![display(other)],
            };
            let times = op.get("multiplicator").as_i64().unwrap_or(1);
            if !(0..=MAX_REPETITIONS).contains(&times) {
                return Err(OperationError::raised("RangeError",
                                                  format!("multiplicator {times} outside 0..={MAX_REPETITIONS}"))
                           .into());
            }
            let separator = display(op.get("separator"));
            let unit = parts.join(separator.as_str());
            Ok(Value::from(std::iter::repeat(unit).take(times as usize).collect::<Vec<_>>().join(separator.as_str())))
        })
        .build()
}

/// Añade `"!"` al final.
pub fn exclaim() -> OperationType {
    OperationType::define("Exclaim").input_with(InputKind::Positional, text_input("string"))
                                    .execute(|op| Ok(Value::from(format!("{}!", text_of(op.get("string"), "string")?))))
                                    .build()
}

/// Parte `text` en palabras; el array resultante se reparte como
/// posicionales en el stage siguiente.
pub fn word_splitter() -> OperationType {
    OperationType::define("WordSplitter").input_with(InputKind::Positional, text_input("text"))
                                         .execute(|op| {
                                             let text = text_of(op.get("text"), "text")?;
                                             Ok(Value::Array(text.split_whitespace().map(Value::from).collect()))
                                         })
                                         .build()
}
