//! Pipelines de demostración construidos con las operaciones de stock.
use log::info;
use op_adapters::{exclaim, halting_gate, pair_generator, string_capitalizer, string_generator, string_multiplier, sum};
use op_core::{Args, Operation, OperationError, OperationType, Pipeline, Property, StageOptions};
use serde_json::Value;

use crate::config::DemoConfig;
use crate::errors::CoreError;

/// Lee una propiedad declarada del pipeline; un nombre no declarado es error.
fn property(op: &Operation, name: &str) -> Result<Value, OperationError> {
    op.try_get(name)
      .cloned()
      .ok_or_else(|| OperationError::InvalidArguments(format!("{} has no property `{name}`", op.operation_type().name())))
}

/// Generador seguido del multiplicador; separador y repeticiones vienen de
/// la configuración y pueden sobrescribirse con los keywords `separator` y
/// `repeat` del pipeline.
pub fn repeat_pipeline(config: &DemoConfig) -> OperationType {
    Pipeline::define("RepeatBacon").property(Property::new("repeat").with_default(config.repeat))
                                   .property(Property::new("separator").with_default(config.separator.as_str()))
                                   .then(&string_generator())
                                   .then_with(&string_multiplier(),
                                              StageOptions::new().computed("multiplicator", |op| property(op, "repeat"))
                                                                 .computed("separator", |op| property(op, "separator")))
                                   .build()
}

/// `capitalizer >> exclaim`, para mapear sobre colecciones.
pub fn shout() -> OperationType {
    string_capitalizer() >> exclaim()
}

/// El tercer stage nunca llega a ejecutarse.
pub fn gated_pipeline() -> OperationType {
    Pipeline::define("Gated").then(&string_generator())
                             .then_with(&halting_gate(), StageOptions::new().set("reason", "gate closed"))
                             .then(&string_capitalizer())
                             .build()
}

pub fn pair_sum() -> OperationType {
    Pipeline::compose("PairSum", &[pair_generator(), sum()])
}

/// Recibe el texto (input derivado del capitalizador) y lo repite.
pub fn echo_pipeline() -> OperationType {
    Pipeline::define("Echo").then(&string_capitalizer())
                            .then_with(&string_multiplier(), StageOptions::new().set("multiplicator", 2))
                            .build()
}

/// Ejecuta todas las demos y devuelve `(nombre, output)` en orden.
pub fn run_all(config: &DemoConfig) -> Result<Vec<(String, Value)>, CoreError> {
    let mut results = Vec::new();

    for ty in [repeat_pipeline(config), gated_pipeline(), pair_sum()] {
        let mut op = ty.new_instance(Args::new())?;
        let output = op.output()?;
        info!("{} [{}] -> {:?}: {output}", ty.name(), &ty.definition_hash()[..12], op.state());
        results.push((ty.name().to_string(), output));
    }

    let echo = echo_pipeline();
    let output = echo.call(Args::new().arg("hello"))?;
    info!("{} -> {output}", echo.name());
    results.push((echo.name().to_string(), output));

    let shout = shout();
    let words: Vec<Value> = ["hello", "world"].into_iter()
                                              .map(Value::from)
                                              .map(shout.as_fn())
                                              .collect::<Result<_, _>>()?;
    info!("{} -> {words:?}", shout.name());
    results.push((shout.name().to_string(), Value::Array(words)));

    Ok(results)
}
