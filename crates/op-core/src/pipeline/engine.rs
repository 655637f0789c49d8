//! Body generado de los pipelines.

use log::debug;
use serde_json::Value;

use super::stage::StageData;
use crate::operation::{Operation, Step};

/// Ejecuta los stages en orden reenviando el output de cada uno al
/// siguiente. Un stage detenido detiene el pipeline con su output y los
/// stages restantes nunca se instancian.
pub(crate) fn execute_stages(op: &mut Operation) -> Step<Value> {
    let ty = op.operation_type().clone();
    debug!("pipeline {} [{}] with {} stage(s)",
           ty.name(),
           ty.definition_hash(),
           ty.stages().len());

    let mut data = StageData::Initial(op.bound_arguments());
    for (index, stage) in ty.stages().iter().enumerate() {
        let mut sub = stage.instantiate(op, data)?;
        let output = sub.output()?;
        if sub.is_halted() {
            debug!("pipeline {} halted at stage #{index} ({})", ty.name(), stage.operation().name());
            return op.halt(output);
        }
        debug!("pipeline {} stage #{index} ({}) done", ty.name(), stage.operation().name());
        data = StageData::Output(output);
    }

    Ok(match data {
        StageData::Output(value) => value,
        StageData::Initial(_) => Value::Null,
    })
}
