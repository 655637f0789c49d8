//! Control de flujo.
use log::debug;
use op_core::{InputKind, OperationType};

/// Hace halt siempre. El payload es el keyword opcional `reason` (`Null`
/// si no se da).
pub fn halting_gate() -> OperationType {
    OperationType::define("HaltingOperation").input("reason", InputKind::Keyword)
                                             .execute(|op| {
                                                 let reason = op.get("reason").clone();
                                                 debug!("halting gate closed (reason: {reason})");
                                                 op.halt(reason)
                                             })
                                             .build()
}
