//! Operaciones: blueprint, instancia y ciclo de vida.
//!
//! Una operación es una unidad de lógica de negocio con inputs declarados,
//! hooks de ciclo de vida y exactamente un resultado terminal. Este módulo
//! define:
//! - `OperationType` / `OperationBuilder`: el blueprint inmutable.
//! - `Operation`: la instancia con su máquina de estados.
//! - `CallbackChain` y `Callbacks`: el runner de hooks y el contrato delegado.
//! - `Step` / `Interrupt`: la señal de desenrollado entre capas.

mod callbacks;
mod definition;
mod instance;
mod interrupt;
mod state;

pub use callbacks::{CallbackChain, Callbacks, Next};
pub use definition::{OperationBuilder, OperationType};
pub use instance::Operation;
pub use interrupt::{Interrupt, Step};
pub use state::OperationState;
