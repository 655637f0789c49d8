use serde::{Deserialize, Serialize};

/// Estado de una `Operation`.
///
/// Las transiciones válidas son:
/// - `Initialized` -> `Halted`
/// - `Initialized` -> `Succeeded`
/// - `Initialized` | `Halted` | `Succeeded` -> `Failed` (error escapando de la cadena)
///
/// `Halted` y `Succeeded` se alcanzan una sola vez; no hay reversión a
/// `Initialized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationState {
    /// Construida, todavía sin ejecutar.
    #[default]
    Initialized,
    /// Salida anticipada esperada (no es un error).
    Halted,
    /// Camino normal.
    Succeeded,
    /// Un error escapó de la cadena de hooks.
    Failed,
}

impl OperationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OperationState::Initialized)
    }
}
