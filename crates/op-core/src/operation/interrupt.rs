//! Señal de desenrollado de la cadena de hooks.
//!
//! Cada capa (before, around, body, after) devuelve un `Step`. `Ok` significa
//! "seguir"; `Err(Interrupt)` corta las capas restantes hasta la frontera de
//! `Operation::run`. El payload de un halt/succeed ya quedó memorizado en la
//! instancia cuando se crea la señal, por eso `Interrupt` sólo puede
//! construirse desde `Operation::halt`, `Operation::succeed` o desde un
//! `OperationError` (vía `?`).
use std::fmt;

use crate::errors::OperationError;

/// Resultado de una capa de la cadena.
pub type Step<T = ()> = Result<T, Interrupt>;

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Signal {
    Halted,
    Succeeded,
    Failed(OperationError),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Interrupt {
    pub(crate) signal: Signal,
}

impl Interrupt {
    pub(crate) fn halted() -> Self {
        Self { signal: Signal::Halted }
    }

    pub(crate) fn succeeded() -> Self {
        Self { signal: Signal::Succeeded }
    }

    /// `true` para halt/succeed, `false` para un error.
    pub fn is_completion(&self) -> bool {
        !matches!(self.signal, Signal::Failed(_))
    }

    pub fn error(&self) -> Option<&OperationError> {
        match &self.signal {
            Signal::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn into_error(self) -> Option<OperationError> {
        match self.signal {
            Signal::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OperationError> for Interrupt {
    fn from(error: OperationError) -> Self {
        Self { signal: Signal::Failed(error) }
    }
}

impl From<crate::model::PropertyError> for Interrupt {
    fn from(error: crate::model::PropertyError) -> Self {
        OperationError::from(error).into()
    }
}

impl fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signal {
            Signal::Halted => f.write_str("Interrupt(halted)"),
            Signal::Succeeded => f.write_str("Interrupt(succeeded)"),
            Signal::Failed(e) => write!(f, "Interrupt(failed: {e})"),
        }
    }
}
