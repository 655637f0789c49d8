//! Errores específicos del core.
//!
//! `OperationError` es el único tipo de error que cruza la frontera de
//! `Operation::run`. Es `Clone + Eq` porque la instancia conserva el error
//! capturado y lo devuelve intacto tanto a los hooks `error` como al caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PropertyError;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum OperationError {
    #[error("invalid arguments: {0}")] InvalidArguments(String),
    #[error("operation already completed")] AlreadyCompleted,
    #[error(transparent)] Property(#[from] PropertyError),
    #[error("operation `{0}` does not define an execute body")] NotImplemented(String),
    #[error("{kind}: {message}")] Raised { kind: String, message: String },
}

impl OperationError {
    /// Error de negocio levantado por un body o un hook.
    pub fn raised(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Raised { kind: kind.into(),
                       message: message.into() }
    }

    /// Atajo para un fallo genérico (`kind = "failure"`).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::raised("failure", message)
    }

    pub fn is_already_completed(&self) -> bool {
        matches!(self, Self::AlreadyCompleted)
    }
}
