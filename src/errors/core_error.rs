use op_core::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de operación: {0}")]
    Operation(#[from] OperationError),
}
