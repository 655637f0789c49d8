//! op-core: motor de operaciones con ciclo de vida y composición en pipelines.
//!
//! - `operation`: blueprint (`OperationType`), instancia (`Operation`) y la
//!   cadena de hooks before/around/after/error/succeeded/halted.
//! - `pipeline`: stages encadenados, reenvío de outputs y corte por halt.
//! - `model`: argumentos, descriptores de input y Property Store.
//!
//! Todo es síncrono y de un solo hilo; los tipos se comparten con `Rc`.
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod operation;
pub mod pipeline;

pub use errors::OperationError;
pub use model::{Args, Input, InputKind, Property, PropertyError, PropertyStore, Schema};
pub use operation::{CallbackChain, Callbacks, Interrupt, Next, Operation, OperationBuilder, OperationState, OperationType, Step};
pub use pipeline::{Pipeline, PipelineBuilder, Stage, StageOption, StageOptions};
