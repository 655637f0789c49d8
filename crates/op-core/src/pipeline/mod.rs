//! Composición de operaciones en pipelines.
//!
//! Un pipeline es un `OperationType` más con una lista de stages; su body
//! recorre los stages reenviando el output de cada uno como input del
//! siguiente y se detiene en el primero que haga halt.

mod builder;
mod engine;
pub mod merge;
mod stage;

pub use builder::{Pipeline, PipelineBuilder};
pub(crate) use engine::execute_stages;
pub use stage::{Stage, StageOption, StageOptions};
