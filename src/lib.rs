//! opflow Rust Library
//!
//! Este crate actúa como la capa de aplicación sobre `op-core`:
//! - Expone `config` con la configuración global (`CONFIG`).
//! - Expone `errors` con los errores de aplicación (`CoreError`).
//! - Expone `demo` con los pipelines que ejecuta el binario `main-core`.

pub mod config;
pub mod demo;
pub mod errors;
