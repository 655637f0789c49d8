//! Modelos neutrales (Args, Input, Property Store).

pub mod args;
pub mod input;
pub mod property;

pub use args::Args;
pub use input::{Input, InputKind};
pub use property::{Acceptance, DefaultValue, Property, PropertyError, PropertyStore, Schema};
