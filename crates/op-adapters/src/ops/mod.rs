//! Operaciones de stock agrupadas por familia.

pub mod control;
pub mod math;
pub mod text;
