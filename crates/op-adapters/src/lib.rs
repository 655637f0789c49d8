//! op-adapters: operaciones de stock construidas sobre `op-core`.
//!
//! Este crate provee:
//! - Operaciones de texto (`ops::text`): generador, capitalizador,
//!   multiplicador, exclamación y separador de palabras.
//! - Operaciones numéricas (`ops::math`): par fijo y suma.
//! - Control de flujo (`ops::control`): una compuerta que hace halt.
//! - Conversores reutilizables para propiedades (`convert`).
//!
//! Las usa el binario de demo y los tests de integración del core.

pub mod convert;
pub mod ops;

pub use ops::control::halting_gate;
pub use ops::math::{pair_generator, second_of_pair, sum};
pub use ops::text::{exclaim, string_capitalizer, string_generator, string_multiplier, word_splitter};
