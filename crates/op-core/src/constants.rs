//! Constantes del motor core.

/// Versión lógica del motor. Forma parte del input de `definition_hash`, de
/// modo que un cambio incompatible del runner invalida los hashes de
/// definiciones aunque los tipos no cambien.
pub const ENGINE_VERSION: &str = "OP1.0";
