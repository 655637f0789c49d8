use serde::{Deserialize, Serialize};

/// Forma en la que un input se enlaza en la construcción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    /// Obligatorio; consume argumentos de izquierda a derecha.
    Positional,
    /// Se toma del mapa de keywords; puede ser opcional.
    Keyword,
}

/// Descriptor de input declarado. El valor vive en el `PropertyStore` bajo
/// la propiedad del mismo nombre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    name: String,
    kind: InputKind,
}

impl Input {
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Positional)
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Keyword)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn is_positional(&self) -> bool {
        self.kind == InputKind::Positional
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == InputKind::Keyword
    }
}
