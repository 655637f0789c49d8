//! Property Store: atributos con nombre por instancia.
//!
//! Cada tipo de operación declara un `Schema` (lista ordenada de `Property`).
//! Las instancias guardan sus valores en un `PropertyStore`. Las únicas
//! reglas observables son:
//! - `required`: el valor final no puede ser `Null`.
//! - `default`: literal o calculado de forma perezosa cuando el valor es `Null`.
//! - `converts`: coerción aplicada a valores no nulos.
//! - `accepts`: lista fija de valores o predicado; un rechazo es un error.
//!
//! El runner de operaciones sólo consulta el store vía `get`/`set`; nunca
//! reimplementa estas comprobaciones.
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errores del Property Store.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PropertyError {
    #[error("property `{0}` is required")] MissingRequired(String),
    #[error("property `{name}` rejected {value}: {reason}")] Rejected { name: String, value: String, reason: String },
    #[error("unknown property `{0}`")] Unknown(String),
}

/// Valor por defecto de una propiedad.
#[derive(Clone)]
pub enum DefaultValue {
    Literal(Value),
    Computed(Rc<dyn Fn() -> Value>),
}

impl DefaultValue {
    fn resolve(&self) -> Value {
        match self {
            DefaultValue::Literal(v) => v.clone(),
            DefaultValue::Computed(f) => f(),
        }
    }
}

/// Regla de aceptación de valores.
#[derive(Clone)]
pub enum Acceptance {
    Values(Vec<Value>),
    Predicate(Rc<dyn Fn(&Value) -> bool>),
}

impl Acceptance {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Acceptance::Values(values) => values.contains(value),
            Acceptance::Predicate(p) => p(value),
        }
    }
}

type Converter = Rc<dyn Fn(Value) -> Result<Value, String>>;

/// Declaración de un atributo.
#[derive(Clone)]
pub struct Property {
    name: String,
    required: bool,
    default: Option<DefaultValue>,
    converts: Option<Converter>,
    accepts: Option<Acceptance>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               required: false,
               default: None,
               converts: None,
               accepts: None }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Default evaluado en cada construcción (p. ej. una lista vacía nueva).
    pub fn with_default_fn<F>(mut self, f: F) -> Self
        where F: Fn() -> Value + 'static
    {
        self.default = Some(DefaultValue::Computed(Rc::new(f)));
        self
    }

    pub fn converts<F>(mut self, f: F) -> Self
        where F: Fn(Value) -> Result<Value, String> + 'static
    {
        self.converts = Some(Rc::new(f));
        self
    }

    pub fn accepts<F>(mut self, f: F) -> Self
        where F: Fn(&Value) -> bool + 'static
    {
        self.accepts = Some(Acceptance::Predicate(Rc::new(f)));
        self
    }

    pub fn accepts_values<I, V>(mut self, values: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        self.accepts = Some(Acceptance::Values(values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Aplica default, coerción, aceptación y obligatoriedad (en ese orden).
    pub fn prepare(&self, value: Value) -> Result<Value, PropertyError> {
        let value = match (value, &self.default) {
            (Value::Null, Some(default)) => default.resolve(),
            (value, _) => value,
        };
        if value.is_null() {
            if self.required {
                return Err(PropertyError::MissingRequired(self.name.clone()));
            }
            return Ok(value);
        }
        let value = match &self.converts {
            Some(convert) => convert(value.clone()).map_err(|reason| self.rejected(&value, reason))?,
            None => value,
        };
        if let Some(rule) = &self.accepts {
            if !rule.accepts(&value) {
                return Err(self.rejected(&value, "not accepted".into()));
            }
        }
        Ok(value)
    }

    fn rejected(&self, value: &Value, reason: String) -> PropertyError {
        PropertyError::Rejected { name: self.name.clone(),
                                  value: value.to_string(),
                                  reason }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
         .field("name", &self.name)
         .field("required", &self.required)
         .field("default", &self.default.is_some())
         .field("converts", &self.converts.is_some())
         .field("accepts", &self.accepts.is_some())
         .finish()
    }
}

/// Esquema ordenado de propiedades de un tipo.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: IndexMap<String, Property>,
}

impl Schema {
    /// Declara (o redeclara, conservando la posición) una propiedad.
    pub fn define(&mut self, property: Property) {
        self.properties.insert(property.name.clone(), property);
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Valores de una instancia.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: IndexMap<String, Value>,
}

impl PropertyStore {
    /// Construye el store a partir de los valores provistos, recorriendo el
    /// esquema en orden de declaración.
    pub fn populate(schema: &Schema, mut provided: IndexMap<String, Value>) -> Result<Self, PropertyError> {
        if let Some(unknown) = provided.keys().find(|name| !schema.contains(name)) {
            return Err(PropertyError::Unknown(unknown.clone()));
        }
        let mut values = IndexMap::with_capacity(schema.len());
        for (name, property) in schema.properties.iter() {
            let raw = provided.shift_remove(name).unwrap_or(Value::Null);
            values.insert(name.clone(), property.prepare(raw)?);
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, schema: &Schema, name: &str, value: Value) -> Result<(), PropertyError> {
        let property = schema.get(name).ok_or_else(|| PropertyError::Unknown(name.to_string()))?;
        let value = property.prepare(value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
