//! Stage bindings: un tipo de operación más sus opciones estáticas/dinámicas.
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use super::merge::merge_keywords;
use crate::errors::OperationError;
use crate::model::Args;
use crate::operation::{Operation, OperationType};

type ComputedFn = Rc<dyn Fn(&Operation) -> Result<Value, OperationError>>;

/// Valor de una opción de stage.
#[derive(Clone)]
pub enum StageOption {
    /// Valor fijo.
    Literal(Value),
    /// Se evalúa contra la instancia del pipeline en el momento de construir
    /// el stage (puede leer propiedades del pipeline).
    Computed(ComputedFn),
}

impl StageOption {
    pub fn computed<F>(f: F) -> Self
        where F: Fn(&Operation) -> Result<Value, OperationError> + 'static
    {
        StageOption::Computed(Rc::new(f))
    }

    pub(crate) fn resolve(&self, pipeline: &Operation) -> Result<Value, OperationError> {
        match self {
            StageOption::Literal(v) => Ok(v.clone()),
            StageOption::Computed(f) => f(pipeline),
        }
    }
}

impl From<Value> for StageOption {
    fn from(value: Value) -> Self {
        StageOption::Literal(value)
    }
}

impl fmt::Debug for StageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOption::Literal(v) => write!(f, "Literal({v})"),
            StageOption::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Opciones de un stage, en orden de declaración.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    entries: IndexMap<String, StageOption>,
}

impl StageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opción literal.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), StageOption::Literal(value.into()));
        self
    }

    /// Opción calculada contra la instancia del pipeline.
    pub fn computed<F>(mut self, name: impl Into<String>, f: F) -> Self
        where F: Fn(&Operation) -> Result<Value, OperationError> + 'static
    {
        self.entries.insert(name.into(), StageOption::computed(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<&StageOption> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, pipeline: &Operation) -> Result<IndexMap<String, Value>, OperationError> {
        self.entries
            .iter()
            .map(|(name, option)| Ok((name.clone(), option.resolve(pipeline)?)))
            .collect()
    }
}

/// Datos que fluyen entre stages.
pub(crate) enum StageData {
    /// Inputs enlazados del propio pipeline (antes del primer stage).
    Initial(Args),
    /// Output del stage anterior.
    Output(Value),
}

/// Un puesto del pipeline.
#[derive(Debug, Clone)]
pub struct Stage {
    operation: OperationType,
    options: StageOptions,
}

impl Stage {
    pub fn new(operation: OperationType, options: StageOptions) -> Self {
        Self { operation, options }
    }

    pub fn operation(&self) -> &OperationType {
        &self.operation
    }

    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    /// Construye la sub-operación a partir de los datos entrantes.
    ///
    /// - `Initial`: posicionales del pipeline + keywords que el stage declara.
    /// - `Output(Array)`: los elementos se reparten como posicionales.
    /// - `Output(otro)`: un único posicional.
    ///
    /// Los posicionales se recortan a los que el stage declara y las opciones
    /// del stage pisan cualquier keyword reenviado con el mismo nombre.
    pub(crate) fn instantiate(&self, pipeline: &Operation, data: StageData) -> Result<Operation, OperationError> {
        let schema = self.operation.schema();
        let (mut values, forwarded) = match data {
            StageData::Initial(args) => {
                let (values, keywords) = args.into_parts();
                let keywords: IndexMap<String, Value> =
                    keywords.into_iter().filter(|(name, _)| schema.contains(name)).collect();
                (values, keywords)
            }
            StageData::Output(Value::Array(items)) => (items, IndexMap::new()),
            StageData::Output(other) => (vec![other], IndexMap::new()),
        };
        values.truncate(self.operation.positional_count());
        let keywords = merge_keywords(forwarded, self.options.resolve(pipeline)?);
        self.operation.new_instance(Args::from_parts(values, keywords))
    }
}
