//! Instancia de operación y su máquina de estados.
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;
use uuid::Uuid;

use super::callbacks::BodyFn;
use super::{Interrupt, OperationState, OperationType, Step};
use crate::errors::OperationError;
use crate::model::{Args, PropertyStore};

static NULL: Value = Value::Null;

/// Una ejecución concreta de un `OperationType`.
///
/// Propiedad de un único dueño; no es `Sync` ni pretende compartirse.
pub struct Operation {
    id: Uuid,
    ty: OperationType,
    properties: PropertyStore,
    state: OperationState,
    output: Option<Value>,
    error: Option<OperationError>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Operation {
    pub(crate) fn new(ty: OperationType, args: Args) -> Result<Self, OperationError> {
        let provided = args.bind(ty.inputs(), ty.schema())?;
        let properties = PropertyStore::populate(ty.schema(), provided)?;
        let op = Self { id: Uuid::new_v4(),
                        ty,
                        properties,
                        state: OperationState::Initialized,
                        output: None,
                        error: None,
                        started_at: None,
                        finished_at: None };
        debug!("{} initialized", op.describe());
        Ok(op)
    }

    /// Ejecuta la cadena completa si todavía no se ejecutó.
    ///
    /// En una instancia terminal no vuelve a correr nada: `Halted`/`Succeeded`
    /// devuelven la misma instancia y `Failed` devuelve de nuevo el error
    /// capturado.
    pub fn run(&mut self) -> Result<&mut Self, OperationError> {
        match self.state {
            OperationState::Initialized => {}
            OperationState::Failed => {
                if let Some(error) = &self.error {
                    return Err(error.clone());
                }
                return Ok(self);
            }
            OperationState::Halted | OperationState::Succeeded => return Ok(self),
        }

        let ty = self.ty.clone();
        let body: BodyFn = match &ty.def.body {
            Some(body) => Rc::clone(body),
            None => {
                let name = ty.name().to_string();
                Rc::new(move |_: &mut Operation| -> Step<Value> { Err(OperationError::NotImplemented(name.clone()).into()) }) as BodyFn
            }
        };

        self.started_at = Some(Utc::now());
        let result = ty.callbacks().run(self, &body);
        self.finished_at = Some(Utc::now());

        if let Err(error) = result {
            self.state = OperationState::Failed;
            self.error = Some(error.clone());
            warn!("{} failed: {error}", self.describe());
            ty.callbacks().notify_error(self, &error);
            return Err(error);
        }

        match self.state {
            OperationState::Halted => ty.callbacks().notify_halted(self),
            OperationState::Succeeded => ty.callbacks().notify_succeeded(self),
            _ => {}
        }
        Ok(self)
    }

    /// Output memorizado; ejecuta la primera vez que se pide.
    pub fn output(&mut self) -> Result<Value, OperationError> {
        self.run()?;
        Ok(self.output.clone().unwrap_or(Value::Null))
    }

    /// Output ya memorizado, sin ejecutar.
    pub fn memoized_output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// Detiene la ejecución con `payload` como output. Usar con `return`:
    /// `return op.halt(json!("why"));`
    pub fn halt<T>(&mut self, payload: impl Into<Value>) -> Step<T> {
        self.complete_with(OperationState::Halted, payload.into())?;
        Err(Interrupt::halted())
    }

    /// Termina con éxito anticipado con `payload` como output.
    pub fn succeed<T>(&mut self, payload: impl Into<Value>) -> Step<T> {
        self.complete_with(OperationState::Succeeded, payload.into())?;
        Err(Interrupt::succeeded())
    }

    /// Única transición a `Halted`/`Succeeded`.
    pub(crate) fn complete_with(&mut self, state: OperationState, payload: Value) -> Result<(), OperationError> {
        if self.state.is_terminal() {
            return Err(OperationError::AlreadyCompleted);
        }
        debug!("{} -> {:?}", self.describe(), state);
        self.state = state;
        self.output = Some(payload);
        Ok(())
    }

    /// Completa como `Succeeded` con `Null` si nadie completó la instancia.
    pub(crate) fn settle(&mut self) -> Result<(), OperationError> {
        if self.state.is_terminal() {
            return Ok(());
        }
        self.complete_with(OperationState::Succeeded, Value::Null)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn operation_type(&self) -> &OperationType {
        &self.ty
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == OperationState::Halted
    }

    pub fn is_succeeded(&self) -> bool {
        self.state == OperationState::Succeeded
    }

    pub fn is_failed(&self) -> bool {
        self.state == OperationState::Failed
    }

    pub fn error(&self) -> Option<&OperationError> {
        self.error.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Valor de una propiedad; `Null` si no está declarada.
    pub fn get(&self, name: &str) -> &Value {
        self.properties.get(name).unwrap_or(&NULL)
    }

    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Asigna una propiedad pasando por las reglas del Property Store.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), OperationError> {
        self.properties.set(self.ty.schema(), name, value.into())?;
        Ok(())
    }

    /// Inputs enlazados: posicionales en orden y keywords por nombre.
    pub fn bound_arguments(&self) -> Args {
        let mut values = Vec::new();
        let mut keywords = IndexMap::new();
        for input in self.ty.inputs() {
            let value = self.get(input.name()).clone();
            if input.is_positional() {
                values.push(value);
            } else {
                keywords.insert(input.name().to_string(), value);
            }
        }
        Args::from_parts(values, keywords)
    }

    pub(crate) fn describe(&self) -> String {
        format!("{}({})", self.ty.name(), self.id)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
         .field("id", &self.id)
         .field("type", &self.ty.name())
         .field("state", &self.state)
         .field("output", &self.output)
         .field("error", &self.error)
         .finish()
    }
}
