//! Cadena de callbacks de un tipo de operación.
//!
//! Orden de ejecución (de fuera hacia dentro):
//! 1. todos los `before` en orden de registro (ancestros primero);
//! 2. los `around` anidados: el primero registrado es el más externo;
//! 3. el body, una sola vez, dentro del `around` más interno;
//! 4. todos los `after` en orden de registro.
//!
//! Un halt/succeed antes de que el body termine corta los pasos 1-3 pero los
//! `after` siempre corren. Un error corta todo, incluidos los `after`, y sube
//! directo al manejo de errores de `Operation::run`.
use std::rc::Rc;

use log::trace;
use serde_json::Value;

use super::{Operation, Step};
use crate::errors::OperationError;

/// Continuación que recibe un hook `around`: ejecuta el resto de la cadena.
pub type Next<'a> = dyn FnMut(&mut Operation) -> Step + 'a;

pub(crate) type HookFn = Rc<dyn Fn(&mut Operation) -> Step>;
pub(crate) type AroundFn = Rc<dyn Fn(&mut Operation, &mut Next<'_>) -> Step>;
pub(crate) type ErrorFn = Rc<dyn Fn(&Operation, &OperationError)>;
pub(crate) type NotifyFn = Rc<dyn Fn(&Operation)>;
pub(crate) type BodyFn = Rc<dyn Fn(&mut Operation) -> Step<Value>>;

/// Objeto delegado con métodos homónimos a cada tipo de hook.
///
/// Todos tienen implementación vacía por defecto; `around` por defecto sólo
/// continúa la cadena.
pub trait Callbacks {
    fn before(&self, _op: &mut Operation) -> Step {
        Ok(())
    }

    fn around(&self, op: &mut Operation, next: &mut Next<'_>) -> Step {
        next(op)
    }

    fn after(&self, _op: &mut Operation) -> Step {
        Ok(())
    }

    fn error(&self, _op: &Operation, _error: &OperationError) {}

    fn succeeded(&self, _op: &Operation) {}

    fn halted(&self, _op: &Operation) {}
}

/// Registro ordenado de hooks. Se clona (copia de vectores de `Rc`) al
/// extender un tipo, así que un subtipo nunca comparte almacenamiento mutable
/// con su ancestro.
#[derive(Clone, Default)]
pub struct CallbackChain {
    before: Vec<HookFn>,
    around: Vec<AroundFn>,
    after: Vec<HookFn>,
    error: Vec<ErrorFn>,
    succeeded: Vec<NotifyFn>,
    halted: Vec<NotifyFn>,
}

impl CallbackChain {
    pub(crate) fn push_before(&mut self, hook: HookFn) {
        self.before.push(hook);
    }

    pub(crate) fn push_around(&mut self, hook: AroundFn) {
        self.around.push(hook);
    }

    pub(crate) fn push_after(&mut self, hook: HookFn) {
        self.after.push(hook);
    }

    pub(crate) fn push_error(&mut self, hook: ErrorFn) {
        self.error.push(hook);
    }

    pub(crate) fn push_succeeded(&mut self, hook: NotifyFn) {
        self.succeeded.push(hook);
    }

    pub(crate) fn push_halted(&mut self, hook: NotifyFn) {
        self.halted.push(hook);
    }

    /// Cantidad total de hooks registrados.
    pub fn len(&self) -> usize {
        self.before.len() + self.around.len() + self.after.len() + self.error.len() + self.succeeded.len() + self.halted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ejecuta before/around/body/after. Devuelve `Err` sólo para errores;
    /// halt y succeed se absorben aquí tras correr los `after`.
    pub(crate) fn run(&self, op: &mut Operation, body: &BodyFn) -> Result<(), OperationError> {
        match self.run_before(op).and_then(|()| self.run_around(0, op, body)) {
            Ok(()) => {}
            Err(interrupt) => {
                if let Some(error) = interrupt.into_error() {
                    return Err(error);
                }
            }
        }

        // Ningún around llegó al body y nadie detuvo la ejecución.
        op.settle()?;

        for (index, hook) in self.after.iter().enumerate() {
            trace!("{} after hook #{index}", op.describe());
            if let Err(interrupt) = hook(op) {
                if let Some(error) = interrupt.into_error() {
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn run_before(&self, op: &mut Operation) -> Step {
        for (index, hook) in self.before.iter().enumerate() {
            trace!("{} before hook #{index}", op.describe());
            hook(op)?;
        }
        Ok(())
    }

    fn run_around(&self, index: usize, op: &mut Operation, body: &BodyFn) -> Step {
        match self.around.get(index) {
            Some(hook) => {
                trace!("{} around hook #{index}", op.describe());
                let mut next = |op: &mut Operation| self.run_around(index + 1, op, body);
                hook(op, &mut next)
            }
            None => {
                trace!("{} body", op.describe());
                let value = body(op)?;
                op.complete_with(super::OperationState::Succeeded, value)?;
                Ok(())
            }
        }
    }

    pub(crate) fn notify_error(&self, op: &Operation, error: &OperationError) {
        for hook in &self.error {
            hook(op, error);
        }
    }

    pub(crate) fn notify_succeeded(&self, op: &Operation) {
        for hook in &self.succeeded {
            hook(op);
        }
    }

    pub(crate) fn notify_halted(&self, op: &Operation) {
        for hook in &self.halted {
            hook(op);
        }
    }
}

impl std::fmt::Debug for CallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackChain")
         .field("before", &self.before.len())
         .field("around", &self.around.len())
         .field("after", &self.after.len())
         .field("error", &self.error.len())
         .field("succeeded", &self.succeeded.len())
         .field("halted", &self.halted.len())
         .finish()
    }
}
