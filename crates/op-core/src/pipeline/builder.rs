//! Builder de pipelines y composición por concatenación.
use std::ops::Shr;
use std::rc::Rc;

use serde_json::Value;

use super::stage::{Stage, StageOptions};
use crate::errors::OperationError;
use crate::model::{InputKind, Property};
use crate::operation::{Callbacks, Next, Operation, OperationBuilder, OperationType, Step};

/// Punto de entrada para definir pipelines.
pub struct Pipeline;

impl Pipeline {
    /// Pipeline vacío; los stages se añaden con `then*`.
    pub fn define(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder { inner: OperationBuilder::pipeline(name) }
    }

    /// Subtipo de `base`: copia sus stages (si es pipeline), inputs y hooks;
    /// los stages nuevos se añaden al final de la copia.
    pub fn extend(base: &OperationType, name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder { inner: base.extend(name).into_pipeline() }
    }

    /// Pipeline con una lista explícita de stages, sin opciones.
    pub fn compose(name: impl Into<String>, types: &[OperationType]) -> OperationType {
        types.iter().fold(Self::define(name), |p, ty| p.then(ty)).build()
    }

    /// Pipeline cuyo contenido lo arma `body` sobre el builder.
    pub fn compose_with<F>(name: impl Into<String>, body: F) -> OperationType
        where F: FnOnce(PipelineBuilder) -> PipelineBuilder
    {
        body(Self::define(name)).build()
    }
}

/// Builder de pipeline. Envuelve un `OperationBuilder` cuyo body es el
/// motor de stages.
pub struct PipelineBuilder {
    inner: OperationBuilder,
}

impl PipelineBuilder {
    pub fn then(self, operation: &OperationType) -> Self {
        self.then_with(operation, StageOptions::new())
    }

    pub fn then_with(self, operation: &OperationType, options: StageOptions) -> Self {
        self.push_stage(Stage::new(operation.clone(), options))
    }

    /// Añade una función elevada a operación de un solo uso.
    pub fn then_fn<F>(self, name: impl Into<String>, params: &[&str], f: F) -> Self
        where F: Fn(&[Value]) -> Result<Value, OperationError> + 'static
    {
        let ty = OperationType::from_fn(name, params, f);
        self.then(&ty)
    }

    /// El primer stage de una lista vacía le da sus inputs al pipeline.
    pub fn push_stage(mut self, stage: Stage) -> Self {
        if self.inner.stages_mut().is_empty() {
            for input in stage.operation().inputs() {
                self.inner = self.inner.input(input.name(), input.kind());
            }
        }
        self.inner.stages_mut().push(stage);
        self
    }

    pub fn input(self, name: &str, kind: InputKind) -> Self {
        Self { inner: self.inner.input(name, kind) }
    }

    pub fn input_with(self, kind: InputKind, property: Property) -> Self {
        Self { inner: self.inner.input_with(kind, property) }
    }

    pub fn property(self, property: Property) -> Self {
        Self { inner: self.inner.property(property) }
    }

    pub fn before<F>(self, hook: F) -> Self
        where F: Fn(&mut Operation) -> Step + 'static
    {
        Self { inner: self.inner.before(hook) }
    }

    pub fn around<F>(self, hook: F) -> Self
        where F: Fn(&mut Operation, &mut Next<'_>) -> Step + 'static
    {
        Self { inner: self.inner.around(hook) }
    }

    pub fn after<F>(self, hook: F) -> Self
        where F: Fn(&mut Operation) -> Step + 'static
    {
        Self { inner: self.inner.after(hook) }
    }

    pub fn error<F>(self, hook: F) -> Self
        where F: Fn(&Operation, &OperationError) + 'static
    {
        Self { inner: self.inner.error(hook) }
    }

    pub fn succeeded<F>(self, hook: F) -> Self
        where F: Fn(&Operation) + 'static
    {
        Self { inner: self.inner.succeeded(hook) }
    }

    pub fn halted<F>(self, hook: F) -> Self
        where F: Fn(&Operation) + 'static
    {
        Self { inner: self.inner.halted(hook) }
    }

    pub fn delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        Self { inner: self.inner.delegate(delegate) }
    }

    pub fn build(self) -> OperationType {
        self.inner.build()
    }
}

impl OperationType {
    /// Un pipeline "desnudo" (sin hooks, sin propiedades más allá de sus
    /// inputs e inputs idénticos a los de su primer stage) puede aplanarse:
    /// sus stages hacen exactamente lo mismo fuera de él.
    fn flattens(&self) -> bool {
        let derived = self.stages().first().map_or(&[][..], |s| s.operation().inputs());
        self.is_pipeline()
        && self.callbacks().is_empty()
        && self.schema().len() == self.inputs().len()
        && self.inputs() == derived
    }

    /// Stages con los que este tipo participa en una concatenación: los suyos
    /// si es un pipeline aplanable, él mismo como un único stage si no.
    pub fn as_stages(&self) -> Vec<Stage> {
        if self.flattens() {
            self.stages().to_vec()
        } else {
            vec![Stage::new(self.clone(), StageOptions::new())]
        }
    }

    /// Pipeline nuevo con los stages de `self` seguidos de los de `other`.
    /// Ninguno de los dos se modifica.
    ///
    /// Si `self` entra como stage anidado, sus propiedades que no son inputs
    /// pasan a ser keywords del resultado y se reenvían tal cual, de modo que
    /// siguen siendo configurables.
    pub fn pipe(&self, other: &OperationType) -> OperationType {
        let name = format!("{} >> {}", self.name(), other.name());
        let mut builder = self.as_stages()
                              .into_iter()
                              .chain(other.as_stages())
                              .fold(Pipeline::define(name), PipelineBuilder::push_stage);
        if !self.flattens() {
            let extra: Vec<&str> = self.schema()
                                       .names()
                                       .filter(|n| self.inputs().iter().all(|i| i.name() != *n))
                                       .collect();
            for property in extra {
                builder = builder.input(property, InputKind::Keyword);
            }
        }
        builder.build()
    }
}

impl Shr for OperationType {
    type Output = OperationType;

    fn shr(self, rhs: OperationType) -> OperationType {
        self.pipe(&rhs)
    }
}

impl Shr<&OperationType> for OperationType {
    type Output = OperationType;

    fn shr(self, rhs: &OperationType) -> OperationType {
        self.pipe(rhs)
    }
}

impl Shr<&OperationType> for &OperationType {
    type Output = OperationType;

    fn shr(self, rhs: &OperationType) -> OperationType {
        self.pipe(rhs)
    }
}
