//! Tipos de operación (blueprints) y su builder.
//!
//! Un `OperationType` es inmutable una vez construido y barato de clonar
//! (`Rc`). Extender un tipo copia sus listas (inputs, propiedades, hooks,
//! stages) en un builder nuevo; añadir cosas al subtipo nunca toca al ancestro.
use std::fmt;
use std::rc::Rc;

use serde_json::{json, Value};

use super::callbacks::{AroundFn, BodyFn, CallbackChain, Callbacks, ErrorFn, HookFn, Next, NotifyFn};
use super::{Operation, Step};
use crate::constants::ENGINE_VERSION;
use crate::errors::OperationError;
use crate::hashing::hash_value;
use crate::model::{Args, Input, InputKind, Property, Schema};
use crate::pipeline::Stage;

pub(crate) struct OperationDef {
    pub(crate) name: String,
    pub(crate) inputs: Vec<Input>,
    pub(crate) schema: Schema,
    pub(crate) callbacks: CallbackChain,
    pub(crate) body: Option<BodyFn>,
    /// `Some` para pipelines (el body se genera a partir de la lista).
    pub(crate) stages: Option<Vec<Stage>>,
    pub(crate) definition_hash: String,
}

/// Blueprint de una operación.
#[derive(Clone)]
pub struct OperationType {
    pub(crate) def: Rc<OperationDef>,
}

impl OperationType {
    /// Comienza la definición de un tipo nuevo.
    pub fn define(name: impl Into<String>) -> OperationBuilder {
        OperationBuilder::new(name)
    }

    /// Comienza la definición de un subtipo: hereda inputs, propiedades,
    /// hooks y body (redefinible) del tipo actual.
    pub fn extend(&self, name: impl Into<String>) -> OperationBuilder {
        OperationBuilder { name: name.into(),
                           inputs: self.def.inputs.clone(),
                           schema: self.def.schema.clone(),
                           callbacks: self.def.callbacks.clone(),
                           body: self.def.body.clone(),
                           stages: self.def.stages.clone() }
    }

    /// Eleva una función a un tipo de un solo uso cuyos inputs posicionales
    /// son `params`, en orden.
    pub fn from_fn<F>(name: impl Into<String>, params: &[&str], f: F) -> OperationType
        where F: Fn(&[Value]) -> Result<Value, OperationError> + 'static
    {
        let names: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        let mut builder = OperationType::define(name);
        for param in &names {
            builder = builder.input(param.as_str(), InputKind::Positional);
        }
        builder.execute(move |op| {
                   let values: Vec<Value> = names.iter().map(|n| op.get(n).clone()).collect();
                   Ok(f(&values)?)
               })
               .build()
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn inputs(&self) -> &[Input] {
        &self.def.inputs
    }

    pub fn positional_count(&self) -> usize {
        self.def.inputs.iter().filter(|i| i.is_positional()).count()
    }

    pub fn schema(&self) -> &Schema {
        &self.def.schema
    }

    pub fn callbacks(&self) -> &CallbackChain {
        &self.def.callbacks
    }

    /// Stages de un pipeline; vacío para operaciones simples.
    pub fn stages(&self) -> &[Stage] {
        self.def.stages.as_deref().unwrap_or(&[])
    }

    pub fn is_pipeline(&self) -> bool {
        self.def.stages.is_some()
    }

    pub fn definition_hash(&self) -> &str {
        &self.def.definition_hash
    }

    /// Dos handles apuntan al mismo blueprint.
    pub fn same_as(&self, other: &OperationType) -> bool {
        Rc::ptr_eq(&self.def, &other.def)
    }

    /// Construye una instancia enlazando los argumentos. Ningún hook corre aquí.
    pub fn new_instance(&self, args: Args) -> Result<Operation, OperationError> {
        Operation::new(self.clone(), args)
    }

    /// Construye y ejecuta; devuelve la instancia.
    pub fn run(&self, args: Args) -> Result<Operation, OperationError> {
        let mut op = self.new_instance(args)?;
        op.run()?;
        Ok(op)
    }

    /// Construye y ejecuta; devuelve el output.
    pub fn call(&self, args: Args) -> Result<Value, OperationError> {
        self.new_instance(args)?.output()
    }

    /// Closure que llama al tipo con un único argumento posicional; pensado
    /// para `iter.map(op.as_fn())`.
    pub fn as_fn(&self) -> impl Fn(Value) -> Result<Value, OperationError> {
        let ty = self.clone();
        move |value| ty.call(Args::new().arg(value))
    }
}

impl fmt::Debug for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationType")
         .field("name", &self.def.name)
         .field("inputs", &self.def.inputs)
         .field("stages", &self.stages().len())
         .field("definition_hash", &self.def.definition_hash)
         .finish()
    }
}

/// Builder de `OperationType`. Los hooks sólo pueden registrarse aquí, en
/// tiempo de definición.
pub struct OperationBuilder {
    name: String,
    inputs: Vec<Input>,
    schema: Schema,
    callbacks: CallbackChain,
    body: Option<BodyFn>,
    stages: Option<Vec<Stage>>,
}

impl OperationBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               inputs: Vec::new(),
               schema: Schema::default(),
               callbacks: CallbackChain::default(),
               body: None,
               stages: None }
    }

    /// Builder vacío con body de pipeline.
    pub(crate) fn pipeline(name: impl Into<String>) -> Self {
        Self::new(name).into_pipeline()
    }

    /// Sustituye el body por el motor de stages. Conserva los stages ya
    /// heredados (extensión de un pipeline).
    pub(crate) fn into_pipeline(mut self) -> Self {
        let body: BodyFn = Rc::new(crate::pipeline::execute_stages);
        self.body = Some(body);
        self.stages.get_or_insert_with(Vec::new);
        self
    }

    pub(crate) fn stages_mut(&mut self) -> &mut Vec<Stage> {
        self.stages.get_or_insert_with(Vec::new)
    }

    /// Declara un input con una propiedad sin reglas.
    pub fn input(self, name: &str, kind: InputKind) -> Self {
        self.input_with(kind, Property::new(name))
    }

    /// Declara un input enlazado a `property`. Los inputs posicionales son
    /// siempre obligatorios.
    pub fn input_with(mut self, kind: InputKind, property: Property) -> Self {
        let property = match kind {
            InputKind::Positional => property.required(),
            InputKind::Keyword => property,
        };
        let input = Input::new(property.name(), kind);
        match self.inputs.iter_mut().find(|i| i.name() == input.name()) {
            Some(existing) => *existing = input,
            None => self.inputs.push(input),
        }
        self.schema.define(property);
        self
    }

    /// Declara una propiedad que no es input (sólo keyword opcional u
    /// estado interno de la instancia).
    pub fn property(mut self, property: Property) -> Self {
        self.schema.define(property);
        self
    }

    /// Body de la operación. Devolver `Ok(value)` completa la instancia como
    /// `Succeeded` con ese output.
    pub fn execute<F>(mut self, body: F) -> Self
        where F: Fn(&mut Operation) -> Step<Value> + 'static
    {
        self.body = Some(Rc::new(body) as BodyFn);
        self
    }

    pub fn before<F>(mut self, hook: F) -> Self
        where F: Fn(&mut Operation) -> Step + 'static
    {
        self.callbacks.push_before(Rc::new(hook) as HookFn);
        self
    }

    pub fn around<F>(mut self, hook: F) -> Self
        where F: Fn(&mut Operation, &mut Next<'_>) -> Step + 'static
    {
        self.callbacks.push_around(Rc::new(hook) as AroundFn);
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
        where F: Fn(&mut Operation) -> Step + 'static
    {
        self.callbacks.push_after(Rc::new(hook) as HookFn);
        self
    }

    pub fn error<F>(mut self, hook: F) -> Self
        where F: Fn(&Operation, &OperationError) + 'static
    {
        self.callbacks.push_error(Rc::new(hook) as ErrorFn);
        self
    }

    pub fn succeeded<F>(mut self, hook: F) -> Self
        where F: Fn(&Operation) + 'static
    {
        self.callbacks.push_succeeded(Rc::new(hook) as NotifyFn);
        self
    }

    pub fn halted<F>(mut self, hook: F) -> Self
        where F: Fn(&Operation) + 'static
    {
        self.callbacks.push_halted(Rc::new(hook) as NotifyFn);
        self
    }

    pub fn before_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.before(move |op| delegate.before(op))
    }

    pub fn around_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.around(move |op, next| delegate.around(op, next))
    }

    pub fn after_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.after(move |op| delegate.after(op))
    }

    pub fn error_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.error(move |op, error| delegate.error(op, error))
    }

    pub fn succeeded_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.succeeded(move |op| delegate.succeeded(op))
    }

    pub fn halted_delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.halted(move |op| delegate.halted(op))
    }

    /// Registra `delegate` para los seis tipos de hook.
    pub fn delegate<D: Callbacks + 'static>(self, delegate: Rc<D>) -> Self {
        self.before_delegate(Rc::clone(&delegate))
            .around_delegate(Rc::clone(&delegate))
            .after_delegate(Rc::clone(&delegate))
            .error_delegate(Rc::clone(&delegate))
            .succeeded_delegate(Rc::clone(&delegate))
            .halted_delegate(delegate)
    }

    pub fn build(self) -> OperationType {
        let definition_hash = definition_hash(&self.name, &self.inputs, self.stages.as_deref());
        OperationType { def: Rc::new(OperationDef { name: self.name,
                                                    inputs: self.inputs,
                                                    schema: self.schema,
                                                    callbacks: self.callbacks,
                                                    body: self.body,
                                                    stages: self.stages,
                                                    definition_hash }) }
    }
}

/// Hash determinista de la forma de un tipo: nombre, inputs y, para
/// pipelines, los hashes de cada stage junto con los nombres de sus opciones.
fn definition_hash(name: &str, inputs: &[Input], stages: Option<&[Stage]>) -> String {
    let inputs: Vec<Value> = inputs.iter().map(|i| json!([i.name(), i.kind()])).collect();
    let stages: Option<Vec<Value>> = stages.map(|stages| {
                                               stages.iter()
                                                     .map(|s| json!({
                                                         "operation": s.operation().definition_hash(),
                                                         "options": s.options().names().collect::<Vec<_>>(),
                                                     }))
                                                     .collect()
                                           });
    hash_value(&json!({
        "engine_version": ENGINE_VERSION,
        "name": name,
        "inputs": inputs,
        "stages": stages,
    }))
}
