//! Argumentos de construcción y su enlace contra los inputs declarados.
//!
//! Un `Args` es una lista plana de valores más un mapa explícito de keywords.
//! El enlace toma tantos valores iniciales como inputs posicionales haya; un
//! único valor sobrante de tipo objeto se interpreta como mapa de keywords.
//! Cualquier otro sobrante es `InvalidArguments`.
use indexmap::IndexMap;
use serde_json::Value;

use super::{Input, Schema};
use crate::errors::OperationError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
    keywords: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, V>(values: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        Self { values: values.into_iter().map(Into::into).collect(),
               keywords: IndexMap::new() }
    }

    pub fn from_parts(values: Vec<Value>, keywords: IndexMap<String, Value>) -> Self {
        Self { values, keywords }
    }

    /// Añade un argumento posicional.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Añade (o reemplaza) un keyword.
    pub fn kw(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn keywords(&self) -> &IndexMap<String, Value> {
        &self.keywords
    }

    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.values, self.keywords)
    }

    /// Enlaza los argumentos contra `inputs` y devuelve los valores por nombre
    /// listos para `PropertyStore::populate`.
    pub fn bind(self, inputs: &[Input], schema: &Schema) -> Result<IndexMap<String, Value>, OperationError> {
        let (mut values, mut keywords) = self.into_parts();
        let positional: Vec<&Input> = inputs.iter().filter(|i| i.is_positional()).collect();

        if values.len() < positional.len() {
            let missing: Vec<&str> = positional[values.len()..].iter().map(|i| i.name()).collect();
            return Err(OperationError::InvalidArguments(format!("expected {} positional argument(s), got {} (missing: {})",
                                                                positional.len(),
                                                                values.len(),
                                                                missing.join(", "))));
        }

        let rest = values.split_off(positional.len());
        match <[Value; 1]>::try_from(rest) {
            Ok([Value::Object(map)]) => {
                // Keywords explícitos tienen prioridad sobre el mapa final.
                for (name, value) in map {
                    keywords.entry(name).or_insert(value);
                }
            }
            Ok([other]) => {
                return Err(OperationError::InvalidArguments(format!("unexpected trailing positional argument {other}")));
            }
            Err(rest) if rest.is_empty() => {}
            Err(rest) => {
                return Err(OperationError::InvalidArguments(format!("{} unconsumed positional arguments", rest.len())));
            }
        }

        let mut bound = IndexMap::with_capacity(positional.len() + keywords.len());
        for (input, value) in positional.iter().zip(values) {
            bound.insert(input.name().to_string(), value);
        }
        for (name, value) in keywords {
            if !schema.contains(&name) {
                return Err(OperationError::InvalidArguments(format!("unknown keyword `{name}`")));
            }
            if bound.contains_key(&name) {
                return Err(OperationError::InvalidArguments(format!("`{name}` given both positionally and as keyword")));
            }
            bound.insert(name, value);
        }
        Ok(bound)
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Property;
    use serde_json::json;

    fn fixture() -> (Vec<Input>, Schema) {
        let inputs = vec![Input::positional("some_hash"), Input::keyword("default_food")];
        let mut schema = Schema::default();
        schema.define(Property::new("some_hash").required());
        schema.define(Property::new("default_food"));
        (inputs, schema)
    }

    #[test]
    fn trailing_object_becomes_keywords() {
        let (inputs, schema) = fixture();
        let args = Args::new().arg(json!({"food": null})).arg(json!({"default_food": "bananas"}));
        let bound = args.bind(&inputs, &schema).expect("bind");
        assert_eq!(bound["some_hash"], json!({"food": null}));
        assert_eq!(bound["default_food"], json!("bananas"));
    }

    #[test]
    fn object_is_positional_when_a_slot_is_free() {
        let (inputs, schema) = fixture();
        let bound = Args::new().arg(json!({"food": "x"})).bind(&inputs, &schema).expect("bind");
        assert_eq!(bound.len(), 1);
        assert_eq!(bound["some_hash"], json!({"food": "x"}));
    }

    #[test]
    fn arity_errors() {
        let (inputs, schema) = fixture();
        assert!(matches!(Args::new().bind(&inputs, &schema), Err(OperationError::InvalidArguments(_))));
        let too_many = Args::from_values([json!(1), json!(2), json!(3)]);
        assert!(matches!(too_many.bind(&inputs, &schema), Err(OperationError::InvalidArguments(_))));
        let scalar_tail = Args::from_values([json!(1), json!(2)]);
        assert!(matches!(scalar_tail.bind(&inputs, &schema), Err(OperationError::InvalidArguments(_))));
    }

    #[test]
    fn explicit_keywords_win_over_trailing_map() {
        let (inputs, schema) = fixture();
        let args = Args::new().arg(1).arg(json!({"default_food": "a"})).kw("default_food", "b");
        let bound = args.bind(&inputs, &schema).expect("bind");
        assert_eq!(bound["default_food"], json!("b"));
    }
}
