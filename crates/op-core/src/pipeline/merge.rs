//! Fusión de keywords entre stages.
//!
//! Merge "shallow": las claves de `overrides` reemplazan a las de `base`;
//! las claves nuevas se añaden al final conservando el orden.

use indexmap::IndexMap;
use serde_json::Value;

pub fn merge_keywords(base: IndexMap<String, Value>, overrides: IndexMap<String, Value>) -> IndexMap<String, Value> {
    let mut out = base;
    for (k, v) in overrides {
        out.insert(k, v);
    }
    out
}
