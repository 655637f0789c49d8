//! Fusión de keywords entre stages.
//!
//! Semántica shallow: las claves de `overrides` pisan las de `base`.

use indexmap::IndexMap;
use op_core::pipeline::merge::merge_keywords;
use serde_json::{json, Value};

fn map(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn overrides_win_and_order_is_kept() {
    let base = map(&[("x", json!(1)), ("keep", json!("a"))]);
    let overrides = map(&[("x", json!(2)), ("new", json!(true))]);

    let out = merge_keywords(base, overrides);

    // claves existentes se sobreescriben en su posición
    assert_eq!(out["x"], json!(2));
    assert_eq!(out["keep"], json!("a"));
    // claves nuevas van al final
    assert_eq!(out.keys().collect::<Vec<_>>(), vec!["x", "keep", "new"]);
}
