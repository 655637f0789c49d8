//! Integración: operaciones de stock encadenadas como pipelines.

use op_adapters::{exclaim, halting_gate, pair_generator, string_capitalizer, string_generator, string_multiplier, sum,
                  word_splitter};
use op_core::{Args, OperationState, Pipeline, StageOptions};
use serde_json::json;

#[test]
fn generate_capitalize_repeat() {
    let p = Pipeline::define("Full").then(&string_generator())
                                    .then(&string_capitalizer())
                                    .then_with(&string_multiplier(), StageOptions::new().set("multiplicator", "2").set("separator", "|"))
                                    .build();
    assert_eq!(p.call(Args::new()).expect("call"), json!("CHUNKY BACON|CHUNKY BACON"));
}

#[test]
fn split_then_repeat_the_words() {
    let p = string_capitalizer() >> word_splitter();
    let words = p.call(Args::new().arg("a b")).expect("call");
    assert_eq!(words, json!(["A", "B"]));
    let joined = (p >> exclaim()).call(Args::new().arg("a b")).expect("joined");
    assert_eq!(joined, json!("A!"));
}

#[test]
fn gate_in_the_middle() {
    let p = Pipeline::compose("Gate", &[pair_generator(), halting_gate(), sum()]);
    let op = p.run(Args::new()).expect("run");
    assert_eq!(op.state(), OperationState::Halted);
    assert_eq!(op.memoized_output(), Some(&json!(null)));
}

#[test]
fn pair_feeds_sum() {
    assert_eq!(Pipeline::compose("PairSum", &[pair_generator(), sum()]).call(Args::new()).expect("call"), json!(3));
}
