//! Enlace de argumentos y procesamiento de inputs.

use op_core::{Args, InputKind, OperationError, OperationType, Property, PropertyError};
use serde_json::{json, Value};

fn identity_of(name: &'static str) -> impl Fn(&mut op_core::Operation) -> op_core::Step<Value> {
    move |op| Ok(op.get(name).clone())
}

fn signup() -> OperationType {
    OperationType::define("Signup").input("name", InputKind::Positional)
                                   .input("subscribe_to_newsletter", InputKind::Keyword)
                                   .execute(|op| Ok(json!([op.get("name"), op.get("subscribe_to_newsletter")])))
                                   .build()
}

fn adder() -> OperationType {
    OperationType::define("Adder").input("first_operand", InputKind::Positional)
                                  .input("second_operand", InputKind::Positional)
                                  .property(Property::new("operator").required().with_default("+").accepts_values(["+", "*"]))
                                  .execute(|op| {
                                      let (a, b) = (op.get("first_operand").as_i64(), op.get("second_operand").as_i64());
                                      let (Some(a), Some(b)) = (a, b) else {
                                          return Err(OperationError::failure("operands must be integers").into());
                                      };
                                      Ok(json!(if op.get("operator") == "*" { a * b } else { a + b }))
                                  })
                                  .build()
}

#[test]
fn positional_inputs_are_required() {
    let err = signup().new_instance(Args::new()).unwrap_err();
    assert!(matches!(err, OperationError::InvalidArguments(_)));
}

#[test]
fn positional_binds_by_order() {
    let op = signup().new_instance(Args::new().arg("John")).expect("construct");
    assert_eq!(op.get("name"), "John");
    assert_eq!(op.get("subscribe_to_newsletter"), &Value::Null);
}

#[test]
fn keyword_inputs_bind_by_name() {
    let out = signup().call(Args::new().arg("John").kw("subscribe_to_newsletter", true)).expect("call");
    assert_eq!(out, json!(["John", true]));
}

#[test]
fn trailing_map_becomes_keywords() {
    let out = adder().call(Args::new().arg(2).arg(3).arg(json!({"operator": "*"}))).expect("call");
    assert_eq!(out, json!(6));
    assert_eq!(adder().call(Args::new().arg(1).arg(2)).expect("default"), json!(3));
}

#[test]
fn explicit_keywords_win_over_trailing_map() {
    let args = Args::new().arg(2).arg(3).arg(json!({"operator": "*"})).kw("operator", "+");
    assert_eq!(adder().call(args).expect("call"), json!(5));
}

#[test]
fn leftovers_and_unknown_keywords_are_rejected() {
    let extra = adder().new_instance(Args::new().arg(1).arg(2).arg(3)).unwrap_err();
    assert!(matches!(extra, OperationError::InvalidArguments(_)));
    let two_extra = adder().new_instance(Args::new().arg(1).arg(2).arg(json!({})).arg(json!({}))).unwrap_err();
    assert!(matches!(two_extra, OperationError::InvalidArguments(_)));
    let unknown = adder().new_instance(Args::new().arg(1).arg(2).kw("colour", "red")).unwrap_err();
    assert!(matches!(unknown, OperationError::InvalidArguments(_)));
}

#[test]
fn property_violations_surface_at_construction() {
    let rejected = adder().new_instance(Args::new().arg(1).arg(2).kw("operator", "-")).unwrap_err();
    assert!(matches!(rejected, OperationError::Property(PropertyError::Rejected { .. })));
    let missing = signup().new_instance(Args::new().arg(Value::Null)).unwrap_err();
    assert_eq!(missing, OperationError::Property(PropertyError::MissingRequired("name".into())));
}

#[test]
fn map_as_single_positional() {
    let ty = OperationType::define("Hashy").input("some_hash", InputKind::Positional)
                                           .property(Property::new("default_food").with_default("chunky bacon"))
                                           .execute(|op| {
                                               let mut hash = op.get("some_hash").clone();
                                               if hash["food"].is_null() {
                                                   hash["food"] = op.get("default_food").clone();
                                               }
                                               Ok(hash)
                                           })
                                           .build();
    let input = json!({"food": null});
    assert_eq!(ty.call(Args::new().arg(input.clone())).expect("default"), json!({"food": "chunky bacon"}));
    assert_eq!(ty.call(Args::new().arg(input).kw("default_food", "bananas")).expect("kw"), json!({"food": "bananas"}));
}

#[test]
fn setter_goes_through_the_store() {
    let ty = OperationType::define("Setter").input("some_value", InputKind::Positional)
                                            .execute(|op| {
                                                op.set("some_value", "changed")?;
                                                Ok(op.get("some_value").clone())
                                            })
                                            .build();
    assert_eq!(ty.call(Args::new().arg("unchanged")).expect("call"), json!("changed"));
}

#[test]
fn unknown_property_set_fails_the_operation() {
    let ty = OperationType::define("BadSetter").execute(|op| {
                                                   op.set("nope", 1)?;
                                                   Ok(Value::Null)
                                               })
                                               .build();
    let err = ty.call(Args::new()).unwrap_err();
    assert_eq!(err, OperationError::Property(PropertyError::Unknown("nope".into())));
}

#[test]
fn input_with_converts_its_value() {
    let upcase = Property::new("text").converts(|v| Ok(json!(v.as_str().unwrap_or_default().to_uppercase())));
    let ty = OperationType::define("Shouty").input_with(InputKind::Positional, upcase)
                                            .execute(identity_of("text"))
                                            .build();
    assert_eq!(ty.call(Args::new().arg("hello")).expect("call"), json!("HELLO"));
}

#[test]
fn computed_defaults_are_fresh_per_instance() {
    let ty = OperationType::define("Logger").property(Property::new("log").with_default_fn(|| json!([])))
                                            .execute(|op| {
                                                let mut log = op.get("log").clone();
                                                if let Some(items) = log.as_array_mut() {
                                                    items.push(json!("ran"));
                                                }
                                                op.set("log", log.clone())?;
                                                Ok(log)
                                            })
                                            .build();
    assert_eq!(ty.call(Args::new()).expect("first"), json!(["ran"]));
    assert_eq!(ty.call(Args::new()).expect("second"), json!(["ran"]));
}

#[test]
fn inherited_inputs_and_body() {
    let base = OperationType::define("Base").input("text", InputKind::Positional).build();
    let sub = base.extend("Upcase")
                  .execute(|op| Ok(json!(op.get("text").as_str().unwrap_or_default().to_uppercase())))
                  .build();
    let more = sub.extend("WithSuffix").input("suffix", InputKind::Keyword).build();

    assert_eq!(sub.call(Args::new().arg("hi")).expect("sub"), json!("HI"));
    assert_eq!(more.inputs().len(), 2);
    assert_eq!(sub.inputs().len(), 1);
    assert_eq!(base.call(Args::new().arg("hi")), Err(OperationError::NotImplemented("Base".into())));
}

#[test]
fn lifted_function() {
    let square = OperationType::from_fn("Square", &["n"], |values| {
        values[0].as_i64()
                 .map(|n| json!(n * n))
                 .ok_or_else(|| OperationError::failure("not a number"))
    });
    assert_eq!(square.call(Args::new().arg(7)).expect("call"), json!(49));
    let results: Result<Vec<_>, _> = [1, 2, 3].into_iter().map(Value::from).map(square.as_fn()).collect();
    assert_eq!(results.expect("map"), vec![json!(1), json!(4), json!(9)]);
}
