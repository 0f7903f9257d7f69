use super::*;
use crate::config::ProviderConfig;
use crate::contract::extract;
use crate::matcher::Matcher;
use crate::provider::shared_registry;
use conform_ir::{BinaryOp, Builtin, SharedInterner, TypeRef};
use conform_types::ContractBuilder;
use conform_value::{receiver_object, EvalErrorKind};
use pretty_assertions::assert_eq;

fn point_registry() -> (TypeRegistry, TypeIdx) {
    let mut reg = TypeRegistry::with_prelude(SharedInterner::new());
    let point = reg
        .define_class("Point", |b| {
            b.field_property("x", TypeRef::I32)
                .field_property("y", TypeRef::I32)
                .method("sum", [], TypeRef::I32, |recv, _| {
                    let obj = receiver_object(recv, "sum")?;
                    let x = obj.field("x")?.as_i128().unwrap_or_default();
                    let y = obj.field("y")?.as_i128().unwrap_or_default();
                    Value::from_i128_checked(Builtin::I32, x + y)
                        .ok_or_else(|| EvalError::new("sum overflow"))
                })
                .method("describe", [TypeRef::I32], TypeRef::STR, |_, _| {
                    Ok(Value::string("int"))
                })
                .method("describe", [TypeRef::STR], TypeRef::STR, |_, _| {
                    Ok(Value::string("text"))
                })
        })
        .expect("class");
    (reg, point)
}

fn synthesize_for(
    mut reg: TypeRegistry,
    impl_ty: ImplTy,
    build: impl FnOnce(ContractBuilder) -> ContractBuilder,
) -> AdapterType {
    let contract = reg.define_contract("Subject", build).expect("contract");
    let spec = extract(&reg, contract).expect("valid contract");
    let result = Matcher::new(&reg, ProviderConfig::default()).run(impl_ty, &spec);
    assert!(result.satisfied, "unexpected issues: {:?}", result.issues);
    let shared = shared_registry(reg);
    let inventory = shared.read();
    AdapterType::synthesize(Arc::new(result), &inventory, Arc::clone(&shared))
}

fn point(x: i32, y: i32, ty: TypeIdx) -> Value {
    Value::object(ty, [("x", Value::I32(x)), ("y", Value::I32(y))])
}

#[test]
fn slots_follow_contract_order() {
    let (reg, idx) = point_registry();
    let ty = synthesize_for(reg, ImplTy::Named(idx), |c| {
        c.method("sum", [], TypeRef::I32).property("x", TypeRef::I32)
    });
    let names: Vec<&str> = ty.slots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["sum", "get_x", "set_x"]);
    assert_eq!(ty.name(), format!("Subject_for_Point#{}", ty.id().raw()));
    assert_eq!(ty.impl_ty(), ImplTy::Named(idx));
    assert!(!ty.is_static_only());
}

#[test]
fn methods_and_properties_forward_to_the_instance() {
    let (reg, idx) = point_registry();
    let ty = synthesize_for(reg, ImplTy::Named(idx), |c| {
        c.method("sum", [], TypeRef::I32).property("x", TypeRef::I32)
    });
    let p = point(2, 3, idx);
    assert_eq!(ty.invoke(Some(&p), "sum", &[]).expect("sum"), Value::I32(5));
    ty.invoke(Some(&p), "set_x", &[Value::I32(10)]).expect("set");
    assert_eq!(ty.invoke(Some(&p), "get_x", &[]).expect("get"), Value::I32(10));
    assert_eq!(ty.invoke(Some(&p), "sum", &[]).expect("sum"), Value::I32(13));
}

#[test]
fn call_errors_are_reported() {
    let (reg, idx) = point_registry();
    let ty = synthesize_for(reg, ImplTy::Named(idx), |c| {
        c.method("describe", [TypeRef::I32], TypeRef::STR)
    });
    let p = point(0, 0, idx);

    let err = ty.invoke(Some(&p), "missing", &[]).expect_err("unknown");
    assert!(matches!(err.kind, EvalErrorKind::UndefinedOperation { .. }));

    let err = ty.invoke(Some(&p), "describe", &[]).expect_err("arity");
    assert!(matches!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            expected: 1,
            got: 0,
            ..
        }
    ));

    let err = ty
        .invoke(Some(&p), "describe", &[Value::string("x")])
        .expect_err("type");
    assert_eq!(
        err.kind,
        EvalErrorKind::WrongArgType {
            name: "describe".to_string(),
            expected: "i32".to_string(),
            got: "str".to_string(),
        }
    );

    let err = ty
        .invoke(None, "describe", &[Value::I32(1)])
        .expect_err("no instance");
    assert!(matches!(err.kind, EvalErrorKind::NullReceiver { .. }));
}

#[test]
fn overloads_dispatch_on_argument_types() {
    let (reg, idx) = point_registry();
    let ty = synthesize_for(reg, ImplTy::Named(idx), |c| {
        c.method("describe", [TypeRef::I32], TypeRef::STR)
            .method("describe", [TypeRef::STR], TypeRef::STR)
    });
    let p = point(0, 0, idx);
    let int = ty.invoke(Some(&p), "describe", &[Value::I32(1)]).expect("int");
    let text = ty
        .invoke(Some(&p), "describe", &[Value::string("a")])
        .expect("text");
    assert_eq!(int, Value::string("int"));
    assert_eq!(text, Value::string("text"));
}

#[test]
fn operator_thunks_place_the_receiver_on_its_side() {
    let reg = TypeRegistry::with_prelude(SharedInterner::new());
    let ty = synthesize_for(reg, ImplTy::Builtin(Builtin::I32), |c| {
        c.operator("sub", BinaryOp::Sub, OpSide::ReceiverLeft, TypeRef::I32, TypeRef::I32)
            .operator("rsub", BinaryOp::Sub, OpSide::ReceiverRight, TypeRef::I32, TypeRef::I32)
    });
    let ten = Value::I32(10);
    assert_eq!(
        ty.invoke(Some(&ten), "sub", &[Value::I32(3)]).expect("sub"),
        Value::I32(7)
    );
    assert_eq!(
        ty.invoke(Some(&ten), "rsub", &[Value::I32(3)]).expect("rsub"),
        Value::I32(-7)
    );
}

#[test]
fn identity_conversion_returns_the_instance() {
    let (reg, idx) = point_registry();
    let ty = synthesize_for(reg, ImplTy::Named(idx), |c| {
        c.implicit_conversion("convert", TypeRef::Named(idx))
    });
    let p = point(1, 1, idx);
    let converted = ty.invoke(Some(&p), "convert", &[]).expect("identity");
    assert!(converted.same_instance(&p));
}

#[test]
fn static_slots_run_without_an_instance() {
    let reg = TypeRegistry::with_prelude(SharedInterner::new());
    let ty = synthesize_for(reg, ImplTy::Builtin(Builtin::I64), |c| {
        c.static_method("parse", [TypeRef::STR], TypeRef::Builtin(Builtin::I64))
    });
    assert!(ty.is_static_only());
    let parsed = ty
        .invoke(None, "parse", &[Value::string(" 42 ")])
        .expect("parse");
    assert_eq!(parsed, Value::I64(42));
}
