use super::*;
use pretty_assertions::assert_eq;

#[test]
fn primitive_runtime_types() {
    assert_eq!(
        Value::I32(5).runtime_type(),
        Some(ImplTy::Builtin(Builtin::I32))
    );
    assert_eq!(
        Value::string("hi").runtime_type(),
        Some(ImplTy::Builtin(Builtin::Str))
    );
    assert_eq!(Value::Null.runtime_type(), None);
    assert_eq!(Value::Void.runtime_type(), None);
}

#[test]
fn object_runtime_type_is_its_declared_type() {
    let ty = TypeIdx::from_raw(7);
    let point = Value::object(ty, [("x", Value::I32(2)), ("y", Value::I32(3))]);
    assert_eq!(point.runtime_type(), Some(ImplTy::Named(ty)));
    assert_eq!(point.type_name(), "object");
}

#[test]
fn objects_compare_by_identity() {
    let ty = TypeIdx::from_raw(0);
    let a = Value::object(ty, [("x", Value::I32(1))]);
    let b = Value::object(ty, [("x", Value::I32(1))]);
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert!(a.same_instance(&a.clone()));
}

#[test]
fn fields_write_through_shared_handles() {
    let obj = Value::object(TypeIdx::from_raw(0), [("n", Value::I32(1))]);
    let alias = obj.clone();
    let handle = obj.as_object().cloned();
    assert!(handle.is_some());
    if let Some(handle) = handle {
        handle.set_field("n", Value::I32(9));
    }
    assert_eq!(
        alias.as_object().and_then(|o| o.get("n")),
        Some(Value::I32(9))
    );
    assert!(alias
        .as_object()
        .is_some_and(|o| o.field("missing").is_err()));
}

#[test]
fn distinct_numeric_variants_are_unequal() {
    assert_ne!(Value::I32(1), Value::I64(1));
    assert_ne!(Value::Char(65), Value::U16(65));
    assert_eq!(Value::char('A'), Value::Char(65));
}

#[test]
fn display_value_is_unquoted() {
    assert_eq!(Value::string("abc").display_value(), "abc");
    assert_eq!(Value::char('z').display_value(), "z");
    assert_eq!(Value::F64(1.5).display_value(), "1.5");
    assert_eq!(Value::string("abc").to_string(), "\"abc\"");
}

#[test]
fn checked_construction_rejects_out_of_range() {
    assert_eq!(
        Value::from_i128_checked(Builtin::U8, 255),
        Some(Value::U8(255))
    );
    assert_eq!(Value::from_i128_checked(Builtin::U8, 256), None);
    assert_eq!(Value::from_i128_checked(Builtin::Str, 1), None);
}

#[test]
fn explicit_cast_wraps_and_truncates() {
    assert_eq!(Value::I32(300).cast_numeric(Builtin::U8), Some(Value::U8(44)));
    assert_eq!(Value::F64(-2.9).cast_numeric(Builtin::I32), Some(Value::I32(-2)));
    assert_eq!(Value::I32(65).cast_numeric(Builtin::Char), Some(Value::Char(65)));
    assert_eq!(Value::Bool(true).cast_numeric(Builtin::I32), None);
}

#[test]
fn widening_is_lossless() {
    assert_eq!(Value::I32(-4).widen(Builtin::I64), Some(Value::I64(-4)));
    assert_eq!(Value::U8(200).widen(Builtin::F64), Some(Value::F64(200.0)));
    assert_eq!(Value::F32(0.5).widen(Builtin::F64), Some(Value::F64(0.5)));
}
