use super::*;
use conform_ir::{ImplTy, SharedInterner};
use conform_types::TypeRegistry;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn registry() -> TypeRegistry {
    TypeRegistry::new(SharedInterner::new())
}

fn b(builtin: Builtin) -> TypeRef {
    TypeRef::Builtin(builtin)
}

#[test]
fn table_is_ordered_conversions_first() {
    let table = fallback_table();
    assert_eq!(
        table[0],
        FallbackEntry::conversion(ConversionKind::Explicit, Builtin::Char, Builtin::I8)
    );
    let first_operator = table
        .iter()
        .position(|e| matches!(e.kind, FallbackKind::Operator(_)))
        .expect("operators present");
    assert!(table[first_operator..]
        .iter()
        .all(|e| matches!(e.kind, FallbackKind::Operator(_))));
    assert_eq!(
        table.last().copied(),
        Some(FallbackEntry::operator(
            BinaryOp::Add,
            TypeRef::OBJECT,
            TypeRef::STR,
            TypeRef::STR
        ))
    );
}

#[test]
fn u64_is_never_paired_with_signed() {
    assert!(!fallback_table().iter().any(|e| {
        let (Some(l), Some(r)) = (
            e.left.as_impl().and_then(ImplTy::as_builtin),
            e.right.and_then(TypeRef::as_impl).and_then(ImplTy::as_builtin),
        ) else {
            return false;
        };
        (l == Builtin::U64 && r.is_signed_integral()) || (r == Builtin::U64 && l.is_signed_integral())
    }));
}

#[test]
fn explicit_conversions_wrap() {
    let entry = find_conversion(ConversionKind::Explicit, b(Builtin::I32), b(Builtin::U8))
        .expect("i32 -> u8 cast");
    assert_eq!(entry.eval(&Value::I32(300), None).expect("cast"), Value::U8(44));
    let entry = find_conversion(ConversionKind::Explicit, b(Builtin::F64), b(Builtin::I32))
        .expect("f64 -> i32 cast");
    assert_eq!(entry.eval(&Value::F64(-2.9), None).expect("cast"), Value::I32(-2));
}

#[test]
fn implicit_conversions_only_widen() {
    assert!(find_conversion(ConversionKind::Implicit, b(Builtin::I32), b(Builtin::I8)).is_none());
    let entry = find_conversion(ConversionKind::Implicit, b(Builtin::I32), b(Builtin::I64))
        .expect("i32 -> i64 widening");
    assert_eq!(entry.eval(&Value::I32(-7), None).expect("widen"), Value::I64(-7));
}

#[test]
fn identity_is_not_a_table_entry() {
    assert!(find_conversion(ConversionKind::Explicit, TypeRef::I32, TypeRef::I32).is_none());
    assert!(find_conversion(ConversionKind::Implicit, TypeRef::I32, TypeRef::I32).is_none());
}

#[test]
fn operators_match_by_assignability() {
    let reg = registry();
    let entry = find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::I32, TypeRef::I32)
        .expect("i32 + i32");
    assert_eq!((entry.left, entry.right), (TypeRef::I32, Some(TypeRef::I32)));

    let entry = find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::I32, b(Builtin::I64))
        .expect("result widens");
    assert_eq!(entry.result, TypeRef::I32);

    let entry = find_operator(&reg, BinaryOp::Mul, b(Builtin::I8), b(Builtin::I8), TypeRef::I32)
        .expect("i8 * i8");
    assert_eq!(entry.left, b(Builtin::I8));

    assert!(
        find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::I32, b(Builtin::I16)).is_none()
    );
}

#[test]
fn bool_and_text_operators() {
    let reg = registry();
    let and = find_operator(&reg, BinaryOp::BitAnd, TypeRef::BOOL, TypeRef::BOOL, TypeRef::BOOL)
        .expect("bool & bool");
    assert_eq!(
        and.eval(&Value::Bool(true), Some(&Value::Bool(false))).expect("and"),
        Value::Bool(false)
    );

    let suffix = find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::STR, TypeRef::STR)
        .expect("i32 + str");
    assert_eq!(suffix.left, TypeRef::OBJECT);
    assert_eq!(
        suffix
            .eval(&Value::I32(5), Some(&Value::string(" apples")))
            .expect("concat"),
        Value::string("5 apples")
    );

    let prefix = find_operator(&reg, BinaryOp::Add, TypeRef::STR, TypeRef::I32, TypeRef::STR)
        .expect("str + i32");
    assert_eq!(prefix.right, Some(TypeRef::OBJECT));

    assert!(
        find_operator(&reg, BinaryOp::Lt, TypeRef::STR, TypeRef::STR, TypeRef::BOOL).is_none()
    );
}

#[test]
fn operator_entry_needs_two_operands() {
    let reg = registry();
    let entry = find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::I32, TypeRef::I32)
        .expect("i32 + i32");
    assert!(entry.eval(&Value::I32(1), None).is_err());
}

proptest! {
    #[test]
    fn five_plus_x(x in any::<i32>()) {
        let reg = registry();
        let entry = find_operator(&reg, BinaryOp::Add, TypeRef::I32, TypeRef::I32, TypeRef::I32)
            .expect("i32 + i32");
        let result = entry.eval(&Value::I32(5), Some(&Value::I32(x)));
        match 5i32.checked_add(x) {
            Some(sum) => prop_assert_eq!(result.ok(), Some(Value::I32(sum))),
            None => prop_assert!(result.is_err()),
        }
    }
}
