use super::*;
use conform_ir::SharedInterner;

fn hierarchy() -> (TypeRegistry, TypeIdx, TypeIdx, TypeIdx, TypeIdx) {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let shape = reg.define_contract("Shape", |c| c).expect("contract");
    let named = reg
        .define_contract("NamedShape", |c| c.extends(shape))
        .expect("contract");
    let base = reg
        .define_class("Polygon", |b| b.implements(named))
        .expect("class");
    let square = reg.define_class("Square", |b| b.base(base)).expect("class");
    (reg, shape, named, base, square)
}

#[test]
fn identity_and_object_top() {
    let (reg, _, _, _, square) = hierarchy();
    assert!(reg.is_assignable(TypeRef::Named(square), TypeRef::Named(square)));
    assert!(reg.is_assignable(TypeRef::Named(square), TypeRef::OBJECT));
    assert!(reg.is_assignable(TypeRef::I32, TypeRef::OBJECT));
    assert!(!reg.is_assignable(TypeRef::VOID, TypeRef::OBJECT));
    assert!(!reg.is_assignable(TypeRef::OBJECT, TypeRef::I32));
}

#[test]
fn class_and_contract_inheritance() {
    let (reg, shape, named, base, square) = hierarchy();
    assert!(reg.is_assignable(TypeRef::Named(square), TypeRef::Named(base)));
    assert!(reg.is_assignable(TypeRef::Named(square), TypeRef::Named(named)));
    assert!(reg.is_assignable(TypeRef::Named(square), TypeRef::Named(shape)));
    assert!(reg.is_assignable(TypeRef::Named(named), TypeRef::Named(shape)));
    assert!(!reg.is_assignable(TypeRef::Named(base), TypeRef::Named(square)));
    assert!(!reg.is_assignable(TypeRef::Named(shape), TypeRef::Named(named)));
}

#[test]
fn numeric_widening_is_assignable() {
    let (reg, ..) = hierarchy();
    assert!(reg.is_assignable(TypeRef::I32, TypeRef::Builtin(Builtin::I64)));
    assert!(!reg.is_assignable(TypeRef::Builtin(Builtin::I64), TypeRef::I32));
    assert!(!reg.is_assignable(TypeRef::STR, TypeRef::I32));
}

#[test]
fn generic_params_are_never_assignable() {
    let (reg, ..) = hierarchy();
    assert!(!reg.is_assignable(TypeRef::Param(0), TypeRef::OBJECT));
    assert!(reg.is_assignable(TypeRef::Param(0), TypeRef::Param(0)));
}

#[test]
fn variance_directions() {
    let (reg, _, _, base, square) = hierarchy();
    let (base, square) = (TypeRef::Named(base), TypeRef::Named(square));
    assert!(reg.check_variance(square, base, Variance::Covariant));
    assert!(!reg.check_variance(base, square, Variance::Covariant));
    assert!(reg.check_variance(base, square, Variance::Contravariant));
    assert!(!reg.check_variance(square, base, Variance::Contravariant));
    assert!(!reg.check_variance(square, base, Variance::Invariant));
    assert!(reg.check_variance(base, base, Variance::Invariant));
}
