use super::*;
use crate::error::ConformError;
use conform_ir::{Builtin, GenericConstraint, SharedInterner};
use conform_types::TypeRegistry;
use pretty_assertions::assert_eq;

fn names(registry: &TypeRegistry, spec: &ContractSpec) -> Vec<String> {
    spec.operations
        .iter()
        .map(|op| registry.lookup_name(op.name).to_string())
        .collect()
}

fn is_invalid(result: Result<ContractSpec>) -> bool {
    matches!(result, Err(ConformError::InvalidContractShape { .. }))
}

#[test]
fn own_members_come_before_parents() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let base = reg
        .define_contract("Base", |c| c.method("a", [], TypeRef::VOID))
        .expect("contract");
    let left = reg
        .define_contract("Left", |c| c.extends(base).method("b", [], TypeRef::VOID))
        .expect("contract");
    let right = reg
        .define_contract("Right", |c| c.extends(base).method("c", [], TypeRef::VOID))
        .expect("contract");
    let diamond = reg
        .define_contract("Diamond", |c| {
            c.extends(left).extends(right).method("d", [], TypeRef::VOID)
        })
        .expect("contract");

    let spec = extract(&reg, diamond).expect("valid contract");
    assert_eq!(spec.name, "Diamond");
    assert_eq!(names(&reg, &spec), ["d", "b", "a", "c"]);
}

#[test]
fn identical_operations_are_kept_once() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let left = reg
        .define_contract("Left", |c| c.method("size", [], TypeRef::I32))
        .expect("contract");
    let right = reg
        .define_contract("Right", |c| {
            c.method("size", [], TypeRef::I32)
                .method("size", [TypeRef::I32], TypeRef::I32)
        })
        .expect("contract");
    let both = reg
        .define_contract("Both", |c| c.extends(left).extends(right))
        .expect("contract");

    let spec = extract(&reg, both).expect("valid contract");
    assert_eq!(spec.len(), 2);
    assert_eq!(spec.operations[1].arity(), 1);
}

#[test]
fn only_public_contracts_are_extracted() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let class = reg.define_class("Point", |b| b).expect("class");
    let hidden = reg
        .define_contract("Hidden", |c| c.private().method("a", [], TypeRef::VOID))
        .expect("contract");
    assert!(is_invalid(extract(&reg, class)));
    assert!(is_invalid(extract(&reg, hidden)));
    assert!(is_invalid(extract(&reg, TypeIdx::from_raw(42))));
}

#[test]
fn operation_shapes_are_validated() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let cast_name = reg.intern("cast");
    let bad_cast = reg
        .define_contract("BadCast", |c| {
            c.member(ContractMember {
                name: cast_name,
                tag: MemberTag::Cast,
                params: vec![TypeRef::I32],
                ret: TypeRef::I32,
                generics: Vec::new(),
            })
        })
        .expect("contract");
    let void_cast = reg
        .define_contract("VoidCast", |c| c.explicit_conversion("cast", TypeRef::VOID))
        .expect("contract");
    let bad_setter = reg
        .define_contract("BadSetter", |c| {
            c.member(ContractMember {
                name: cast_name,
                tag: MemberTag::Setter,
                params: vec![TypeRef::I32],
                ret: TypeRef::I32,
                generics: Vec::new(),
            })
        })
        .expect("contract");
    let void_param = reg
        .define_contract("VoidParam", |c| c.method("f", [TypeRef::VOID], TypeRef::VOID))
        .expect("contract");

    for contract in [bad_cast, void_cast, bad_setter, void_param] {
        assert!(is_invalid(extract(&reg, contract)));
    }
}

#[test]
fn generic_parameters_are_validated() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let conflicting = reg
        .define_contract("Conflicting", |c| {
            let t = c
                .param("T")
                .with_constraint(GenericConstraint::ReferenceType)
                .with_constraint(GenericConstraint::ValueType);
            c.generic_method("f", vec![t], [TypeRef::Param(0)], TypeRef::VOID)
        })
        .expect("contract");
    let dangling = reg
        .define_contract("Dangling", |c| c.method("f", [TypeRef::Param(0)], TypeRef::VOID))
        .expect("contract");
    let fine = reg
        .define_contract("Fine", |c| {
            let t = c.param("T").with_constraint(GenericConstraint::ValueType);
            c.generic_method("f", vec![t], [TypeRef::Param(0)], TypeRef::Param(0))
        })
        .expect("contract");

    assert!(is_invalid(extract(&reg, conflicting)));
    assert!(is_invalid(extract(&reg, dangling)));
    assert_eq!(extract(&reg, fine).expect("valid").len(), 1);
}

#[test]
fn static_only_contracts() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let factory = reg
        .define_contract("Factory", |c| c.static_method("create", [], TypeRef::OBJECT))
        .expect("contract");
    let mixed = reg
        .define_contract("Mixed", |c| {
            c.static_method("create", [], TypeRef::OBJECT)
                .method("name", [], TypeRef::STR)
        })
        .expect("contract");
    let empty = reg.define_contract("Empty", |c| c).expect("contract");

    assert!(extract(&reg, factory).expect("valid").is_static_only());
    assert!(!extract(&reg, mixed).expect("valid").is_static_only());
    let empty = extract(&reg, empty).expect("valid");
    assert!(empty.is_empty());
    assert!(empty.is_static_only());
}

#[test]
fn signatures_read_naturally() {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let contract = reg
        .define_contract("Sig", |c| {
            c.method("add", [TypeRef::I32, TypeRef::STR], TypeRef::I32)
                .operator("plus", BinaryOp::Add, OpSide::ReceiverRight, TypeRef::I32, TypeRef::I32)
                .setter("x", TypeRef::I32)
                .explicit_conversion("cast", TypeRef::Builtin(Builtin::I64))
        })
        .expect("contract");
    let spec = extract(&reg, contract).expect("valid");
    let sigs: Vec<String> = spec.operations.iter().map(|op| op.signature(&reg)).collect();
    assert_eq!(
        sigs,
        [
            "add(i32, str) -> i32",
            "plus: i32 + self -> i32",
            "x(i32)",
            "cast() -> i64"
        ]
    );
}
