//! Ready-made contracts.
//!
//! Each helper declares its contract on first use and returns the existing
//! declaration afterwards, so the same contract (and the same cache keys)
//! is shared by every caller of one registry.

use conform_ir::{BinaryOp, OpSide, TypeIdx, TypeRef};
use conform_types::{RegistryError, TypeRegistry};

/// `CastableTo<T>`: `cast() -> T` through an explicit conversion.
pub fn castable_to(registry: &mut TypeRegistry, target: TypeRef) -> Result<TypeIdx, RegistryError> {
    let name = castable_to_name(registry, target);
    registry.contract_or_declare(&name, |c| c.explicit_conversion("cast", target))
}

/// `ImplicitlyConvertibleTo<T>`: `convert() -> T` through an implicit
/// conversion.
pub fn implicitly_convertible_to(
    registry: &mut TypeRegistry,
    target: TypeRef,
) -> Result<TypeIdx, RegistryError> {
    let name = implicitly_convertible_to_name(registry, target);
    registry.contract_or_declare(&name, |c| c.implicit_conversion("convert", target))
}

/// The already declared `CastableTo<T>`, without touching the registry.
pub fn find_castable_to(registry: &TypeRegistry, target: TypeRef) -> Option<TypeIdx> {
    declared_contract(registry, &castable_to_name(registry, target))
}

/// The already declared `ImplicitlyConvertibleTo<T>`.
pub fn find_implicitly_convertible_to(
    registry: &TypeRegistry,
    target: TypeRef,
) -> Option<TypeIdx> {
    declared_contract(registry, &implicitly_convertible_to_name(registry, target))
}

fn castable_to_name(registry: &TypeRegistry, target: TypeRef) -> String {
    format!("CastableTo<{}>", registry.display(target))
}

fn implicitly_convertible_to_name(registry: &TypeRegistry, target: TypeRef) -> String {
    format!("ImplicitlyConvertibleTo<{}>", registry.display(target))
}

fn declared_contract(registry: &TypeRegistry, name: &str) -> Option<TypeIdx> {
    let idx = registry.by_name(name)?;
    registry.get(idx).filter(|def| def.is_contract()).map(|_| idx)
}

/// `Addable<TIn, TOut>`: `add(x)` is `self + x` and `add_from_left(x)` is
/// `x + self`.
pub fn addable(
    registry: &mut TypeRegistry,
    input: TypeRef,
    output: TypeRef,
) -> Result<TypeIdx, RegistryError> {
    let name = format!(
        "Addable<{}, {}>",
        registry.display(input),
        registry.display(output)
    );
    registry.contract_or_declare(&name, |c| {
        c.operator("add", BinaryOp::Add, OpSide::ReceiverLeft, input, output)
            .operator("add_from_left", BinaryOp::Add, OpSide::ReceiverRight, input, output)
    })
}

/// `Concatable`: `concat(s)` is `self + s` and `prepend(s)` is `s + self`.
pub fn concatable(registry: &mut TypeRegistry) -> Result<TypeIdx, RegistryError> {
    registry.contract_or_declare("Concatable", |c| {
        c.operator("concat", BinaryOp::Add, OpSide::ReceiverLeft, TypeRef::STR, TypeRef::STR)
            .operator("prepend", BinaryOp::Add, OpSide::ReceiverRight, TypeRef::STR, TypeRef::STR)
    })
}

/// `Parsable`: static `parse(str) -> object`.
pub fn parsable(registry: &mut TypeRegistry) -> Result<TypeIdx, RegistryError> {
    registry.contract_or_declare("Parsable", |c| {
        c.static_method("parse", [TypeRef::STR], TypeRef::OBJECT)
    })
}

/// `Stringable`: `to_string() -> str`.
pub fn stringable(registry: &mut TypeRegistry) -> Result<TypeIdx, RegistryError> {
    registry.contract_or_declare("Stringable", |c| c.method("to_string", [], TypeRef::STR))
}
