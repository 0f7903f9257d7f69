use crate::error::ConformError;
use crate::premade::{find_castable_to, find_implicitly_convertible_to};
use crate::provider::ContractProvider;
use conform_ir::{Builtin, SharedInterner, TypeRef};
use conform_types::TypeRegistry;
use conform_value::Value;
use pretty_assertions::assert_eq;

fn provider_with_celsius() -> (ContractProvider, TypeRef) {
    let mut reg = TypeRegistry::with_prelude(SharedInterner::new());
    let celsius = reg
        .define_struct("Celsius", |b| {
            b.field_property("degrees", TypeRef::Builtin(Builtin::F64))
                .explicit_conversion(TypeRef::STR, |recv, _| {
                    let degrees = recv
                        .and_then(Value::as_object)
                        .and_then(|obj| obj.get("degrees"))
                        .unwrap_or(Value::Null);
                    Ok(Value::string(format!("{}C", degrees.display_value())))
                })
                .implicit_conversion(TypeRef::Builtin(Builtin::F64), |recv, _| {
                    Ok(recv
                        .and_then(Value::as_object)
                        .and_then(|obj| obj.get("degrees"))
                        .unwrap_or(Value::Null))
                })
        })
        .expect("struct");
    (ContractProvider::new(reg), TypeRef::Named(celsius))
}

#[test]
fn declared_conversions_are_used() {
    let (provider, celsius) = provider_with_celsius();
    let TypeRef::Named(idx) = celsius else {
        unreachable!("Celsius is a named type");
    };
    let reading = Value::object(idx, [("degrees", Value::F64(21.5))]);

    assert!(provider.can_convert_to(&reading, TypeRef::STR).expect("checked"));
    assert_eq!(
        provider.convert_to(reading.clone(), TypeRef::STR).expect("cast"),
        Value::string("21.5C")
    );
    assert_eq!(
        provider.convert_to(reading, TypeRef::Builtin(Builtin::F64)).expect("implicit"),
        Value::F64(21.5)
    );
}

#[test]
fn primitives_convert_through_the_fallback_table() {
    let (provider, _) = provider_with_celsius();
    assert_eq!(
        provider
            .convert_to(Value::I32(300), TypeRef::Builtin(Builtin::U8))
            .expect("truncating cast"),
        Value::U8(44)
    );
    assert_eq!(
        provider.convert_to(Value::I32(7), TypeRef::Builtin(Builtin::I64)).expect("cast"),
        Value::I64(7)
    );
    assert_eq!(
        provider.convert_to(Value::I32(7), TypeRef::I32).expect("identity"),
        Value::I32(7)
    );
}

#[test]
fn missing_conversions_are_reported() {
    let (provider, celsius) = provider_with_celsius();
    assert!(!provider.can_convert_to(&Value::Bool(true), celsius).expect("checked"));
    let err = provider
        .convert_to(Value::Bool(true), celsius)
        .expect_err("no conversion");
    let ConformError::NoConversion { from, to } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!((from.as_str(), to.as_str()), ("bool", "Celsius"));

    let err = provider
        .convert_to(Value::Null, TypeRef::STR)
        .expect_err("null");
    assert!(matches!(err, ConformError::NoRuntimeType { .. }));
}

#[test]
fn repeated_conversions_reuse_declared_contracts() {
    let (provider, _) = provider_with_celsius();
    let target = TypeRef::Builtin(Builtin::I64);
    assert!(find_castable_to(&provider.registry().read(), target).is_none());

    assert!(provider.can_convert_to(&Value::I32(1), target).expect("checked"));
    let declared = provider.registry().read().len();
    let (explicit, implicit) = {
        let registry = provider.registry().read();
        (
            find_castable_to(&registry, target).expect("declared"),
            find_implicitly_convertible_to(&registry, target).expect("declared"),
        )
    };
    assert_eq!(
        provider.conversion_contracts(target).expect("found"),
        (explicit, implicit)
    );

    assert_eq!(provider.convert_to(Value::I32(2), target).expect("cast"), Value::I64(2));
    assert_eq!(provider.registry().read().len(), declared);
}

#[test]
fn find_ignores_types_that_are_not_contracts() {
    let mut reg = TypeRegistry::with_prelude(SharedInterner::new());
    reg.define_class("CastableTo<str>", |b| b).expect("class");
    assert_eq!(find_castable_to(&reg, TypeRef::STR), None);
}
