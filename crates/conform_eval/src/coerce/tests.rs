use super::*;
use conform_ir::SharedInterner;
use conform_types::TypeRegistry;
use pretty_assertions::assert_eq;

fn setup() -> (TypeRegistry, TypeRef, TypeRef, TypeRef) {
    let mut reg = TypeRegistry::new(SharedInterner::new());
    let shape = reg.define_contract("Shape", |c| c).expect("contract");
    let base = reg.define_class("Base", |b| b).expect("class");
    let circle = reg
        .define_class("Circle", |b| b.base(base).implements(shape))
        .expect("class");
    let money = reg.define_struct("Money", |b| b).expect("struct");
    (
        reg,
        TypeRef::Named(shape),
        TypeRef::Named(circle),
        TypeRef::Named(money),
    )
}

#[test]
fn classify_picks_the_cheapest_coercion() {
    let (reg, shape, circle, money) = setup();
    assert_eq!(Coercion::classify(&reg, circle, circle), Some(Coercion::Identity));
    assert_eq!(Coercion::classify(&reg, circle, shape), Some(Coercion::Upcast));
    assert_eq!(Coercion::classify(&reg, circle, TypeRef::OBJECT), Some(Coercion::Upcast));
    assert_eq!(Coercion::classify(&reg, money, TypeRef::OBJECT), Some(Coercion::Box));
    assert_eq!(Coercion::classify(&reg, TypeRef::I32, TypeRef::OBJECT), Some(Coercion::Box));
    assert_eq!(
        Coercion::classify(&reg, TypeRef::I32, TypeRef::Builtin(Builtin::I64)),
        Some(Coercion::Widen {
            from: Builtin::I32,
            to: Builtin::I64
        })
    );
    assert_eq!(Coercion::classify(&reg, shape, circle), None);
    assert_eq!(Coercion::classify(&reg, TypeRef::Builtin(Builtin::I64), TypeRef::I32), None);
}

#[test]
fn generic_positions_are_identity() {
    let (reg, ..) = setup();
    assert_eq!(
        Coercion::classify(&reg, TypeRef::Param(0), TypeRef::Param(1)),
        Some(Coercion::Identity)
    );
    assert_eq!(Coercion::classify(&reg, TypeRef::Param(0), TypeRef::I32), None);
}

#[test]
fn apply_widens_values() {
    let widen = Coercion::Widen {
        from: Builtin::I32,
        to: Builtin::F64,
    };
    assert_eq!(widen.apply(Value::I32(3)).expect("widen"), Value::F64(3.0));
    assert!(widen.apply(Value::string("3")).is_err());
    assert_eq!(Coercion::Box.apply(Value::I32(3)).expect("box"), Value::I32(3));
}

#[test]
fn accepts_checks_runtime_values() {
    let (reg, shape, circle, money) = setup();
    let TypeRef::Named(circle_idx) = circle else {
        panic!("named type expected");
    };
    let instance = Value::object(circle_idx, [("r", Value::F64(1.0))]);

    assert!(accepts(&reg, TypeRef::I32, &Value::I32(1)));
    assert!(!accepts(&reg, TypeRef::I32, &Value::I64(1)));
    assert!(!accepts(&reg, TypeRef::I32, &Value::Null));
    assert!(accepts(&reg, TypeRef::STR, &Value::Null));
    assert!(accepts(&reg, shape, &instance));
    assert!(accepts(&reg, TypeRef::OBJECT, &instance));
    assert!(!accepts(&reg, money, &Value::Null));
    assert!(!accepts(&reg, money, &instance));
    assert!(!accepts(&reg, TypeRef::OBJECT, &Value::Void));
}
