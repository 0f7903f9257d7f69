//! Coercions applied to values crossing an adapter boundary.

use conform_ir::{Builtin, TypeRef};
use conform_types::MemberInventory;
use conform_value::{invalid_conversion, EvalResult, Value};

/// How a value of one type is turned into a value of another at a call site.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Coercion {
    /// Same type (or a generic position), passed through unchanged.
    Identity,
    /// Value type flowing into `object`.
    Box,
    /// Reference conversion to a base class, implemented contract or `object`.
    Upcast,
    /// Implicit numeric widening.
    Widen { from: Builtin, to: Builtin },
}

impl Coercion {
    /// The coercion taking `from` to `to`, or `None` if `from` is not
    /// assignable to `to`.
    pub fn classify<I>(inventory: &I, from: TypeRef, to: TypeRef) -> Option<Coercion>
    where
        I: MemberInventory + ?Sized,
    {
        if from == to {
            return Some(Coercion::Identity);
        }
        match (from, to) {
            (TypeRef::Param(_), TypeRef::Param(_)) => Some(Coercion::Identity),
            (TypeRef::Builtin(a), TypeRef::Builtin(b)) if a.widens_to(b) => {
                Some(Coercion::Widen { from: a, to: b })
            }
            _ if !inventory.is_assignable(from, to) => None,
            (_, TypeRef::Builtin(Builtin::Object)) if inventory.is_value_type(from) => {
                Some(Coercion::Box)
            }
            _ => Some(Coercion::Upcast),
        }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Coercion::Identity
    }

    /// Apply the coercion to a runtime value.
    ///
    /// Boxing and upcasts keep the value as is: objects are shared handles
    /// and primitives already carry their runtime type.
    pub fn apply(self, value: Value) -> EvalResult {
        match self {
            Coercion::Identity | Coercion::Box | Coercion::Upcast => Ok(value),
            Coercion::Widen { to, .. } => value
                .widen(to)
                .ok_or_else(|| invalid_conversion(value.type_name(), to.name())),
        }
    }
}

/// Whether `value` may be passed where `ty` is expected.
///
/// Primitive slots require the exact primitive; reference slots accept
/// `null`; named slots accept instances whose type is assignable.
pub fn accepts<I>(inventory: &I, ty: TypeRef, value: &Value) -> bool
where
    I: MemberInventory + ?Sized,
{
    match (ty, value) {
        (_, Value::Void) => false,
        (TypeRef::Param(_) | TypeRef::Builtin(Builtin::Object), _) => true,
        (_, Value::Null) => !inventory.is_value_type(ty),
        (TypeRef::Builtin(b), v) => v.builtin() == Some(b),
        (TypeRef::Named(_), Value::Object(obj)) => {
            inventory.is_assignable(TypeRef::Named(obj.type_idx()), ty)
        }
        (TypeRef::Named(_), _) => false,
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
