//! Assignability between type references.
//!
//! `from` is assignable to `to` when a value of `from` can be stored in a
//! slot of `to` without an explicit conversion:
//! - identity
//! - anything but `void` into `object`
//! - implicit numeric widening
//! - a class into any class on its base chain
//! - a type into any contract it (or a base class) implements, and a
//!   contract into any of its parent contracts

use conform_ir::{Builtin, TypeIdx, TypeRef};
use rustc_hash::FxHashSet;

use crate::registry::TypeRegistry;

/// Direction of a type check.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variance {
    /// Types must be identical.
    Invariant,
    /// The candidate may be more derived than the requirement (results).
    Covariant,
    /// The candidate may be less derived than the requirement (parameters).
    Contravariant,
}

impl TypeRegistry {
    /// Whether a value of `from` can be stored in a slot of `to`.
    pub fn is_assignable(&self, from: TypeRef, to: TypeRef) -> bool {
        if from == to {
            return true;
        }
        match (from, to) {
            (TypeRef::Param(_), _) | (_, TypeRef::Param(_)) => false,
            (TypeRef::Builtin(Builtin::Void), _) | (_, TypeRef::Builtin(Builtin::Void)) => false,
            (_, TypeRef::Builtin(Builtin::Object)) => true,
            (TypeRef::Builtin(a), TypeRef::Builtin(b)) => a.widens_to(b),
            (TypeRef::Named(a), TypeRef::Named(b)) => self.derives_from(a, b),
            _ => false,
        }
    }

    /// Check `candidate` against `required` in the given direction.
    pub fn check_variance(&self, candidate: TypeRef, required: TypeRef, variance: Variance) -> bool {
        match variance {
            Variance::Invariant => candidate == required,
            Variance::Covariant => self.is_assignable(candidate, required),
            Variance::Contravariant => self.is_assignable(required, candidate),
        }
    }

    /// Whether `ty` reaches `ancestor` through base classes, implemented
    /// contracts or parent contracts.
    fn derives_from(&self, ty: TypeIdx, ancestor: TypeIdx) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![ty];
        while let Some(idx) = stack.pop() {
            if idx == ancestor {
                return true;
            }
            if !visited.insert(idx) {
                continue;
            }
            if let Some(def) = self.get(idx) {
                stack.extend(def.base);
                stack.extend(def.implements.iter().copied());
                stack.extend(def.parents.iter().copied());
            }
        }
        false
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
