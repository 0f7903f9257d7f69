//! Structural unification of a required signature with a candidate method.
//!
//! Generic parameters unify only with generic parameters. The pairing must
//! be one-to-one across the whole signature, and paired parameters must have
//! equivalent constraint sets. Concrete parameters match by identity, or by
//! contravariant assignability when substitution is allowed. The candidate's
//! return type must be assignable to the required one.

use conform_ir::{GenericConstraint, GenericParam, TypeRef};
use smallvec::SmallVec;

use crate::assign::Variance;
use crate::defs::MethodDef;
use crate::registry::TypeRegistry;

/// A required method signature.
#[derive(Copy, Clone, Debug)]
pub struct MethodShape<'a> {
    pub params: &'a [TypeRef],
    pub ret: TypeRef,
    pub generics: &'a [GenericParam],
}

/// One-to-one pairing of required generic parameters with candidate ones.
#[derive(Default)]
struct GenericPairing {
    pairs: SmallVec<[(u32, u32); 4]>,
}

impl GenericPairing {
    /// Record `required <-> candidate`. Returns `Some(true)` for a new pair,
    /// `Some(false)` for a pair already recorded, `None` on conflict.
    fn pair(&mut self, required: u32, candidate: u32) -> Option<bool> {
        for &(r, c) in &self.pairs {
            match (r == required, c == candidate) {
                (true, true) => return Some(false),
                (true, false) | (false, true) => return None,
                (false, false) => {}
            }
        }
        self.pairs.push((required, candidate));
        Some(true)
    }
}

struct Unifier<'r, 'a> {
    registry: &'r TypeRegistry,
    required: &'a [GenericParam],
    candidate: &'a [GenericParam],
    allow_substitution: bool,
    pairing: GenericPairing,
}

impl Unifier<'_, '_> {
    fn unify(&mut self, required: TypeRef, candidate: TypeRef, variance: Variance) -> bool {
        match (required, candidate) {
            (TypeRef::Param(r), TypeRef::Param(c)) => self.unify_params(r, c),
            (TypeRef::Param(_), _) | (_, TypeRef::Param(_)) => false,
            _ => {
                let variance = if self.allow_substitution || variance == Variance::Covariant {
                    variance
                } else {
                    Variance::Invariant
                };
                self.registry.check_variance(candidate, required, variance)
            }
        }
    }

    fn unify_params(&mut self, required: u32, candidate: u32) -> bool {
        match self.pairing.pair(required, candidate) {
            None => false,
            Some(false) => true,
            Some(true) => {
                let (required_generics, candidate_generics) = (self.required, self.candidate);
                let (Some(r), Some(c)) = (
                    required_generics.get(required as usize),
                    candidate_generics.get(candidate as usize),
                ) else {
                    return false;
                };
                self.constraints_equivalent(&r.constraints, &c.constraints)
            }
        }
    }

    /// Same size, and every required constraint has a counterpart.
    fn constraints_equivalent(
        &mut self,
        required: &[GenericConstraint],
        candidate: &[GenericConstraint],
    ) -> bool {
        if required.len() != candidate.len() {
            return false;
        }
        required.iter().all(|r| {
            candidate.iter().any(|c| match (r, c) {
                (GenericConstraint::ReferenceType, GenericConstraint::ReferenceType)
                | (GenericConstraint::ValueType, GenericConstraint::ValueType) => true,
                (GenericConstraint::Bound(rb), GenericConstraint::Bound(cb)) => {
                    self.unify(*rb, *cb, Variance::Contravariant)
                }
                _ => false,
            })
        })
    }
}

impl TypeRegistry {
    /// Whether `candidate` can stand in for a method of shape `shape`.
    pub fn unify_signature(
        &self,
        candidate: &MethodDef,
        shape: &MethodShape<'_>,
        allow_substitution: bool,
    ) -> bool {
        if candidate.params.len() != shape.params.len()
            || candidate.generics.len() != shape.generics.len()
        {
            return false;
        }
        let mut unifier = Unifier {
            registry: self,
            required: shape.generics,
            candidate: &candidate.generics,
            allow_substitution,
            pairing: GenericPairing::default(),
        };
        let params_match = shape
            .params
            .iter()
            .zip(&candidate.params)
            .all(|(&r, &c)| unifier.unify(r, c, Variance::Contravariant));
        params_match && unify_return(&mut unifier, shape.ret, candidate.ret)
    }
}

fn unify_return(unifier: &mut Unifier<'_, '_>, required: TypeRef, candidate: TypeRef) -> bool {
    if required.is_void() || candidate.is_void() {
        return required == candidate;
    }
    unifier.unify(required, candidate, Variance::Covariant)
}
