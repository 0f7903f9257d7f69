//! Member queries consumed by the matcher.
//!
//! `MemberInventory` answers "what public members does this type have";
//! `ContractSource` hands out raw contract declarations. `TypeRegistry`
//! implements both; tests and embedders may substitute their own.

use bitflags::bitflags;
use conform_ir::{BinaryOp, ConversionKind, ImplTy, Name, TypeIdx, TypeRef, Visibility};
use smallvec::SmallVec;

use crate::defs::{
    ContractMember, ConversionDef, MethodDef, OperatorDef, PropertyDef, TypeKind,
};
use crate::registry::TypeRegistry;
use crate::unify::MethodShape;

bitflags! {
    /// Which bindings a method query returns.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct MemberFilter: u8 {
        const INSTANCE = 1 << 0;
        const STATIC = 1 << 1;
    }
}

impl MemberFilter {
    #[inline]
    pub fn admits(self, method: &MethodDef) -> bool {
        if method.is_static {
            self.contains(MemberFilter::STATIC)
        } else {
            self.contains(MemberFilter::INSTANCE)
        }
    }
}

/// Query interface over the public members of implementation types.
///
/// Instance methods and properties include those inherited from base
/// classes (most derived first). Static methods, operators and conversions
/// are looked up on the type itself only.
pub trait MemberInventory {
    /// Methods filtered by name, arity and binding.
    fn methods(
        &self,
        ty: ImplTy,
        name: Option<Name>,
        arity: Option<usize>,
        filter: MemberFilter,
    ) -> SmallVec<[&MethodDef; 4]>;

    /// Methods named `name` whose signature unifies with `shape`.
    fn generic_methods(
        &self,
        ty: ImplTy,
        name: Name,
        shape: &MethodShape<'_>,
        filter: MemberFilter,
        allow_substitution: bool,
    ) -> SmallVec<[&MethodDef; 4]>;

    /// Declared binary operators, optionally for one symbol.
    fn operators(&self, ty: ImplTy, op: Option<BinaryOp>) -> SmallVec<[&OperatorDef; 4]>;

    /// Declared conversions of `kind` whose source is `ty`.
    fn conversions(&self, ty: ImplTy, kind: ConversionKind) -> SmallVec<[&ConversionDef; 4]>;

    /// Public property named `name`.
    fn property(&self, ty: ImplTy, name: Name) -> Option<&PropertyDef>;

    fn is_public(&self, ty: ImplTy) -> bool;

    /// Whether a value of `from` can be stored in a slot of `to`.
    fn is_assignable(&self, from: TypeRef, to: TypeRef) -> bool;

    /// Whether values of `ty` are value types (boxed into `object`).
    fn is_value_type(&self, ty: TypeRef) -> bool;

    /// Display name for issues and adapter names.
    fn type_name(&self, ty: TypeRef) -> String;

    /// Display string for an interned member name.
    fn member_name(&self, name: Name) -> &str;
}

/// A contract declaration as read from its source.
#[derive(Copy, Clone, Debug)]
pub struct ContractDecl<'a> {
    pub idx: TypeIdx,
    pub name: Name,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub members: &'a [ContractMember],
    pub parents: &'a [TypeIdx],
}

/// Source of raw contract declarations.
pub trait ContractSource {
    /// The declaration at `idx`, whatever its kind; `None` if unknown.
    fn contract(&self, idx: TypeIdx) -> Option<ContractDecl<'_>>;
}

impl TypeRegistry {
    /// Own members, then each base class's members.
    fn member_sources(&self, ty: ImplTy) -> SmallVec<[&crate::defs::TypeMembers; 4]> {
        match ty {
            ImplTy::Builtin(_) => self.members(ty).into_iter().collect(),
            ImplTy::Named(idx) => self.base_chain(idx).map(|(_, def)| &def.members).collect(),
        }
    }
}

impl MemberInventory for TypeRegistry {
    fn methods(
        &self,
        ty: ImplTy,
        name: Option<Name>,
        arity: Option<usize>,
        filter: MemberFilter,
    ) -> SmallVec<[&MethodDef; 4]> {
        let mut found = SmallVec::new();
        for (depth, members) in self.member_sources(ty).into_iter().enumerate() {
            for method in &members.methods {
                // Static members are not inherited.
                if depth > 0 && method.is_static {
                    continue;
                }
                if method.visibility == Visibility::Public
                    && filter.admits(method)
                    && name.is_none_or(|n| n == method.name)
                    && arity.is_none_or(|a| a == method.arity())
                {
                    found.push(method);
                }
            }
        }
        found
    }

    fn generic_methods(
        &self,
        ty: ImplTy,
        name: Name,
        shape: &MethodShape<'_>,
        filter: MemberFilter,
        allow_substitution: bool,
    ) -> SmallVec<[&MethodDef; 4]> {
        self.methods(ty, Some(name), Some(shape.params.len()), filter)
            .into_iter()
            .filter(|m| self.unify_signature(m, shape, allow_substitution))
            .collect()
    }

    fn operators(&self, ty: ImplTy, op: Option<BinaryOp>) -> SmallVec<[&OperatorDef; 4]> {
        self.members(ty)
            .map(|m| {
                m.operators
                    .iter()
                    .filter(|o| op.is_none_or(|op| op == o.op))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn conversions(&self, ty: ImplTy, kind: ConversionKind) -> SmallVec<[&ConversionDef; 4]> {
        let source = ty.as_type_ref();
        self.members(ty)
            .map(|m| {
                m.conversions
                    .iter()
                    .filter(|c| c.kind == kind && c.source == source)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn property(&self, ty: ImplTy, name: Name) -> Option<&PropertyDef> {
        self.member_sources(ty).into_iter().find_map(|members| {
            members
                .properties
                .iter()
                .find(|p| p.name == name && p.visibility == Visibility::Public)
        })
    }

    fn is_public(&self, ty: ImplTy) -> bool {
        match ty {
            ImplTy::Builtin(_) => true,
            ImplTy::Named(idx) => self.get(idx).is_some_and(|def| def.is_public()),
        }
    }

    fn is_assignable(&self, from: TypeRef, to: TypeRef) -> bool {
        TypeRegistry::is_assignable(self, from, to)
    }

    fn is_value_type(&self, ty: TypeRef) -> bool {
        match ty {
            TypeRef::Builtin(b) => b.is_value_type(),
            TypeRef::Named(idx) => self.get(idx).is_some_and(|def| def.kind == TypeKind::Struct),
            TypeRef::Param(_) => false,
        }
    }

    fn type_name(&self, ty: TypeRef) -> String {
        self.display(ty)
    }

    fn member_name(&self, name: Name) -> &str {
        self.lookup_name(name)
    }
}

impl ContractSource for TypeRegistry {
    fn contract(&self, idx: TypeIdx) -> Option<ContractDecl<'_>> {
        self.get(idx).map(|def| ContractDecl {
            idx,
            name: def.name,
            kind: def.kind,
            visibility: def.visibility,
            members: &def.contract_members,
            parents: &def.parents,
        })
    }
}
