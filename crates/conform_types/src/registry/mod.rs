//! Registry of types known to a contract provider.
//!
//! The `TypeRegistry` stores built-in member tables and every declared
//! class, struct and contract, and answers member queries for the matcher.
//!
//! # Design
//!
//! - Types stored in a single `Vec<TypeDef>`, addressed by `TypeIdx`
//! - Name index is a `BTreeMap` for deterministic iteration
//! - Built-in members live in a separate table keyed by `Builtin`
//! - Declaration goes through owned builders; a slot is reserved before the
//!   builder runs so members can refer to their own type

mod builder;
mod prelude;

use std::collections::BTreeMap;

use conform_ir::{Builtin, ImplTy, Name, SharedInterner, TypeIdx, TypeRef};
use conform_value::Value;
use rustc_hash::FxHashMap;

use crate::defs::{TypeDef, TypeKind, TypeMembers};
use crate::error::RegistryError;

pub use builder::{ContractBuilder, TypeBuilder};
pub use prelude::parse_builtin;

/// Registry of built-in member tables and declared types.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    interner: SharedInterner,

    /// All declared types, indexed by `TypeIdx`.
    types: Vec<TypeDef>,

    /// Name -> type index.
    types_by_name: BTreeMap<Name, TypeIdx>,

    /// Members attached to built-in types.
    builtin_members: FxHashMap<Builtin, TypeMembers>,
}

impl TypeRegistry {
    /// Create an empty registry. Built-ins have no members.
    pub fn new(interner: SharedInterner) -> Self {
        TypeRegistry {
            interner,
            types: Vec::new(),
            types_by_name: BTreeMap::new(),
            builtin_members: FxHashMap::default(),
        }
    }

    /// Create a registry whose built-ins carry `to_string` and `parse`.
    pub fn with_prelude(interner: SharedInterner) -> Self {
        let mut registry = Self::new(interner);
        prelude::register(&mut registry);
        registry
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn lookup_name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // === Declaration ===

    /// Declare a class. `build` adds its members.
    pub fn define_class(
        &mut self,
        name: &str,
        build: impl FnOnce(TypeBuilder) -> TypeBuilder,
    ) -> Result<TypeIdx, RegistryError> {
        self.define_type(name, TypeKind::Class, build)
    }

    /// Declare a struct (value type). `build` adds its members.
    pub fn define_struct(
        &mut self,
        name: &str,
        build: impl FnOnce(TypeBuilder) -> TypeBuilder,
    ) -> Result<TypeIdx, RegistryError> {
        self.define_type(name, TypeKind::Struct, build)
    }

    fn define_type(
        &mut self,
        name: &str,
        kind: TypeKind,
        build: impl FnOnce(TypeBuilder) -> TypeBuilder,
    ) -> Result<TypeIdx, RegistryError> {
        let idx = self.reserve(name, kind)?;
        let builder = build(TypeBuilder::new(
            self.interner.clone(),
            ImplTy::Named(idx),
        ));
        self.apply(builder)?;
        tracing::debug!(name, kind = kind.keyword(), idx = idx.raw(), "declared type");
        Ok(idx)
    }

    /// Add members to an already declared class or struct.
    pub fn extend_type(
        &mut self,
        idx: TypeIdx,
        build: impl FnOnce(TypeBuilder) -> TypeBuilder,
    ) -> Result<(), RegistryError> {
        let def = self.get(idx).ok_or(RegistryError::UnknownType { idx })?;
        if def.is_contract() {
            return Err(RegistryError::WrongKind {
                name: self.lookup_name(def.name).to_string(),
                expected: "class or struct",
                found: def.kind.keyword(),
            });
        }
        let builder = build(TypeBuilder::new(
            self.interner.clone(),
            ImplTy::Named(idx),
        ));
        self.apply(builder)
    }

    /// Add members to a built-in type.
    ///
    /// Visibility, base and nominal implementations are ignored for built-ins.
    pub fn extend_builtin(
        &mut self,
        builtin: Builtin,
        build: impl FnOnce(TypeBuilder) -> TypeBuilder,
    ) {
        let builder = build(TypeBuilder::new(
            self.interner.clone(),
            ImplTy::Builtin(builtin),
        ));
        let parts = builder.into_parts();
        self.builtin_members
            .entry(builtin)
            .or_default()
            .extend(parts.members);
    }

    /// Declare a contract. `build` adds its requirements.
    pub fn define_contract(
        &mut self,
        name: &str,
        build: impl FnOnce(ContractBuilder) -> ContractBuilder,
    ) -> Result<TypeIdx, RegistryError> {
        let idx = self.reserve(name, TypeKind::Contract)?;
        let parts = build(ContractBuilder::new(self.interner.clone(), idx)).into_parts();
        if let Some(def) = self.types.get_mut(idx.index()) {
            def.visibility = parts.visibility;
            def.parents = parts.parents;
            def.contract_members = parts.members;
        }
        tracing::debug!(name, idx = idx.raw(), "declared contract");
        Ok(idx)
    }

    /// Look up a contract by name, declaring it with `build` if absent.
    pub fn contract_or_declare(
        &mut self,
        name: &str,
        build: impl FnOnce(ContractBuilder) -> ContractBuilder,
    ) -> Result<TypeIdx, RegistryError> {
        match self.by_name(name) {
            Some(idx) => match self.get(idx) {
                Some(def) if def.is_contract() => Ok(idx),
                Some(def) => Err(RegistryError::WrongKind {
                    name: name.to_string(),
                    expected: TypeKind::Contract.keyword(),
                    found: def.kind.keyword(),
                }),
                None => Err(RegistryError::UnknownType { idx }),
            },
            None => self.define_contract(name, build),
        }
    }

    fn reserve(&mut self, name: &str, kind: TypeKind) -> Result<TypeIdx, RegistryError> {
        let interned = self.intern(name);
        if self.types_by_name.contains_key(&interned) {
            return Err(RegistryError::DuplicateType {
                name: name.to_string(),
            });
        }
        let raw =
            u32::try_from(self.types.len()).map_err(|_| RegistryError::TooManyTypes)?;
        let idx = TypeIdx::from_raw(raw);
        self.types.push(TypeDef::new(interned, kind));
        self.types_by_name.insert(interned, idx);
        Ok(idx)
    }

    fn apply(&mut self, builder: TypeBuilder) -> Result<(), RegistryError> {
        let parts = builder.into_parts();
        match parts.target {
            ImplTy::Builtin(b) => {
                self.builtin_members
                    .entry(b)
                    .or_default()
                    .extend(parts.members);
            }
            ImplTy::Named(idx) => {
                let def = self
                    .types
                    .get_mut(idx.index())
                    .ok_or(RegistryError::UnknownType { idx })?;
                if let Some(visibility) = parts.visibility {
                    def.visibility = visibility;
                }
                if parts.base.is_some() {
                    def.base = parts.base;
                }
                def.implements.extend(parts.implements);
                def.members.extend(parts.members);
            }
        }
        Ok(())
    }

    // === Lookup ===

    /// Get a declared type.
    #[inline]
    pub fn get(&self, idx: TypeIdx) -> Option<&TypeDef> {
        self.types.get(idx.index())
    }

    /// Look up a declared type by name.
    pub fn by_name(&self, name: &str) -> Option<TypeIdx> {
        let name = self.interner.get(name)?;
        self.types_by_name.get(&name).copied()
    }

    /// Members of a built-in or declared type (own members only).
    pub fn members(&self, ty: ImplTy) -> Option<&TypeMembers> {
        match ty {
            ImplTy::Builtin(b) => self.builtin_members.get(&b),
            ImplTy::Named(idx) => self.get(idx).map(|def| &def.members),
        }
    }

    /// The base-class chain starting at `idx` (inclusive).
    pub fn base_chain(&self, idx: TypeIdx) -> impl Iterator<Item = (TypeIdx, &TypeDef)> {
        let mut next = Some(idx);
        let mut steps = 0usize;
        let limit = self.types.len();
        std::iter::from_fn(move || {
            let idx = next?;
            let def = self.get(idx)?;
            steps += 1;
            // A malformed base cycle stops the walk instead of spinning.
            next = if steps > limit { None } else { def.base };
            Some((idx, def))
        })
    }

    /// Number of declared types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate declared types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeIdx, &TypeDef)> {
        self.types.iter().enumerate().filter_map(|(i, def)| {
            u32::try_from(i)
                .ok()
                .map(|raw| (TypeIdx::from_raw(raw), def))
        })
    }

    // === Names ===

    /// Display name of a type reference.
    pub fn display(&self, ty: TypeRef) -> String {
        match ty {
            TypeRef::Builtin(b) => b.name().to_string(),
            TypeRef::Named(idx) => match self.get(idx) {
                Some(def) => self.lookup_name(def.name).to_string(),
                None => format!("<type {}>", idx.raw()),
            },
            TypeRef::Param(i) => format!("T{i}"),
        }
    }

    /// Display name of a runtime value's type.
    pub fn value_type_name(&self, value: &Value) -> String {
        match value.runtime_type() {
            Some(ty) => self.display(ty.as_type_ref()),
            None => value.type_name().to_string(),
        }
    }
}
