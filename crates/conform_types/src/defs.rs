//! Member and type definitions stored in the registry.
//!
//! Implementation types carry real members (`MethodDef`, `OperatorDef`,
//! `ConversionDef`, `PropertyDef`) with native bodies. Contracts carry
//! `ContractMember`s: raw, tagged requirements with no bodies.

use conform_ir::{
    BinaryOp, ConversionKind, GenericParam, Name, OpSide, TypeIdx, TypeRef, Visibility,
};
use conform_value::NativeFn;

/// What a registered type is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    /// Reference type.
    Class,
    /// Value type; boxed when it flows into `object`.
    Struct,
    /// Abstract capability specification.
    Contract,
}

impl TypeKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Contract => "contract",
        }
    }
}

/// A method on an implementation type.
#[derive(Clone, Debug)]
pub struct MethodDef {
    pub name: Name,
    pub params: Vec<TypeRef>,
    pub ret: TypeRef,
    /// Method-level generic parameters, referenced as `TypeRef::Param(i)`.
    pub generics: Vec<GenericParam>,
    pub is_static: bool,
    pub visibility: Visibility,
    pub body: NativeFn,
}

impl MethodDef {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.is_empty()
    }
}

/// A user-declared binary operator. The body receives `[left, right]`.
#[derive(Clone, Debug)]
pub struct OperatorDef {
    pub op: BinaryOp,
    pub left: TypeRef,
    pub right: TypeRef,
    pub ret: TypeRef,
    pub body: NativeFn,
}

/// A user-declared conversion from `source` to `target`.
///
/// Declared on either end; the body receives the source value as receiver.
#[derive(Clone, Debug)]
pub struct ConversionDef {
    pub kind: ConversionKind,
    pub source: TypeRef,
    pub target: TypeRef,
    pub body: NativeFn,
}

/// A property with an optional getter and setter.
#[derive(Clone, Debug)]
pub struct PropertyDef {
    pub name: Name,
    pub ty: TypeRef,
    pub visibility: Visibility,
    pub getter: Option<NativeFn>,
    pub setter: Option<NativeFn>,
}

/// Members declared on one type.
#[derive(Clone, Debug, Default)]
pub struct TypeMembers {
    pub methods: Vec<MethodDef>,
    pub operators: Vec<OperatorDef>,
    pub conversions: Vec<ConversionDef>,
    pub properties: Vec<PropertyDef>,
}

impl TypeMembers {
    /// Append `other`, keeping declaration order.
    pub fn extend(&mut self, other: TypeMembers) {
        self.methods.extend(other.methods);
        self.operators.extend(other.operators);
        self.conversions.extend(other.conversions);
        self.properties.extend(other.properties);
    }
}

/// How a contract member is to be satisfied.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberTag {
    /// Instance method.
    Method,
    /// Static method; callable on an adapter with no instance.
    Static,
    /// Explicit conversion to the member's return type.
    Cast,
    /// Implicit conversion to the member's return type.
    Implicit,
    /// Binary operator with the receiver on `side`.
    Operator { op: BinaryOp, side: OpSide },
    /// Readable property.
    Getter,
    /// Writable property.
    Setter,
}

/// A raw member of a contract declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractMember {
    pub name: Name,
    pub tag: MemberTag,
    pub params: Vec<TypeRef>,
    pub ret: TypeRef,
    pub generics: Vec<GenericParam>,
}

/// A registered type.
#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: Name,
    pub kind: TypeKind,
    pub visibility: Visibility,
    /// Base class (classes only).
    pub base: Option<TypeIdx>,
    /// Contracts this type nominally implements.
    pub implements: Vec<TypeIdx>,
    pub members: TypeMembers,
    /// Parent contracts (contracts only).
    pub parents: Vec<TypeIdx>,
    /// Requirements (contracts only).
    pub contract_members: Vec<ContractMember>,
}

impl TypeDef {
    pub(crate) fn new(name: Name, kind: TypeKind) -> Self {
        TypeDef {
            name,
            kind,
            visibility: Visibility::Public,
            base: None,
            implements: Vec::new(),
            members: TypeMembers::default(),
            parents: Vec::new(),
            contract_members: Vec::new(),
        }
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    #[inline]
    pub fn is_contract(&self) -> bool {
        self.kind == TypeKind::Contract
    }
}
