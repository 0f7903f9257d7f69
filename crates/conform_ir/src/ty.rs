//! Type references.
//!
//! `Builtin` names the primitive types every registry knows about, `TypeIdx`
//! is a handle to a type registered at runtime, and `TypeRef` is what member
//! signatures are written in (built-in, named, or a method generic parameter).

use crate::Name;

/// Built-in types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Builtin {
    Bool,
    /// UTF-16 code unit, arithmetic like an unsigned 16-bit integer.
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Immutable text.
    Str,
    /// Top type; every non-void type is assignable to it.
    Object,
    /// No value.
    Void,
}

impl Builtin {
    /// Numeric family in fallback-table enumeration order.
    pub const NUMERIC: [Builtin; 11] = [
        Self::Char,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Every built-in.
    pub const ALL: [Builtin; 15] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Str,
        Self::Object,
        Self::Void,
    ];

    /// Display name, used in issues and adapter names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "str",
            Self::Object => "object",
            Self::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool | Self::Str | Self::Object | Self::Void)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Integral types, `char` included.
    pub const fn is_integral(self) -> bool {
        self.is_numeric() && !self.is_float()
    }

    pub const fn is_signed_integral(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Value types are boxed when they flow into `object`.
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::Str | Self::Object | Self::Void)
    }

    pub const fn is_reference_type(self) -> bool {
        matches!(self, Self::Str | Self::Object)
    }

    /// Implicit numeric widening (`self` converts to `to` without loss of
    /// magnitude). Identity is not a widening.
    pub const fn widens_to(self, to: Builtin) -> bool {
        use Builtin::{Char, F32, F64, I16, I32, I64, I8, U16, U32, U64, U8};
        match self {
            I8 => matches!(to, I16 | I32 | I64 | F32 | F64),
            U8 => matches!(to, I16 | U16 | I32 | U32 | I64 | U64 | F32 | F64),
            I16 => matches!(to, I32 | I64 | F32 | F64),
            U16 => matches!(to, I32 | U32 | I64 | U64 | F32 | F64),
            Char => matches!(to, U16 | I32 | U32 | I64 | U64 | F32 | F64),
            I32 => matches!(to, I64 | F32 | F64),
            U32 => matches!(to, I64 | U64 | F32 | F64),
            I64 | U64 => matches!(to, F32 | F64),
            F32 => matches!(to, F64),
            _ => false,
        }
    }

    /// Binary numeric promotion: the type both operands of an arithmetic or
    /// comparison operator are brought to.
    ///
    /// Returns `None` for non-numeric operands and for `u64` paired with a
    /// signed integral type, which has no common type.
    pub const fn promote(left: Builtin, right: Builtin) -> Option<Builtin> {
        use Builtin::{F32, F64, I64, U32, U64};
        if !left.is_numeric() || !right.is_numeric() {
            return None;
        }
        if matches!(left, F64) || matches!(right, F64) {
            return Some(F64);
        }
        if matches!(left, F32) || matches!(right, F32) {
            return Some(F32);
        }
        if matches!(left, U64) || matches!(right, U64) {
            if left.is_signed_integral() || right.is_signed_integral() {
                return None;
            }
            return Some(U64);
        }
        if matches!(left, I64) || matches!(right, I64) {
            return Some(I64);
        }
        if matches!(left, U32) || matches!(right, U32) {
            if left.is_signed_integral() || right.is_signed_integral() {
                return Some(I64);
            }
            return Some(U32);
        }
        Some(Builtin::I32)
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a type registered in a `TypeRegistry`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeIdx(u32);

impl TypeIdx {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeIdx(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A concrete type an adapter can be built for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ImplTy {
    Builtin(Builtin),
    Named(TypeIdx),
}

impl ImplTy {
    #[inline]
    pub const fn as_type_ref(self) -> TypeRef {
        match self {
            Self::Builtin(b) => TypeRef::Builtin(b),
            Self::Named(idx) => TypeRef::Named(idx),
        }
    }

    pub const fn as_builtin(self) -> Option<Builtin> {
        match self {
            Self::Builtin(b) => Some(b),
            Self::Named(_) => None,
        }
    }
}

impl From<Builtin> for ImplTy {
    fn from(b: Builtin) -> Self {
        Self::Builtin(b)
    }
}

impl From<TypeIdx> for ImplTy {
    fn from(idx: TypeIdx) -> Self {
        Self::Named(idx)
    }
}

/// A type as written in a member signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeRef {
    Builtin(Builtin),
    Named(TypeIdx),
    /// Index into the declaring method's generic parameter list.
    Param(u32),
}

impl TypeRef {
    pub const VOID: TypeRef = TypeRef::Builtin(Builtin::Void);
    pub const OBJECT: TypeRef = TypeRef::Builtin(Builtin::Object);
    pub const STR: TypeRef = TypeRef::Builtin(Builtin::Str);
    pub const BOOL: TypeRef = TypeRef::Builtin(Builtin::Bool);
    pub const I32: TypeRef = TypeRef::Builtin(Builtin::I32);

    /// The concrete type, if this is not a generic parameter.
    pub const fn as_impl(self) -> Option<ImplTy> {
        match self {
            Self::Builtin(b) => Some(ImplTy::Builtin(b)),
            Self::Named(idx) => Some(ImplTy::Named(idx)),
            Self::Param(_) => None,
        }
    }

    pub const fn is_void(self) -> bool {
        matches!(self, Self::Builtin(Builtin::Void))
    }

    pub const fn is_param(self) -> bool {
        matches!(self, Self::Param(_))
    }
}

impl From<Builtin> for TypeRef {
    fn from(b: Builtin) -> Self {
        Self::Builtin(b)
    }
}

impl From<TypeIdx> for TypeRef {
    fn from(idx: TypeIdx) -> Self {
        Self::Named(idx)
    }
}

impl From<ImplTy> for TypeRef {
    fn from(ty: ImplTy) -> Self {
        ty.as_type_ref()
    }
}

/// Constraint on a method generic parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum GenericConstraint {
    /// Must be a reference type.
    ReferenceType,
    /// Must be a value type.
    ValueType,
    /// Must be assignable to the bound.
    Bound(TypeRef),
}

/// Generic parameter declared on a method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericParam {
    pub name: Name,
    pub constraints: Vec<GenericConstraint>,
}

impl GenericParam {
    pub fn new(name: Name) -> Self {
        GenericParam {
            name,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: GenericConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// A parameter cannot be both reference- and value-constrained.
    pub fn is_consistent(&self) -> bool {
        !(self.constraints.contains(&GenericConstraint::ReferenceType)
            && self.constraints.contains(&GenericConstraint::ValueType))
    }
}

/// Declared visibility of a registered type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    Public,
    Private,
}
