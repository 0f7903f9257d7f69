//! Conform IR - core vocabulary shared by every conform crate.
//!
//! This crate contains the small, copyable building blocks the rest of the
//! workspace is written in terms of:
//! - `Name` and `StringInterner` for interned member and type names
//! - `BinaryOp`, `OpSide` and `ConversionKind` for operator contracts
//! - `Builtin`, `TypeIdx`, `ImplTy` and `TypeRef` for type references
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: member and type names are `Name(u32)`
//! - **Handles, not pointers**: registered types are `TypeIdx(u32)`
//! - **Plain data**: every type here is `Clone + Eq + Hash + Debug`

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod operators;
mod ty;

pub use interner::{InternError, Name, SharedInterner, StringInterner};
pub use operators::{BinaryOp, ConversionKind, OpSide};
pub use ty::{Builtin, GenericConstraint, GenericParam, ImplTy, TypeIdx, TypeRef, Visibility};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ImplTy, Name, TypeIdx};
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(TypeIdx, 4);
    // Cache keys are built from `ImplTy`, keep it register-sized.
    crate::static_assert_size!(ImplTy, 8);
}
