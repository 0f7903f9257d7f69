//! Conform Types - the type registry and member inventory.
//!
//! This crate provides:
//! - `TypeRegistry`: built-in member tables plus declared classes, structs
//!   and contracts, populated through owned builders
//! - `MemberInventory` / `ContractSource`: the query seams the matcher reads
//!   through
//! - Assignability (`is_assignable`, `Variance`) and structural signature
//!   unification (`MethodShape`, `unify_signature`)

mod assign;
mod defs;
mod error;
mod inventory;
mod registry;
mod unify;

pub use assign::Variance;
pub use defs::{
    ContractMember, ConversionDef, MemberTag, MethodDef, OperatorDef, PropertyDef, TypeDef,
    TypeKind, TypeMembers,
};
pub use error::RegistryError;
pub use inventory::{ContractDecl, ContractSource, MemberFilter, MemberInventory};
pub use registry::{parse_builtin, ContractBuilder, TypeBuilder, TypeRegistry};
pub use unify::MethodShape;
