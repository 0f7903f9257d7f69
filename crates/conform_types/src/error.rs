//! Registry errors.

use conform_ir::TypeIdx;

/// Error raised while declaring types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type `{name}` is already declared")]
    DuplicateType { name: String },

    #[error("no type is registered at index {}", idx.raw())]
    UnknownType { idx: TypeIdx },

    #[error("type index space exhausted")]
    TooManyTypes,

    #[error("`{name}` is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
