//! Errors raised by contract resolution.

use conform_types::RegistryError;
use conform_value::EvalError;

use crate::matcher::MatchIssue;

/// Error from matching, converting or declaring contracts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConformError {
    /// The contract or implementation type cannot take part in matching.
    #[error("invalid contract shape: {reason}")]
    InvalidContractShape { reason: String },

    /// The implementation type lacks some of the contract's operations.
    #[error("{type_name} does not satisfy {contract}: {}", join_issues(.issues))]
    ContractUnsatisfied {
        type_name: String,
        contract: String,
        issues: Vec<MatchIssue>,
    },

    /// An adapter without an instance was requested for a contract that
    /// has instance operations.
    #[error("contract {contract} has instance operations; an instance is required")]
    NullInstanceWithoutStaticOnlyContract { contract: String },

    /// The value has no runtime type to match against.
    #[error("`{value}` has no runtime type")]
    NoRuntimeType { value: String },

    /// Neither an explicit nor an implicit conversion exists.
    #[error("no conversion from {from} to {to}")]
    NoConversion { from: String, to: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A forwarded call failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result alias for conform operations.
pub type Result<T, E = ConformError> = std::result::Result<T, E>;

fn join_issues(issues: &[MatchIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cold]
pub(crate) fn invalid_shape(reason: impl Into<String>) -> ConformError {
    ConformError::InvalidContractShape {
        reason: reason.into(),
    }
}
