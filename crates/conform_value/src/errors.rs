//! Error types for adapter invocation.
//!
//! `EvalErrorKind` carries typed error categories; the factory functions
//! (e.g. `division_by_zero()`) are the public API and populate both `kind`
//! and `message`.

use crate::value::Value;
use conform_ir::BinaryOp;
use std::fmt;

/// Result of invoking a member, a fallback entry or an adapter operation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        type_name: String,
        op: BinaryOp,
    },
    BinaryTypeMismatch {
        left: String,
        right: String,
    },
    InvalidConversion {
        from: String,
        to: String,
    },
    ParseFailure {
        text: String,
        target: String,
    },

    // Access
    UndefinedOperation {
        operation: String,
        type_name: String,
    },
    UndefinedField {
        field: String,
    },
    NullReceiver {
        operation: String,
    },

    // Call
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    WrongArgType {
        name: String,
        expected: String,
        got: String,
    },

    /// Raised by user-supplied member bodies through `EvalError::new`.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidBinaryOp { type_name, op } => {
                write!(
                    f,
                    "operator `{}` cannot be applied to {type_name}",
                    op.as_symbol()
                )
            }
            Self::BinaryTypeMismatch { left, right } => {
                write!(f, "cannot apply operator to `{left}` and `{right}`")
            }
            Self::InvalidConversion { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
            Self::ParseFailure { text, target } => {
                write!(f, "cannot parse {text:?} as {target}")
            }

            Self::UndefinedOperation {
                operation,
                type_name,
            } => write!(f, "no operation '{operation}' on {type_name}"),
            Self::UndefinedField { field } => write!(f, "no field {field} on object"),
            Self::NullReceiver { operation } => {
                write!(f, "'{operation}' requires an instance, but the adapter has none")
            }

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::WrongArgType {
                name,
                expected,
                got,
            } => write!(f, "{name} expects a {expected} argument, got {got}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Member bodies use this to fail with their own text.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Arithmetic Errors

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Modulo by zero error.
#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

/// Integer overflow error.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Type Errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Invalid operator for a specific type.
#[cold]
pub fn invalid_binary_op_for(type_name: &str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Operand types a binary operator was not declared for.
#[cold]
pub fn binary_type_mismatch(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_conversion(from: &str, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        from: from.to_string(),
        to: to.to_string(),
    })
}

#[cold]
pub fn parse_failure(text: &str, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ParseFailure {
        text: text.to_string(),
        target: target.to_string(),
    })
}

// Access Errors

/// No such operation on an adapter or type.
#[cold]
pub fn no_such_operation(operation: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedOperation {
        operation: operation.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn undefined_field(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
    })
}

/// Instance operation invoked on an adapter built without an instance.
#[cold]
pub fn null_receiver(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NullReceiver {
        operation: operation.to_string(),
    })
}

// Call Errors

/// Wrong argument count for an operation.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Wrong argument type for an operation.
#[cold]
pub fn wrong_arg_type(name: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}
