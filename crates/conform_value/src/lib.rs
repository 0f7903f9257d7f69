#![allow(
    clippy::result_large_err,
    reason = "EvalError is the adapter call error everywhere; boxing it buys nothing"
)]
//! Conform Value - runtime values flowing through adapters.
//!
//! This crate provides:
//! - `Value`, the runtime value an adapter forwards, coerces and returns
//! - `ObjectRef`, a shared handle to an instance of a registered type
//! - `EvalError` / `EvalResult`, the error produced by adapter calls
//! - `NativeFn`, the callable body behind every declared member
//!
//! # Value Types
//!
//! Heap allocations go through `Value::` factory methods; `Heap<T>` has a
//! crate-private constructor so values cannot be built around foreign `Arc`s.

mod errors;
mod native;
mod value;

pub use errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op_for,
    invalid_conversion, modulo_by_zero, no_such_operation, null_receiver, parse_failure,
    type_mismatch, undefined_field, wrong_arg_count, wrong_arg_type, EvalError, EvalErrorKind,
    EvalResult,
};
pub use native::{receiver_object, NativeFn};
pub use value::{Heap, ObjectRef, Value};
