#![allow(
    clippy::result_large_err,
    reason = "EvalError is the adapter call error everywhere; boxing it buys nothing"
)]
//! Conform Eval - what adapters run besides user member bodies.
//!
//! This crate provides:
//! - `Coercion`: identity, boxing, upcasts and numeric widening applied to
//!   arguments and results crossing an adapter
//! - the primitive fallback table: built-in conversions and binary operators
//!   that have no declared member on the primitive types
//! - `evaluate_binary`: wrapping arithmetic, comparison and text operators
//!   over primitive values

mod coerce;
mod fallback;
mod operators;

pub use coerce::{accepts, Coercion};
pub use fallback::{
    fallback_table, find_conversion, find_operator, FallbackEntry, FallbackKind,
};
pub use operators::{concat_text, evaluate_binary};
