#![allow(
    clippy::result_large_err,
    reason = "ConformError carries issue lists by value; it is only built on failure"
)]
//! Conform - "does this value behave like X?" answered at runtime.
//!
//! A contract is a declared set of required operations (methods, static
//! methods, conversions, binary operators and properties). A
//! `ContractProvider` matches an implementation type against a contract
//! structurally, and on success hands out an `Adapter` that exposes exactly
//! the contract's operations and forwards each to the implementation.
//!
//! # Architecture
//!
//! ```text
//! caller -> extract (contract) -> Matcher (inventory + fallback table)
//!        -> ResultCache -> AdapterType (closure table) -> Adapter
//! ```
//!
//! - `contract`: contract declarations flattened into `ContractSpec`s
//! - `matcher`: resolution of each operation into a `Binding`
//! - `cache`: provider-owned memo of match results and adapter types
//! - `synth`: adapter types built from satisfied matches
//! - `adapter`: adapter instances
//! - `provider`: the public entry points
//!
//! # Tracing
//!
//! Set `RUST_LOG=conform=debug` and call `init_tracing()` to see cache
//! hits, matcher runs and adapter publication.

mod adapter;
mod cache;
mod config;
mod contract;
mod convert;
mod error;
mod matcher;
pub mod premade;
mod provider;
mod synth;

pub use adapter::Adapter;
pub use cache::{CacheEntry, CacheKey, CacheStats, ResultCache};
pub use config::ProviderConfig;
pub use contract::{extract, ContractSpec, OperationDescriptor, OperationKind};
pub use error::{ConformError, Result};
pub use matcher::{Binding, BindingTarget, MatchIssue, MatchResult, Matcher};
pub use provider::{shared_registry, ContractProvider, ContractProviderBuilder, SharedRegistry};
pub use synth::{AdapterId, AdapterType, Slot};

// Re-exports so embedders need only this crate.
pub use conform_eval::{Coercion, FallbackEntry, FallbackKind};
pub use conform_ir::{
    BinaryOp, Builtin, ConversionKind, GenericConstraint, GenericParam, ImplTy, Name, OpSide,
    SharedInterner, TypeIdx, TypeRef,
};
pub use conform_types::{
    ContractBuilder, MemberInventory, RegistryError, TypeBuilder, TypeKind, TypeRegistry,
};
pub use conform_value::{EvalError, EvalErrorKind, EvalResult, NativeFn, ObjectRef, Value};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the embedder.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
