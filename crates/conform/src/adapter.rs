//! Adapter instances.

use std::fmt;
use std::sync::Arc;

use conform_value::{EvalResult, Value};

use crate::synth::AdapterType;

/// A value seen through a contract.
///
/// Exposes exactly the contract's operations; every call forwards to the
/// wrapped instance. Adapters for static-only contracts may have no
/// instance.
#[derive(Clone)]
pub struct Adapter {
    ty: Arc<AdapterType>,
    instance: Option<Value>,
}

impl Adapter {
    pub(crate) fn new(ty: Arc<AdapterType>, instance: Option<Value>) -> Self {
        Adapter { ty, instance }
    }

    /// The adapter type shared by every adapter for this
    /// (implementation type, contract) pair.
    pub fn adapter_type(&self) -> &Arc<AdapterType> {
        &self.ty
    }

    /// The wrapped instance, if any.
    pub fn instance(&self) -> Option<&Value> {
        self.instance.as_ref()
    }

    /// Call a contract operation by name.
    ///
    /// ```ignore
    /// let total = adapter.call("sum", &[])?;
    /// ```
    pub fn call(&self, name: &str, args: &[Value]) -> EvalResult {
        self.ty.invoke(self.instance.as_ref(), name, args)
    }

    /// Read a contract property.
    pub fn get(&self, property: &str) -> EvalResult {
        self.call(&format!("get_{property}"), &[])
    }

    /// Write a contract property.
    pub fn set(&self, property: &str, value: Value) -> EvalResult {
        self.call(&format!("set_{property}"), &[value])
    }

    /// Unwrap the adapter, returning the instance.
    pub fn into_instance(self) -> Option<Value> {
        self.instance
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("type", &self.ty.name())
            .field("instance", &self.instance)
            .finish()
    }
}
