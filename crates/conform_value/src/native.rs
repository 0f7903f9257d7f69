//! Native member bodies.
//!
//! Every declared method, operator, conversion and property accessor is a
//! `NativeFn`. The calling convention is uniform:
//!
//! | member          | receiver      | args            |
//! |-----------------|---------------|-----------------|
//! | instance method | `Some(self)`  | parameters      |
//! | static method   | `None`        | parameters      |
//! | operator        | `None`        | `[left, right]` |
//! | conversion      | `Some(self)`  | `[]`            |
//! | getter          | `Some(self)`  | `[]`            |
//! | setter          | `Some(self)`  | `[value]`       |

use crate::errors::{null_receiver, type_mismatch, EvalError, EvalResult};
use crate::value::{ObjectRef, Value};
use std::fmt;
use std::sync::Arc;

type NativeBody = dyn Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync;

/// Shared, thread-safe member body.
#[derive(Clone)]
pub struct NativeFn(Arc<NativeBody>);

impl NativeFn {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        NativeFn(Arc::new(body))
    }

    #[inline]
    pub fn call(&self, receiver: Option<&Value>, args: &[Value]) -> EvalResult {
        (self.0)(receiver, args)
    }

    /// Whether two handles share one body.
    pub fn ptr_eq(&self, other: &NativeFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

/// The receiver of an instance member on a registered type.
pub fn receiver_object<'a>(
    receiver: Option<&'a Value>,
    operation: &str,
) -> Result<&'a ObjectRef, EvalError> {
    match receiver {
        None | Some(Value::Null) => Err(null_receiver(operation)),
        Some(Value::Object(obj)) => Ok(obj),
        Some(other) => Err(type_mismatch("object", other.type_name())),
    }
}
