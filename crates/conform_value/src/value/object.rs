//! Instances of registered types.

use super::heap::Heap;
use super::Value;
use crate::errors::{undefined_field, EvalError};
use conform_ir::TypeIdx;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

pub(super) struct ObjectData {
    ty: TypeIdx,
    fields: RwLock<FxHashMap<String, Value>>,
}

/// Shared handle to an instance of a registered type.
///
/// Cloning the handle aliases the instance; equality is identity. Fields are
/// interior-mutable so property setters can write through a shared handle.
#[derive(Clone)]
pub struct ObjectRef(Heap<ObjectData>);

impl ObjectRef {
    pub(super) fn new(ty: TypeIdx, fields: FxHashMap<String, Value>) -> Self {
        ObjectRef(Heap::new(ObjectData {
            ty,
            fields: RwLock::new(fields),
        }))
    }

    /// Runtime type of the instance.
    #[inline]
    pub fn type_idx(&self) -> TypeIdx {
        self.0.ty
    }

    /// Read a field.
    pub fn field(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name).ok_or_else(|| undefined_field(name))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.fields.read().get(name).cloned()
    }

    /// Write a field, creating it if absent.
    pub fn set_field(&self, name: &str, value: Value) {
        self.0.fields.write().insert(name.to_string(), value);
    }

    /// Whether two handles refer to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.fields.read();
        let mut names: Vec<_> = fields.keys().collect();
        names.sort();
        let mut s = f.debug_struct("Object");
        s.field("ty", &self.0.ty.raw());
        for name in names {
            if let Some(value) = fields.get(name) {
                s.field(name, value);
            }
        }
        s.finish()
    }
}
