//! Runtime values.
//!
//! Every argument, receiver and result that crosses an adapter is a `Value`.
//! Primitive variants map one-to-one onto `Builtin`; `Object` holds an
//! instance of a registered type.

mod heap;
mod numeric;
mod object;

use conform_ir::{Builtin, ImplTy, TypeIdx};
use rustc_hash::FxHashMap;
use std::fmt;

pub use heap::Heap;
pub use object::ObjectRef;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Result of a void operation.
    Void,
    /// Absent reference.
    Null,
    Bool(bool),
    /// UTF-16 code unit.
    Char(u16),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(Heap<str>),
    Object(ObjectRef),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from_str(s.as_ref()))
    }

    /// Create a char value from a character in the basic multilingual plane.
    ///
    /// Characters outside it are stored as their leading surrogate.
    pub fn char(c: char) -> Self {
        let mut buf = [0u16; 2];
        Value::Char(c.encode_utf16(&mut buf)[0])
    }

    /// Create an instance of a registered type.
    pub fn object<S: Into<String>>(
        ty: TypeIdx,
        fields: impl IntoIterator<Item = (S, Value)>,
    ) -> Self {
        let fields: FxHashMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(ObjectRef::new(ty, fields))
    }
}

impl Value {
    /// The runtime type of this value, if it has one.
    ///
    /// `Null` and `Void` carry no type an adapter could be built for.
    pub fn runtime_type(&self) -> Option<ImplTy> {
        match self {
            Value::Void | Value::Null => None,
            Value::Object(obj) => Some(ImplTy::Named(obj.type_idx())),
            _ => self.builtin().map(ImplTy::Builtin),
        }
    }

    /// The built-in type of a primitive value.
    pub fn builtin(&self) -> Option<Builtin> {
        Some(match self {
            Value::Void => Builtin::Void,
            Value::Bool(_) => Builtin::Bool,
            Value::Char(_) => Builtin::Char,
            Value::I8(_) => Builtin::I8,
            Value::U8(_) => Builtin::U8,
            Value::I16(_) => Builtin::I16,
            Value::U16(_) => Builtin::U16,
            Value::I32(_) => Builtin::I32,
            Value::U32(_) => Builtin::U32,
            Value::I64(_) => Builtin::I64,
            Value::U64(_) => Builtin::U64,
            Value::F32(_) => Builtin::F32,
            Value::F64(_) => Builtin::F64,
            Value::Str(_) => Builtin::Str,
            Value::Null | Value::Object(_) => return None,
        })
    }

    /// Get the type name for error messages.
    ///
    /// Objects report `object`; the registry resolves their declared names.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Object(_) => "object",
            _ => self.builtin().map_or("object", Builtin::name),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Whether two values are the same instance (objects, strings) or equal
    /// primitives.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
            _ => self == other,
        }
    }

    /// Text form used by `to_string` and text concatenation.
    pub fn display_value(&self) -> String {
        match self {
            Value::Void | Value::Null => String::new(),
            Value::Str(s) => s.to_string(),
            Value::Char(c) => char::from_u32(u32::from(*c))
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string(),
            Value::Object(obj) => format!("object#{}", obj.type_idx().raw()),
            other => other.to_string(),
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:#06x})"),
            Value::I8(n) => write!(f, "I8({n})"),
            Value::U8(n) => write!(f, "U8({n})"),
            Value::I16(n) => write!(f, "I16({n})"),
            Value::U16(n) => write!(f, "U16({n})"),
            Value::I32(n) => write!(f, "I32({n})"),
            Value::U32(n) => write!(f, "U32({n})"),
            Value::I64(n) => write!(f, "I64({n})"),
            Value::U64(n) => write!(f, "U64({n})"),
            Value::F32(n) => write!(f, "F32({n})"),
            Value::F64(n) => write!(f, "F64({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(_) => write!(f, "'{}'", self.display_value()),
            Value::I8(n) => write!(f, "{n}"),
            Value::U8(n) => write!(f, "{n}"),
            Value::I16(n) => write!(f, "{n}"),
            Value::U16(n) => write!(f, "{n}"),
            Value::I32(n) => write!(f, "{n}"),
            Value::U32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::Object(obj) => write!(f, "<object #{}>", obj.type_idx().raw()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) | (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Objects compare by identity
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests;
