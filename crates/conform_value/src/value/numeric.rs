//! Numeric views and constructors used by conversions and the fallback table.

use super::Value;
use conform_ir::Builtin;

impl Value {
    /// Integral value widened to `i128` (`char` included).
    pub fn as_i128(&self) -> Option<i128> {
        Some(match self {
            Value::Char(n) | Value::U16(n) => i128::from(*n),
            Value::I8(n) => i128::from(*n),
            Value::U8(n) => i128::from(*n),
            Value::I16(n) => i128::from(*n),
            Value::I32(n) => i128::from(*n),
            Value::U32(n) => i128::from(*n),
            Value::I64(n) => i128::from(*n),
            Value::U64(n) => i128::from(*n),
            _ => return None,
        })
    }

    /// Any numeric value as `f64`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "64-bit integers lose precision in f64 just as in the native conversion"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(n) => Some(f64::from(*n)),
            Value::F64(n) => Some(*n),
            other => other.as_i128().map(|n| n as f64),
        }
    }

    /// Integral or float value of type `ty`, `None` if `n` is out of range
    /// or `ty` is not numeric.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "float targets round like the native conversion"
    )]
    pub fn from_i128_checked(ty: Builtin, n: i128) -> Option<Value> {
        Some(match ty {
            Builtin::Char => Value::Char(u16::try_from(n).ok()?),
            Builtin::I8 => Value::I8(i8::try_from(n).ok()?),
            Builtin::U8 => Value::U8(u8::try_from(n).ok()?),
            Builtin::I16 => Value::I16(i16::try_from(n).ok()?),
            Builtin::U16 => Value::U16(u16::try_from(n).ok()?),
            Builtin::I32 => Value::I32(i32::try_from(n).ok()?),
            Builtin::U32 => Value::U32(u32::try_from(n).ok()?),
            Builtin::I64 => Value::I64(i64::try_from(n).ok()?),
            Builtin::U64 => Value::U64(u64::try_from(n).ok()?),
            Builtin::F32 => Value::F32(n as f32),
            Builtin::F64 => Value::F64(n as f64),
            _ => return None,
        })
    }

    /// Integral value of type `ty`, keeping only the low bits of `n`.
    ///
    /// This is the explicit (unchecked) narrowing conversion.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "wrapping is the point of an explicit narrowing conversion"
    )]
    pub fn from_i128_wrapping(ty: Builtin, n: i128) -> Option<Value> {
        Some(match ty {
            Builtin::Char => Value::Char(n as u16),
            Builtin::I8 => Value::I8(n as i8),
            Builtin::U8 => Value::U8(n as u8),
            Builtin::I16 => Value::I16(n as i16),
            Builtin::U16 => Value::U16(n as u16),
            Builtin::I32 => Value::I32(n as i32),
            Builtin::U32 => Value::U32(n as u32),
            Builtin::I64 => Value::I64(n as i64),
            Builtin::U64 => Value::U64(n as u64),
            Builtin::F32 => Value::F32(n as f32),
            Builtin::F64 => Value::F64(n as f64),
            _ => return None,
        })
    }

    /// Value of type `ty` from a float; integral targets truncate toward zero
    /// and saturate at the bounds, NaN becomes zero.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "float to integer conversion truncates by definition"
    )]
    pub fn from_f64(ty: Builtin, n: f64) -> Option<Value> {
        Some(match ty {
            Builtin::Char => Value::Char(n as u16),
            Builtin::I8 => Value::I8(n as i8),
            Builtin::U8 => Value::U8(n as u8),
            Builtin::I16 => Value::I16(n as i16),
            Builtin::U16 => Value::U16(n as u16),
            Builtin::I32 => Value::I32(n as i32),
            Builtin::U32 => Value::U32(n as u32),
            Builtin::I64 => Value::I64(n as i64),
            Builtin::U64 => Value::U64(n as u64),
            Builtin::F32 => Value::F32(n as f32),
            Builtin::F64 => Value::F64(n),
            _ => return None,
        })
    }

    /// Convert a numeric value to numeric type `ty` the way an explicit cast
    /// does: integers wrap, floats truncate.
    pub fn cast_numeric(&self, ty: Builtin) -> Option<Value> {
        match self {
            Value::F32(_) | Value::F64(_) => Value::from_f64(ty, self.as_f64()?),
            other => Value::from_i128_wrapping(ty, other.as_i128()?),
        }
    }

    /// Widen a numeric value to `ty`. Callers check `Builtin::widens_to`
    /// first; the conversion itself is lossless for integral targets.
    pub fn widen(&self, ty: Builtin) -> Option<Value> {
        match self {
            Value::F32(_) | Value::F64(_) => Value::from_f64(ty, self.as_f64()?),
            other => Value::from_i128_checked(ty, other.as_i128()?),
        }
    }
}
