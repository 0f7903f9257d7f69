//! Binary operators over primitive values.
//!
//! Numeric operands are brought to their promoted type first; integer
//! arithmetic wraps at the width of that type, float arithmetic follows
//! IEEE semantics. Division and remainder by zero or of `MIN` by `-1`
//! are errors. `bool` and `str` support the operators a primitive of that
//! type has; `+` with a string on either side concatenates text.

use conform_ir::{BinaryOp, Builtin};
use conform_value::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op_for,
    invalid_conversion, modulo_by_zero, EvalResult, Value,
};

// Helper functions for repetitive integer arithmetic patterns

/// Integer result truncated to the width of `ty`.
#[inline]
fn wrapping_arith(n: i128, ty: Builtin) -> EvalResult {
    Value::from_i128_wrapping(ty, n).ok_or_else(|| invalid_conversion("i128", ty.name()))
}

/// Checked integer result, re-checked against the width of `ty`.
#[inline]
fn checked_arith(result: Option<i128>, ty: Builtin, op_name: &'static str) -> EvalResult {
    result
        .and_then(|n| Value::from_i128_checked(ty, n))
        .ok_or_else(|| integer_overflow(op_name))
}

/// Checked division with zero guard.
#[inline]
fn checked_div(a: i128, b: i128, ty: Builtin) -> EvalResult {
    if b == 0 {
        Err(division_by_zero())
    } else {
        checked_arith(a.checked_div(b), ty, "division")
    }
}

/// Checked remainder with zero guard. `MIN % -1` fails like `MIN / -1`.
#[inline]
fn checked_mod(a: i128, b: i128, ty: Builtin) -> EvalResult {
    if b == 0 {
        Err(modulo_by_zero())
    } else if Value::from_i128_checked(ty, a / b).is_none() {
        Err(integer_overflow("remainder"))
    } else {
        checked_arith(a.checked_rem(b), ty, "remainder")
    }
}

/// Evaluate `left op right` over primitive values.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOp::Add => {
            Ok(concat_text(left, right))
        }
        (Value::Str(_) | Value::Null, Value::Str(_) | Value::Null) => {
            eval_text_binary(left.as_str(), right.as_str(), op)
        }
        _ => match (left.builtin(), right.builtin()) {
            (Some(l), Some(r)) if l.is_numeric() && r.is_numeric() => {
                eval_numeric_binary(op, left, right, l, r)
            }
            _ => Err(binary_type_mismatch(left.type_name(), right.type_name())),
        },
    }
}

/// Text concatenation; `null` contributes nothing.
pub fn concat_text(left: &Value, right: &Value) -> Value {
    let mut text = left.display_value();
    text.push_str(&right.display_value());
    Value::string(text)
}

// Type-Specific Evaluation Functions

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::BitAnd => Ok(Value::Bool(a & b)),
        BinaryOp::BitOr => Ok(Value::Bool(a | b)),
        BinaryOp::BitXor => Ok(Value::Bool(a ^ b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op_for("bool", op)),
    }
}

fn eval_text_binary(a: Option<&str>, b: Option<&str>, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op_for("str", op)),
    }
}

fn eval_numeric_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    l: Builtin,
    r: Builtin,
) -> EvalResult {
    let Some(ty) = Builtin::promote(l, r) else {
        return Err(binary_type_mismatch(l.name(), r.name()));
    };
    if ty.is_float() {
        match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => eval_float_binary(a, b, op, ty),
            _ => Err(binary_type_mismatch(l.name(), r.name())),
        }
    } else {
        match (left.as_i128(), right.as_i128()) {
            (Some(a), Some(b)) => eval_int_binary(a, b, op, ty),
            _ => Err(binary_type_mismatch(l.name(), r.name())),
        }
    }
}

/// Integer operators in the promoted type `ty`.
fn eval_int_binary(a: i128, b: i128, op: BinaryOp, ty: Builtin) -> EvalResult {
    match op {
        // i128 wrapping keeps the low 64 bits exact for every operand width.
        BinaryOp::Add => wrapping_arith(a.wrapping_add(b), ty),
        BinaryOp::Sub => wrapping_arith(a.wrapping_sub(b), ty),
        BinaryOp::Mul => wrapping_arith(a.wrapping_mul(b), ty),
        BinaryOp::Div => checked_div(a, b, ty),
        BinaryOp::Mod => checked_mod(a, b, ty),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::BitAnd => wrapping_arith(a & b, ty),
        BinaryOp::BitOr => wrapping_arith(a | b, ty),
        BinaryOp::BitXor => wrapping_arith(a ^ b, ty),
    }
}

/// Float operators in the promoted type `ty`.
#[allow(
    clippy::float_cmp,
    reason = "primitive equality is exact IEEE comparison"
)]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp, ty: Builtin) -> EvalResult {
    let wrap = |n: f64| Value::from_f64(ty, n).ok_or_else(|| invalid_conversion("f64", ty.name()));
    match op {
        BinaryOp::Add => wrap(a + b),
        BinaryOp::Sub => wrap(a - b),
        BinaryOp::Mul => wrap(a * b),
        BinaryOp::Div => wrap(a / b),
        BinaryOp::Mod => wrap(a % b),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            Err(invalid_binary_op_for(ty.name(), op))
        }
    }
}
