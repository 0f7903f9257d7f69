//! The primitive fallback table.
//!
//! Primitive types have conversions and operators that are not spelled as
//! members: `(i64)x` on an `i32`, `a + b` on two `u8`s, `s + 1` on a string.
//! The matcher consults this table when a primitive implementation type has
//! no declared member for a required conversion or operator.
//!
//! Table order is fixed and observable through `fallback_table`:
//! 1. explicit conversions between every pair of distinct numeric types,
//!    then implicit conversions for the widening pairs
//! 2. numeric operators, grouped by operator in `BinaryOp::ALL` order, each
//!    group enumerated left-operand-major over `Builtin::NUMERIC`
//! 3. `bool` operators
//! 4. `str` equality, then text concatenation
//!
//! Conversions match exactly; operators match by assignability. The first
//! matching entry wins.

use std::sync::OnceLock;

use conform_ir::{BinaryOp, Builtin, ConversionKind, TypeRef};
use conform_types::MemberInventory;
use conform_value::{invalid_conversion, wrong_arg_count, EvalResult, Value};

use crate::operators::evaluate_binary;

/// What a fallback entry provides.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FallbackKind {
    Conversion(ConversionKind),
    Operator(BinaryOp),
}

/// One built-in conversion or binary operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FallbackEntry {
    pub kind: FallbackKind,
    /// Conversion source, or left operand.
    pub left: TypeRef,
    /// Right operand; `None` for conversions.
    pub right: Option<TypeRef>,
    pub result: TypeRef,
}

impl FallbackEntry {
    const fn conversion(kind: ConversionKind, source: Builtin, target: Builtin) -> Self {
        FallbackEntry {
            kind: FallbackKind::Conversion(kind),
            left: TypeRef::Builtin(source),
            right: None,
            result: TypeRef::Builtin(target),
        }
    }

    const fn operator(op: BinaryOp, left: TypeRef, right: TypeRef, result: TypeRef) -> Self {
        FallbackEntry {
            kind: FallbackKind::Operator(op),
            left,
            right: Some(right),
            result,
        }
    }

    /// Run the entry. Conversions ignore `right`.
    pub fn eval(&self, left: &Value, right: Option<&Value>) -> EvalResult {
        match self.kind {
            FallbackKind::Conversion(kind) => {
                let TypeRef::Builtin(target) = self.result else {
                    return Err(invalid_conversion(left.type_name(), "non-primitive"));
                };
                let converted = match kind {
                    ConversionKind::Explicit => left.cast_numeric(target),
                    ConversionKind::Implicit => left.widen(target),
                };
                converted.ok_or_else(|| invalid_conversion(left.type_name(), target.name()))
            }
            FallbackKind::Operator(op) => match right {
                Some(right) => evaluate_binary(op, left, right),
                None => Err(wrong_arg_count(op.as_symbol(), 2, 1)),
            },
        }
    }
}

static FALLBACK_TABLE: OnceLock<Vec<FallbackEntry>> = OnceLock::new();

/// The full table, built on first use.
pub fn fallback_table() -> &'static [FallbackEntry] {
    FALLBACK_TABLE.get_or_init(build_table)
}

/// The built-in conversion of `kind` from `source` to exactly `target`.
pub fn find_conversion(
    kind: ConversionKind,
    source: TypeRef,
    target: TypeRef,
) -> Option<&'static FallbackEntry> {
    fallback_table().iter().find(|entry| {
        entry.kind == FallbackKind::Conversion(kind)
            && entry.left == source
            && entry.result == target
    })
}

/// The first built-in operator accepting `left op right` whose result is
/// assignable to `result`.
pub fn find_operator<I>(
    inventory: &I,
    op: BinaryOp,
    left: TypeRef,
    right: TypeRef,
    result: TypeRef,
) -> Option<&'static FallbackEntry>
where
    I: MemberInventory + ?Sized,
{
    fallback_table().iter().find(|entry| {
        entry.kind == FallbackKind::Operator(op)
            && inventory.is_assignable(left, entry.left)
            && entry
                .right
                .is_some_and(|r| inventory.is_assignable(right, r))
            && inventory.is_assignable(entry.result, result)
    })
}

fn build_table() -> Vec<FallbackEntry> {
    let mut table = Vec::new();
    push_conversions(&mut table);
    push_numeric_operators(&mut table);
    push_bool_operators(&mut table);
    push_text_operators(&mut table);
    tracing::debug!(entries = table.len(), "built primitive fallback table");
    table
}

fn push_conversions(table: &mut Vec<FallbackEntry>) {
    for source in Builtin::NUMERIC {
        for target in Builtin::NUMERIC {
            if source != target {
                table.push(FallbackEntry::conversion(
                    ConversionKind::Explicit,
                    source,
                    target,
                ));
            }
        }
    }
    for source in Builtin::NUMERIC {
        for target in Builtin::NUMERIC {
            if source.widens_to(target) {
                table.push(FallbackEntry::conversion(
                    ConversionKind::Implicit,
                    source,
                    target,
                ));
            }
        }
    }
}

fn push_numeric_operators(table: &mut Vec<FallbackEntry>) {
    for op in BinaryOp::ALL {
        for left in Builtin::NUMERIC {
            for right in Builtin::NUMERIC {
                let Some(promoted) = Builtin::promote(left, right) else {
                    continue;
                };
                if op.is_bitwise() && promoted.is_float() {
                    continue;
                }
                let result = if op.is_comparison() {
                    TypeRef::BOOL
                } else {
                    TypeRef::Builtin(promoted)
                };
                table.push(FallbackEntry::operator(
                    op,
                    TypeRef::Builtin(left),
                    TypeRef::Builtin(right),
                    result,
                ));
            }
        }
    }
}

fn push_bool_operators(table: &mut Vec<FallbackEntry>) {
    for op in [
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Eq,
        BinaryOp::NotEq,
    ] {
        table.push(FallbackEntry::operator(
            op,
            TypeRef::BOOL,
            TypeRef::BOOL,
            TypeRef::BOOL,
        ));
    }
}

fn push_text_operators(table: &mut Vec<FallbackEntry>) {
    for op in [BinaryOp::Eq, BinaryOp::NotEq] {
        table.push(FallbackEntry::operator(
            op,
            TypeRef::STR,
            TypeRef::STR,
            TypeRef::BOOL,
        ));
    }
    table.push(FallbackEntry::operator(
        BinaryOp::Add,
        TypeRef::STR,
        TypeRef::OBJECT,
        TypeRef::STR,
    ));
    table.push(FallbackEntry::operator(
        BinaryOp::Add,
        TypeRef::OBJECT,
        TypeRef::STR,
        TypeRef::STR,
    ));
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
