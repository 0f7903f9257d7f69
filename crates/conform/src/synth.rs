//! Adapter synthesis.
//!
//! An adapter type is a table of forwarding closures, one per contract
//! operation, built once per (implementation type, contract) from a
//! satisfied `MatchResult`. Each closure coerces its arguments into the
//! bound member's parameter types, calls the member, and coerces the
//! result back into the contract's return type.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use conform_eval::{accepts, Coercion};
use conform_ir::{ImplTy, OpSide, TypeIdx};
use conform_types::{MemberInventory, TypeRegistry};
use conform_value::{
    null_receiver, no_such_operation, wrong_arg_count, wrong_arg_type, EvalError, EvalResult,
    NativeFn, Value,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::contract::{OperationDescriptor, OperationKind};
use crate::matcher::{Binding, BindingTarget, MatchResult};
use crate::provider::SharedRegistry;

static NEXT_ADAPTER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a synthesized adapter type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct AdapterId(u64);

impl AdapterId {
    fn next() -> Self {
        AdapterId(NEXT_ADAPTER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One callable entry of an adapter type.
#[derive(Clone, Debug)]
pub struct Slot {
    /// Name the operation is called by: the member name, or `get_x` /
    /// `set_x` for property accessors.
    pub name: String,
    pub operation: OperationDescriptor,
    thunk: NativeFn,
}

/// A synthesized adapter type.
pub struct AdapterType {
    id: AdapterId,
    name: String,
    result: Arc<MatchResult>,
    slots: Vec<Slot>,
    by_name: FxHashMap<String, SmallVec<[usize; 2]>>,
    registry: SharedRegistry,
}

impl AdapterType {
    /// Build the closure table for a satisfied match.
    pub(crate) fn synthesize(
        result: Arc<MatchResult>,
        inventory: &TypeRegistry,
        registry: SharedRegistry,
    ) -> Self {
        let id = AdapterId::next();
        let name = format!(
            "{}_for_{}#{}",
            result.contract_name,
            result.type_name,
            id.raw()
        );
        let mut slots = Vec::with_capacity(result.bindings.len());
        let mut by_name: FxHashMap<String, SmallVec<[usize; 2]>> = FxHashMap::default();
        for binding in &result.bindings {
            let slot_name = slot_name(inventory, &binding.operation);
            by_name
                .entry(slot_name.clone())
                .or_default()
                .push(slots.len());
            slots.push(Slot {
                thunk: thunk(binding, &slot_name),
                name: slot_name,
                operation: binding.operation.clone(),
            });
        }
        tracing::debug!(%name, slots = slots.len(), "synthesized adapter type");
        AdapterType {
            id,
            name,
            result,
            slots,
            by_name,
            registry,
        }
    }

    #[inline]
    pub fn id(&self) -> AdapterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn impl_ty(&self) -> ImplTy {
        self.result.impl_ty
    }

    pub fn contract(&self) -> TypeIdx {
        self.result.contract
    }

    /// The match this adapter type was built from.
    pub fn match_result(&self) -> &Arc<MatchResult> {
        &self.result
    }

    pub fn is_static_only(&self) -> bool {
        self.result.static_only
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Call the operation `name` on `instance`.
    ///
    /// Overloads sharing a name are tried in contract order; the first whose
    /// parameters accept `args` is called.
    pub(crate) fn invoke(
        &self,
        instance: Option<&Value>,
        name: &str,
        args: &[Value],
    ) -> EvalResult {
        let candidates = self
            .by_name
            .get(name)
            .ok_or_else(|| no_such_operation(name, &self.name))?;
        let slot = self.select(name, candidates, args)?;
        slot.thunk.call(instance, args)
    }

    fn select(
        &self,
        name: &str,
        candidates: &[usize],
        args: &[Value],
    ) -> Result<&Slot, EvalError> {
        // Released before the member body runs.
        let registry = self.registry.read();
        let mut first_error = None;
        for slot in candidates.iter().filter_map(|&i| self.slots.get(i)) {
            let params = &slot.operation.params;
            if params.len() != args.len() {
                first_error
                    .get_or_insert_with(|| wrong_arg_count(name, params.len(), args.len()));
                continue;
            }
            let mismatch = params
                .iter()
                .zip(args)
                .find(|(&ty, value)| !accepts(&*registry, ty, value));
            match mismatch {
                None => return Ok(slot),
                Some((&ty, value)) => {
                    first_error = Some(wrong_arg_type(
                        name,
                        &registry.type_name(ty),
                        &registry.value_type_name(value),
                    ));
                }
            }
        }
        Err(first_error.unwrap_or_else(|| no_such_operation(name, &self.name)))
    }
}

impl std::fmt::Debug for AdapterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field(
                "slots",
                &self.slots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn slot_name<I: MemberInventory + ?Sized>(inventory: &I, op: &OperationDescriptor) -> String {
    let member = inventory.member_name(op.name);
    match op.kind {
        OperationKind::PropertyGet => format!("get_{member}"),
        OperationKind::PropertySet => format!("set_{member}"),
        _ => member.to_string(),
    }
}

/// The instance an instance operation runs against.
fn require_instance<'v>(instance: Option<&'v Value>, name: &str) -> Result<&'v Value, EvalError> {
    match instance {
        None | Some(Value::Null) => Err(null_receiver(name)),
        Some(value) => Ok(value),
    }
}

fn coerce_args(coercions: &[Coercion], args: &[Value]) -> Result<Vec<Value>, EvalError> {
    coercions
        .iter()
        .zip(args)
        .map(|(coercion, arg)| coercion.apply(arg.clone()))
        .collect()
}

fn first_arg<'v>(args: &'v [Value], name: &str) -> Result<&'v Value, EvalError> {
    args.first().ok_or_else(|| wrong_arg_count(name, 1, 0))
}

/// The forwarding closure for one binding.
fn thunk(binding: &Binding, name: &str) -> NativeFn {
    let name = name.to_string();
    let receiver = binding.receiver;
    let args_coercion = binding.args.clone();
    let ret = binding.ret;
    let side = match binding.operation.kind {
        OperationKind::BinaryOperator { side, .. } => side,
        _ => OpSide::ReceiverLeft,
    };

    match binding.target.clone() {
        BindingTarget::Method(method) => NativeFn::new(move |instance, args| {
            let args = coerce_args(&args_coercion, args)?;
            let result = if method.is_static {
                method.body.call(None, &args)?
            } else {
                let this = require_instance(instance, &name)?;
                method.body.call(Some(this), &args)?
            };
            ret.apply(result)
        }),
        BindingTarget::Conversion(conversion) => NativeFn::new(move |instance, _| {
            let this = require_instance(instance, &name)?;
            ret.apply(conversion.body.call(Some(this), &[])?)
        }),
        BindingTarget::Identity => NativeFn::new(move |instance, _| {
            require_instance(instance, &name).cloned()
        }),
        BindingTarget::Operator(operator) => NativeFn::new(move |instance, args| {
            let this = receiver.apply(require_instance(instance, &name)?.clone())?;
            let other = coerce_other(&args_coercion, args, &name)?;
            let (left, right) = side.arrange(this, other);
            ret.apply(operator.body.call(None, &[left, right])?)
        }),
        BindingTarget::Fallback(entry) => NativeFn::new(move |instance, args| {
            let this = receiver.apply(require_instance(instance, &name)?.clone())?;
            if args_coercion.is_empty() {
                return ret.apply(entry.eval(&this, None)?);
            }
            let other = coerce_other(&args_coercion, args, &name)?;
            let (left, right) = side.arrange(this, other);
            ret.apply(entry.eval(&left, Some(&right))?)
        }),
        BindingTarget::Property(property) => match binding.operation.kind {
            OperationKind::PropertySet => NativeFn::new(move |instance, args| {
                let this = require_instance(instance, &name)?;
                let value = coerce_other(&args_coercion, args, &name)?;
                match &property.setter {
                    Some(setter) => setter.call(Some(this), &[value]).map(|_| Value::Void),
                    None => Err(no_such_operation(&name, "property")),
                }
            }),
            _ => NativeFn::new(move |instance, _| {
                let this = require_instance(instance, &name)?;
                match &property.getter {
                    Some(getter) => ret.apply(getter.call(Some(this), &[])?),
                    None => Err(no_such_operation(&name, "property")),
                }
            }),
        },
    }
}

/// The single non-receiver argument of an operator or setter, coerced.
fn coerce_other(coercions: &[Coercion], args: &[Value], name: &str) -> EvalResult {
    let arg = first_arg(args, name)?.clone();
    match coercions.first() {
        Some(coercion) => coercion.apply(arg),
        None => Ok(arg),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
