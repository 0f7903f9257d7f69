//! The capability matcher.
//!
//! Each operation of a `ContractSpec` is resolved independently against
//! the implementation type:
//! - methods by name, arity, binding and signature unification; the
//!   candidate needing the fewest non-identity coercions wins
//! - conversions by exact target, then the fallback table, then identity
//! - operators declared on the implementation type, then on the other
//!   operand's type, then the fallback table, all respecting the side
//! - properties by name and accessor
//!
//! An operation that cannot be resolved becomes a `MatchIssue`; matching
//! itself never fails.

use std::fmt;

use conform_eval::{find_conversion, find_operator, Coercion, FallbackEntry};
use conform_ir::{ConversionKind, ImplTy, OpSide, TypeIdx, TypeRef};
use conform_types::{
    ConversionDef, MemberFilter, MemberInventory, MethodDef, OperatorDef, PropertyDef,
};
use smallvec::{smallvec, SmallVec};

use crate::config::ProviderConfig;
use crate::contract::{ContractSpec, OperationDescriptor, OperationKind};

/// What an operation is bound to.
#[derive(Clone, Debug)]
pub enum BindingTarget {
    Method(MethodDef),
    Conversion(ConversionDef),
    /// Conversion to the implementation type itself.
    Identity,
    Operator(OperatorDef),
    Fallback(&'static FallbackEntry),
    Property(PropertyDef),
}

/// One resolved operation.
#[derive(Clone, Debug)]
pub struct Binding {
    pub operation: OperationDescriptor,
    pub target: BindingTarget,
    /// Instance into the slot it occupies (operators only; identity
    /// otherwise).
    pub receiver: Coercion,
    /// Contract argument into member parameter, per position.
    pub args: SmallVec<[Coercion; 4]>,
    /// Member result into contract result.
    pub ret: Coercion,
}

impl Binding {
    /// Number of non-identity coercions.
    pub fn cost(&self) -> usize {
        std::iter::once(self.receiver)
            .chain(self.args.iter().copied())
            .chain(std::iter::once(self.ret))
            .filter(|c| !c.is_identity())
            .count()
    }

    fn new(operation: &OperationDescriptor, target: BindingTarget) -> Self {
        Binding {
            operation: operation.clone(),
            target,
            receiver: Coercion::Identity,
            args: SmallVec::new(),
            ret: Coercion::Identity,
        }
    }
}

/// An operation the implementation type does not provide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchIssue {
    /// Member name of the operation.
    pub operation: String,
    pub kind: &'static str,
    pub signature: String,
    pub type_name: String,
}

impl fmt::Display for MatchIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has no {} matching `{}`",
            self.type_name, self.kind, self.signature
        )
    }
}

/// Outcome of matching one implementation type against one contract.
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub impl_ty: ImplTy,
    pub type_name: String,
    pub contract: TypeIdx,
    pub contract_name: String,
    /// Every operation is bound.
    pub satisfied: bool,
    /// Every operation is a static method.
    pub static_only: bool,
    /// Bindings in operation order.
    pub bindings: Vec<Binding>,
    pub issues: Vec<MatchIssue>,
}

/// Resolves contract operations against one inventory.
pub struct Matcher<'a, I: ?Sized> {
    inventory: &'a I,
    config: ProviderConfig,
}

impl<'a, I> Matcher<'a, I>
where
    I: MemberInventory + ?Sized,
{
    pub fn new(inventory: &'a I, config: ProviderConfig) -> Self {
        Matcher { inventory, config }
    }

    /// Match `impl_ty` against every operation of `spec`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(contract = %spec.name, operations = spec.len())
    )]
    pub fn run(&self, impl_ty: ImplTy, spec: &ContractSpec) -> MatchResult {
        let type_name = self.inventory.type_name(impl_ty.as_type_ref());
        let mut bindings = Vec::with_capacity(spec.len());
        let mut issues = Vec::new();
        for op in &spec.operations {
            let binding = self.resolve(impl_ty, op);
            tracing::trace!(
                operation = self.inventory.member_name(op.name),
                kind = op.kind.describe(),
                bound = binding.is_some(),
                "resolved operation"
            );
            match binding {
                Some(binding) => bindings.push(binding),
                None => issues.push(MatchIssue {
                    operation: self.inventory.member_name(op.name).to_string(),
                    kind: op.kind.describe(),
                    signature: op.signature(self.inventory),
                    type_name: type_name.clone(),
                }),
            }
        }
        let satisfied = issues.is_empty() && bindings.len() == spec.len();
        tracing::debug!(%type_name, satisfied, issues = issues.len(), "matched contract");
        MatchResult {
            impl_ty,
            type_name,
            contract: spec.contract,
            contract_name: spec.name.clone(),
            satisfied,
            static_only: spec.is_static_only(),
            bindings,
            issues,
        }
    }

    /// Resolve a single operation.
    pub fn resolve(&self, impl_ty: ImplTy, op: &OperationDescriptor) -> Option<Binding> {
        match op.kind {
            OperationKind::Method => self.resolve_method(impl_ty, op, MemberFilter::INSTANCE),
            OperationKind::StaticMethod => self.resolve_method(impl_ty, op, MemberFilter::STATIC),
            OperationKind::ExplicitConversion => {
                self.resolve_conversion(impl_ty, op, ConversionKind::Explicit)
            }
            OperationKind::ImplicitConversion => {
                self.resolve_conversion(impl_ty, op, ConversionKind::Implicit)
            }
            OperationKind::BinaryOperator { side, .. } => self.resolve_operator(impl_ty, op, side),
            OperationKind::PropertyGet | OperationKind::PropertySet => {
                self.resolve_property(impl_ty, op)
            }
        }
    }

    fn coerce(&self, from: TypeRef, to: TypeRef) -> Option<Coercion> {
        Coercion::classify(self.inventory, from, to)
    }

    /// `void` returns only match `void`.
    fn coerce_return(&self, from: TypeRef, to: TypeRef) -> Option<Coercion> {
        if from.is_void() || to.is_void() {
            return (from == to).then_some(Coercion::Identity);
        }
        self.coerce(from, to)
    }

    fn resolve_method(
        &self,
        impl_ty: ImplTy,
        op: &OperationDescriptor,
        filter: MemberFilter,
    ) -> Option<Binding> {
        let shape = op.shape();
        self.inventory
            .generic_methods(
                impl_ty,
                op.name,
                &shape,
                filter,
                self.config.allow_parameter_substitution,
            )
            .into_iter()
            .filter_map(|method| {
                let args = op
                    .params
                    .iter()
                    .zip(&method.params)
                    .map(|(&required, &param)| self.coerce(required, param))
                    .collect::<Option<SmallVec<_>>>()?;
                let ret = self.coerce_return(method.ret, op.ret)?;
                Some(Binding {
                    args,
                    ret,
                    ..Binding::new(op, BindingTarget::Method(method.clone()))
                })
            })
            // `min_by_key` keeps the first of equal candidates.
            .min_by_key(Binding::cost)
    }

    fn resolve_conversion(
        &self,
        impl_ty: ImplTy,
        op: &OperationDescriptor,
        kind: ConversionKind,
    ) -> Option<Binding> {
        let source = impl_ty.as_type_ref();
        if let Some(conversion) = self
            .inventory
            .conversions(impl_ty, kind)
            .into_iter()
            .find(|c| c.target == op.ret)
        {
            return Some(Binding::new(
                op,
                BindingTarget::Conversion(conversion.clone()),
            ));
        }
        if self.config.use_fallback_table {
            if let Some(entry) = find_conversion(kind, source, op.ret) {
                return Some(Binding::new(op, BindingTarget::Fallback(entry)));
            }
        }
        (op.ret == source).then(|| Binding::new(op, BindingTarget::Identity))
    }

    fn resolve_operator(
        &self,
        impl_ty: ImplTy,
        op: &OperationDescriptor,
        side: OpSide,
    ) -> Option<Binding> {
        let OperationKind::BinaryOperator { op: symbol, .. } = op.kind else {
            return None;
        };
        let this = impl_ty.as_type_ref();
        let other = *op.params.first()?;
        let (left, right) = side.arrange(this, other);

        let mut owners: SmallVec<[ImplTy; 2]> = smallvec![impl_ty];
        if self.config.search_operand_operators {
            if let Some(owner @ ImplTy::Named(_)) = other.as_impl() {
                if owner != impl_ty {
                    owners.push(owner);
                }
            }
        }
        for owner in owners {
            let declared = self
                .inventory
                .operators(owner, Some(symbol))
                .into_iter()
                .filter_map(|def| {
                    let (receiver, arg) =
                        self.coerce_operands(side, left, right, def.left, def.right)?;
                    let ret = self.coerce_return(def.ret, op.ret)?;
                    Some(Binding {
                        receiver,
                        args: smallvec![arg],
                        ret,
                        ..Binding::new(op, BindingTarget::Operator(def.clone()))
                    })
                })
                .min_by_key(Binding::cost);
            if declared.is_some() {
                return declared;
            }
        }

        if !self.config.use_fallback_table {
            return None;
        }
        let entry = find_operator(self.inventory, symbol, left, right, op.ret)?;
        let (receiver, arg) =
            self.coerce_operands(side, left, right, entry.left, entry.right?)?;
        let ret = self.coerce_return(entry.result, op.ret)?;
        Some(Binding {
            receiver,
            args: smallvec![arg],
            ret,
            ..Binding::new(op, BindingTarget::Fallback(entry))
        })
    }

    /// Coercions of `(instance, argument)` into an operator's operand slots.
    fn coerce_operands(
        &self,
        side: OpSide,
        left: TypeRef,
        right: TypeRef,
        slot_left: TypeRef,
        slot_right: TypeRef,
    ) -> Option<(Coercion, Coercion)> {
        let left = self.coerce(left, slot_left)?;
        let right = self.coerce(right, slot_right)?;
        Some(match side {
            OpSide::ReceiverLeft => (left, right),
            OpSide::ReceiverRight => (right, left),
        })
    }

    fn resolve_property(&self, impl_ty: ImplTy, op: &OperationDescriptor) -> Option<Binding> {
        let property = self.inventory.property(impl_ty, op.name)?;
        let target = || BindingTarget::Property(property.clone());
        match op.kind {
            OperationKind::PropertyGet => {
                property.getter.as_ref()?;
                let ret = self.coerce(property.ty, op.ret)?;
                Some(Binding {
                    ret,
                    ..Binding::new(op, target())
                })
            }
            OperationKind::PropertySet => {
                property.setter.as_ref()?;
                let arg = self.coerce(*op.params.first()?, property.ty)?;
                Some(Binding {
                    args: smallvec![arg],
                    ..Binding::new(op, target())
                })
            }
            _ => None,
        }
    }
}
