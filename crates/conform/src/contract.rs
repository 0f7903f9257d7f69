//! Contract extraction.
//!
//! A contract declaration is flattened into a `ContractSpec`: its own
//! members first, then each parent contract's members in declaration
//! order. A contract reached twice (a diamond) is visited once, and
//! identical operations are kept once.

use conform_ir::{BinaryOp, GenericParam, Name, OpSide, TypeIdx, TypeRef, Visibility};
use conform_types::{
    ContractDecl, ContractMember, ContractSource, MemberInventory, MemberTag, MethodShape,
    TypeKind,
};
use rustc_hash::FxHashSet;

use crate::error::{invalid_shape, Result};

/// What an operation asks of the implementation type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperationKind {
    Method,
    StaticMethod,
    ExplicitConversion,
    ImplicitConversion,
    BinaryOperator { op: BinaryOp, side: OpSide },
    PropertyGet,
    PropertySet,
}

impl OperationKind {
    fn from_tag(tag: MemberTag) -> Self {
        match tag {
            MemberTag::Method => OperationKind::Method,
            MemberTag::Static => OperationKind::StaticMethod,
            MemberTag::Cast => OperationKind::ExplicitConversion,
            MemberTag::Implicit => OperationKind::ImplicitConversion,
            MemberTag::Operator { op, side } => OperationKind::BinaryOperator { op, side },
            MemberTag::Getter => OperationKind::PropertyGet,
            MemberTag::Setter => OperationKind::PropertySet,
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self == OperationKind::StaticMethod
    }

    pub fn describe(self) -> &'static str {
        match self {
            OperationKind::Method => "method",
            OperationKind::StaticMethod => "static method",
            OperationKind::ExplicitConversion => "explicit conversion",
            OperationKind::ImplicitConversion => "implicit conversion",
            OperationKind::BinaryOperator { .. } => "operator",
            OperationKind::PropertyGet => "property getter",
            OperationKind::PropertySet => "property setter",
        }
    }
}

/// One required operation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OperationDescriptor {
    pub name: Name,
    pub kind: OperationKind,
    pub params: Vec<TypeRef>,
    pub ret: TypeRef,
    pub generics: Vec<GenericParam>,
}

impl OperationDescriptor {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The signature a candidate method must unify with.
    pub fn shape(&self) -> MethodShape<'_> {
        MethodShape {
            params: &self.params,
            ret: self.ret,
            generics: &self.generics,
        }
    }

    /// Human-readable signature, e.g. `add(i32) -> i32` or `i32 + Point`.
    pub fn signature<I: MemberInventory + ?Sized>(&self, inventory: &I) -> String {
        let name = inventory.member_name(self.name);
        let head = match self.kind {
            OperationKind::BinaryOperator { op, side } => {
                let other = self
                    .params
                    .first()
                    .map_or_else(|| "?".to_string(), |&ty| inventory.type_name(ty));
                let (left, right) = side.arrange("self".to_string(), other);
                format!("{name}: {left} {op} {right}")
            }
            _ => {
                let params: Vec<String> = self
                    .params
                    .iter()
                    .map(|&ty| inventory.type_name(ty))
                    .collect();
                format!("{name}({})", params.join(", "))
            }
        };
        if self.ret.is_void() {
            head
        } else {
            format!("{head} -> {}", inventory.type_name(self.ret))
        }
    }

    fn from_member(member: &ContractMember) -> Self {
        OperationDescriptor {
            name: member.name,
            kind: OperationKind::from_tag(member.tag),
            params: member.params.clone(),
            ret: member.ret,
            generics: member.generics.clone(),
        }
    }
}

/// A flattened contract.
#[derive(Clone, Debug)]
pub struct ContractSpec {
    pub contract: TypeIdx,
    pub name: String,
    pub operations: Vec<OperationDescriptor>,
}

impl ContractSpec {
    /// Whether every operation is a static method (vacuously true for an
    /// empty contract).
    pub fn is_static_only(&self) -> bool {
        self.operations.iter().all(|op| op.kind.is_static())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Flatten and validate the contract declared at `contract`.
pub fn extract<S>(source: &S, contract: TypeIdx) -> Result<ContractSpec>
where
    S: ContractSource + MemberInventory + ?Sized,
{
    let mut extractor = Extractor {
        source,
        visited: FxHashSet::default(),
        seen: FxHashSet::default(),
        operations: Vec::new(),
    };
    let root = extractor.visit(contract)?;
    Ok(ContractSpec {
        contract,
        name: root,
        operations: extractor.operations,
    })
}

struct Extractor<'s, S: ?Sized> {
    source: &'s S,
    visited: FxHashSet<TypeIdx>,
    seen: FxHashSet<OperationDescriptor>,
    operations: Vec<OperationDescriptor>,
}

impl<S> Extractor<'_, S>
where
    S: ContractSource + MemberInventory + ?Sized,
{
    /// Visit `idx` and its parents; returns the contract's name.
    fn visit(&mut self, idx: TypeIdx) -> Result<String> {
        let source = self.source;
        let decl = source
            .contract(idx)
            .ok_or_else(|| invalid_shape(format!("no type is registered at index {}", idx.raw())))?;
        let name = source.member_name(decl.name).to_string();
        if !self.visited.insert(idx) {
            return Ok(name);
        }
        check_decl(&decl, &name)?;
        for member in decl.members {
            let op = OperationDescriptor::from_member(member);
            self.check_operation(&op, &name)?;
            if self.seen.insert(op.clone()) {
                self.operations.push(op);
            }
        }
        for &parent in decl.parents {
            self.visit(parent)?;
        }
        Ok(name)
    }

    fn check_operation(&self, op: &OperationDescriptor, contract: &str) -> Result<()> {
        let member = self.source.member_name(op.name);
        let fail = |what: &str| {
            Err(invalid_shape(format!(
                "{} `{member}` of {contract} {what}",
                op.kind.describe()
            )))
        };
        if let Some(param) = op.generics.iter().find(|g| !g.is_consistent()) {
            return fail(&format!(
                "constrains `{}` to both reference and value types",
                self.source.member_name(param.name)
            ));
        }
        let generic_count = op.generics.len();
        let out_of_range =
            |ty: &TypeRef| matches!(*ty, TypeRef::Param(i) if i as usize >= generic_count);
        if op.params.iter().chain(std::iter::once(&op.ret)).any(out_of_range) {
            return fail("refers to an undeclared generic parameter");
        }
        if op.params.iter().any(|ty| ty.is_void()) {
            return fail("has a void parameter");
        }
        match op.kind {
            OperationKind::ExplicitConversion | OperationKind::ImplicitConversion => {
                if !op.params.is_empty() {
                    return fail("must take no parameters");
                }
                if op.ret.is_void() {
                    return fail("must return a value");
                }
            }
            OperationKind::BinaryOperator { .. } => {
                if op.params.len() != 1 {
                    return fail("must take exactly one operand");
                }
            }
            OperationKind::PropertyGet => {
                if !op.params.is_empty() || op.ret.is_void() {
                    return fail("must take no parameters and return a value");
                }
            }
            OperationKind::PropertySet => {
                if op.params.len() != 1 || !op.ret.is_void() {
                    return fail("must take one parameter and return void");
                }
            }
            OperationKind::Method | OperationKind::StaticMethod => {}
        }
        Ok(())
    }
}

fn check_decl(decl: &ContractDecl<'_>, name: &str) -> Result<()> {
    if decl.kind != TypeKind::Contract {
        return Err(invalid_shape(format!(
            "{name} is a {}, not a contract",
            decl.kind.keyword()
        )));
    }
    if decl.visibility != Visibility::Public {
        return Err(invalid_shape(format!("contract {name} is not public")));
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
