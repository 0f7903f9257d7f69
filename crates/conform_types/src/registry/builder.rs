//! Owned builders for declaring types and contracts.

use conform_ir::{
    BinaryOp, ConversionKind, GenericParam, ImplTy, OpSide, SharedInterner, TypeIdx, TypeRef,
    Visibility,
};
use conform_value::{receiver_object, EvalResult, NativeFn, Value};

use crate::defs::{
    ContractMember, ConversionDef, MemberTag, MethodDef, OperatorDef, PropertyDef, TypeMembers,
};

/// Collects the members of a class, struct or built-in.
///
/// Created by `TypeRegistry::define_class` and friends; the registry applies
/// the collected members once the build closure returns.
#[must_use]
pub struct TypeBuilder {
    interner: SharedInterner,
    target: ImplTy,
    visibility: Option<Visibility>,
    base: Option<TypeIdx>,
    implements: Vec<TypeIdx>,
    members: TypeMembers,
}

pub(super) struct TypeParts {
    pub target: ImplTy,
    pub visibility: Option<Visibility>,
    pub base: Option<TypeIdx>,
    pub implements: Vec<TypeIdx>,
    pub members: TypeMembers,
}

impl TypeBuilder {
    pub(super) fn new(interner: SharedInterner, target: ImplTy) -> Self {
        TypeBuilder {
            interner,
            target,
            visibility: None,
            base: None,
            implements: Vec::new(),
            members: TypeMembers::default(),
        }
    }

    pub(super) fn into_parts(self) -> TypeParts {
        TypeParts {
            target: self.target,
            visibility: self.visibility,
            base: self.base,
            implements: self.implements,
            members: self.members,
        }
    }

    /// The type being built, for use in member signatures.
    #[inline]
    pub fn self_ty(&self) -> TypeRef {
        self.target.as_type_ref()
    }

    /// A generic parameter named `name`.
    pub fn param(&self, name: &str) -> GenericParam {
        GenericParam::new(self.interner.intern(name))
    }

    pub fn private(mut self) -> Self {
        self.visibility = Some(Visibility::Private);
        self
    }

    pub fn base(mut self, base: TypeIdx) -> Self {
        self.base = Some(base);
        self
    }

    /// Nominally implement a contract.
    pub fn implements(mut self, contract: TypeIdx) -> Self {
        self.implements.push(contract);
        self
    }

    /// Public instance method.
    pub fn method(
        self,
        name: &str,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.push_method(name, Vec::new(), params, ret, false, Visibility::Public, body)
    }

    /// Public static method.
    pub fn static_method(
        self,
        name: &str,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.push_method(name, Vec::new(), params, ret, true, Visibility::Public, body)
    }

    /// Instance method invisible to the member inventory.
    pub fn private_method(
        self,
        name: &str,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.push_method(name, Vec::new(), params, ret, false, Visibility::Private, body)
    }

    /// Public instance method with method-level generic parameters.
    pub fn generic_method(
        self,
        name: &str,
        generics: Vec<GenericParam>,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.push_method(name, generics, params, ret, false, Visibility::Public, body)
    }

    #[expect(clippy::too_many_arguments, reason = "private funnel for the method setters")]
    fn push_method(
        mut self,
        name: &str,
        generics: Vec<GenericParam>,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
        is_static: bool,
        visibility: Visibility,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let name = self.interner.intern(name);
        self.members.methods.push(MethodDef {
            name,
            params: params.into_iter().collect(),
            ret,
            generics,
            is_static,
            visibility,
            body: NativeFn::new(body),
        });
        self
    }

    /// A fully spelled-out method.
    pub fn method_def(mut self, def: MethodDef) -> Self {
        self.members.methods.push(def);
        self
    }

    /// Binary operator `left op right -> ret`. The body receives `[left, right]`.
    pub fn operator(
        mut self,
        op: BinaryOp,
        left: TypeRef,
        right: TypeRef,
        ret: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.members.operators.push(OperatorDef {
            op,
            left,
            right,
            ret,
            body: NativeFn::new(body),
        });
        self
    }

    /// Explicit conversion from this type to `target`.
    pub fn explicit_conversion(
        self,
        target: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let source = self.self_ty();
        self.conversion(ConversionKind::Explicit, source, target, body)
    }

    /// Implicit conversion from this type to `target`.
    pub fn implicit_conversion(
        self,
        target: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let source = self.self_ty();
        self.conversion(ConversionKind::Implicit, source, target, body)
    }

    /// Conversion from `source` into this type.
    pub fn conversion_from(
        self,
        kind: ConversionKind,
        source: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let target = self.self_ty();
        self.conversion(kind, source, target, body)
    }

    fn conversion(
        mut self,
        kind: ConversionKind,
        source: TypeRef,
        target: TypeRef,
        body: impl Fn(Option<&Value>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.members.conversions.push(ConversionDef {
            kind,
            source,
            target,
            body: NativeFn::new(body),
        });
        self
    }

    /// Property with explicit accessors.
    pub fn property(
        mut self,
        name: &str,
        ty: TypeRef,
        getter: Option<NativeFn>,
        setter: Option<NativeFn>,
    ) -> Self {
        let name = self.interner.intern(name);
        self.members.properties.push(PropertyDef {
            name,
            ty,
            visibility: Visibility::Public,
            getter,
            setter,
        });
        self
    }

    /// Read/write property backed by the object field of the same name.
    pub fn field_property(self, name: &str, ty: TypeRef) -> Self {
        let (getter, setter) = field_accessors(name);
        self.property(name, ty, Some(getter), Some(setter))
    }

    /// Read-only property backed by the object field of the same name.
    pub fn readonly_field(self, name: &str, ty: TypeRef) -> Self {
        let (getter, _) = field_accessors(name);
        self.property(name, ty, Some(getter), None)
    }
}

fn field_accessors(name: &str) -> (NativeFn, NativeFn) {
    let get_name = name.to_string();
    let set_name = name.to_string();
    let getter = NativeFn::new(move |recv, _| receiver_object(recv, &get_name)?.field(&get_name));
    let setter = NativeFn::new(move |recv, args| {
        let obj = receiver_object(recv, &set_name)?;
        let value = args.first().cloned().unwrap_or(Value::Null);
        obj.set_field(&set_name, value);
        Ok(Value::Void)
    });
    (getter, setter)
}

/// Collects the requirements of a contract.
#[must_use]
pub struct ContractBuilder {
    interner: SharedInterner,
    idx: TypeIdx,
    visibility: Visibility,
    parents: Vec<TypeIdx>,
    members: Vec<ContractMember>,
}

pub(super) struct ContractParts {
    pub visibility: Visibility,
    pub parents: Vec<TypeIdx>,
    pub members: Vec<ContractMember>,
}

impl ContractBuilder {
    pub(super) fn new(interner: SharedInterner, idx: TypeIdx) -> Self {
        ContractBuilder {
            interner,
            idx,
            visibility: Visibility::Public,
            parents: Vec::new(),
            members: Vec::new(),
        }
    }

    pub(super) fn into_parts(self) -> ContractParts {
        ContractParts {
            visibility: self.visibility,
            parents: self.parents,
            members: self.members,
        }
    }

    /// The contract itself, for use in member signatures.
    #[inline]
    pub fn self_ty(&self) -> TypeRef {
        TypeRef::Named(self.idx)
    }

    /// A generic parameter named `name`.
    pub fn param(&self, name: &str) -> GenericParam {
        GenericParam::new(self.interner.intern(name))
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Inherit every requirement of `parent`.
    pub fn extends(mut self, parent: TypeIdx) -> Self {
        self.parents.push(parent);
        self
    }

    /// A raw requirement; shape is validated when the contract is extracted.
    pub fn member(mut self, member: ContractMember) -> Self {
        self.members.push(member);
        self
    }

    fn push(
        self,
        name: &str,
        tag: MemberTag,
        generics: Vec<GenericParam>,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
    ) -> Self {
        let name = self.interner.intern(name);
        self.member(ContractMember {
            name,
            tag,
            params: params.into_iter().collect(),
            ret,
            generics,
        })
    }

    pub fn method(self, name: &str, params: impl IntoIterator<Item = TypeRef>, ret: TypeRef) -> Self {
        self.push(name, MemberTag::Method, Vec::new(), params, ret)
    }

    pub fn static_method(
        self,
        name: &str,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
    ) -> Self {
        self.push(name, MemberTag::Static, Vec::new(), params, ret)
    }

    pub fn generic_method(
        self,
        name: &str,
        generics: Vec<GenericParam>,
        params: impl IntoIterator<Item = TypeRef>,
        ret: TypeRef,
    ) -> Self {
        self.push(name, MemberTag::Method, generics, params, ret)
    }

    /// Require an explicit conversion to `target`, exposed as `name`.
    pub fn explicit_conversion(self, name: &str, target: TypeRef) -> Self {
        self.push(name, MemberTag::Cast, Vec::new(), [], target)
    }

    /// Require an implicit conversion to `target`, exposed as `name`.
    pub fn implicit_conversion(self, name: &str, target: TypeRef) -> Self {
        self.push(name, MemberTag::Implicit, Vec::new(), [], target)
    }

    /// Require `receiver op other` (or `other op receiver`) exposed as `name`.
    pub fn operator(
        self,
        name: &str,
        op: BinaryOp,
        side: OpSide,
        other: TypeRef,
        ret: TypeRef,
    ) -> Self {
        self.push(name, MemberTag::Operator { op, side }, Vec::new(), [other], ret)
    }

    /// Require a readable property.
    pub fn getter(self, name: &str, ty: TypeRef) -> Self {
        self.push(name, MemberTag::Getter, Vec::new(), [], ty)
    }

    /// Require a writable property.
    pub fn setter(self, name: &str, ty: TypeRef) -> Self {
        self.push(name, MemberTag::Setter, Vec::new(), [ty], TypeRef::VOID)
    }

    /// Require a readable and writable property.
    pub fn property(self, name: &str, ty: TypeRef) -> Self {
        self.getter(name, ty).setter(name, ty)
    }
}
