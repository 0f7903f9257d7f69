//! Dynamic conversion through the premade conversion contracts.

use conform_ir::{TypeIdx, TypeRef};
use conform_value::Value;

use crate::error::{ConformError, Result};
use crate::premade::{
    castable_to, find_castable_to, find_implicitly_convertible_to, implicitly_convertible_to,
};
use crate::provider::ContractProvider;

impl ContractProvider {
    /// Whether `value` has an explicit or implicit conversion to `target`.
    pub fn can_convert_to(&self, value: &Value, target: TypeRef) -> Result<bool> {
        let (explicit, implicit) = self.conversion_contracts(target)?;
        Ok(self.satisfies(value, explicit)? || self.satisfies(value, implicit)?)
    }

    /// Convert `value` to `target`, trying the explicit conversion first.
    #[tracing::instrument(level = "debug", skip_all, fields(?target))]
    pub fn convert_to(&self, value: Value, target: TypeRef) -> Result<Value> {
        let (explicit, implicit) = self.conversion_contracts(target)?;
        if self.satisfies(&value, explicit)? {
            return Ok(self.convert(value, explicit)?.call("cast", &[])?);
        }
        if self.satisfies(&value, implicit)? {
            return Ok(self.convert(value, implicit)?.call("convert", &[])?);
        }
        if value.runtime_type().is_none() {
            return Err(ConformError::NoRuntimeType {
                value: value.to_string(),
            });
        }
        let registry = self.registry().read();
        Err(ConformError::NoConversion {
            from: registry.value_type_name(&value),
            to: registry.display(target),
        })
    }

    /// The conversion contracts for `target`. Declaring them takes the
    /// write lock only the first time.
    fn conversion_contracts(&self, target: TypeRef) -> Result<(TypeIdx, TypeIdx)> {
        {
            let registry = self.registry().read();
            if let (Some(explicit), Some(implicit)) = (
                find_castable_to(&registry, target),
                find_implicitly_convertible_to(&registry, target),
            ) {
                return Ok((explicit, implicit));
            }
        }
        let mut registry = self.registry().write();
        Ok((
            castable_to(&mut registry, target)?,
            implicitly_convertible_to(&mut registry, target)?,
        ))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for clarity")]
mod tests;
