//! Provider configuration.

/// Knobs controlling how a `ContractProvider` matches.
///
/// ```
/// use conform::ProviderConfig;
///
/// let config = ProviderConfig::default().allow_parameter_substitution(true);
/// assert!(config.allow_parameter_substitution);
/// assert!(config.use_fallback_table);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ProviderConfig {
    /// Let a method whose parameters are less derived than the contract's
    /// stand in for it (contravariant parameters).
    pub allow_parameter_substitution: bool,
    /// Consult the primitive fallback table for conversions and operators.
    pub use_fallback_table: bool,
    /// Search operators declared on the other operand's type too.
    pub search_operand_operators: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            allow_parameter_substitution: false,
            use_fallback_table: true,
            search_operand_operators: true,
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn allow_parameter_substitution(mut self, allow: bool) -> Self {
        self.allow_parameter_substitution = allow;
        self
    }

    #[must_use]
    pub fn use_fallback_table(mut self, enabled: bool) -> Self {
        self.use_fallback_table = enabled;
        self
    }

    #[must_use]
    pub fn search_operand_operators(mut self, enabled: bool) -> Self {
        self.search_operand_operators = enabled;
        self
    }
}

#[cfg(test)]
mod tests;
