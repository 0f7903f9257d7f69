//! The contract provider: public entry points for matching and conversion.

use std::sync::Arc;

use conform_ir::{ImplTy, TypeIdx};
use conform_types::{MemberInventory, TypeRegistry};
use conform_value::Value;
use parking_lot::RwLock;

use crate::adapter::Adapter;
use crate::cache::{CacheEntry, CacheStats, ResultCache};
use crate::config::ProviderConfig;
use crate::contract::extract;
use crate::error::{invalid_shape, ConformError, Result};
use crate::matcher::{MatchResult, Matcher};
use crate::synth::AdapterType;

/// Registry handle shared by providers and the adapter types they
/// synthesize. Adapters take the read lock per call.
pub type SharedRegistry = Arc<RwLock<TypeRegistry>>;

/// Wrap `registry` so several providers can match against it.
pub fn shared_registry(registry: TypeRegistry) -> SharedRegistry {
    Arc::new(RwLock::new(registry))
}

/// Matches implementation types against contracts and hands out adapters.
///
/// Owns its result cache: two providers never share adapter types. The
/// registry is shared and may be extended while the provider is in use;
/// cached results for a key are not revisited, so declare a type's members
/// before matching it (or call `clear_cache`).
pub struct ContractProvider {
    registry: SharedRegistry,
    config: ProviderConfig,
    cache: ResultCache,
}

/// Builder for `ContractProvider`.
#[must_use]
pub struct ContractProviderBuilder {
    registry: SharedRegistry,
    config: ProviderConfig,
}

impl ContractProviderBuilder {
    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn allow_parameter_substitution(mut self, allow: bool) -> Self {
        self.config = self.config.allow_parameter_substitution(allow);
        self
    }

    pub fn use_fallback_table(mut self, enabled: bool) -> Self {
        self.config = self.config.use_fallback_table(enabled);
        self
    }

    pub fn search_operand_operators(mut self, enabled: bool) -> Self {
        self.config = self.config.search_operand_operators(enabled);
        self
    }

    pub fn build(self) -> ContractProvider {
        ContractProvider {
            registry: self.registry,
            config: self.config,
            cache: ResultCache::new(),
        }
    }
}

impl ContractProvider {
    /// Provider with the default configuration.
    pub fn new(registry: TypeRegistry) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: TypeRegistry) -> ContractProviderBuilder {
        Self::builder_shared(shared_registry(registry))
    }

    /// Builder over a registry shared with other providers.
    pub fn builder_shared(registry: SharedRegistry) -> ContractProviderBuilder {
        ContractProviderBuilder {
            registry,
            config: ProviderConfig::default(),
        }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn config(&self) -> ProviderConfig {
        self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every cached match and adapter type.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Whether `impl_ty` satisfies `contract`.
    #[tracing::instrument(level = "debug", skip_all, fields(?impl_ty, contract = contract.raw()))]
    pub fn check_satisfies(&self, impl_ty: ImplTy, contract: TypeIdx) -> Result<bool> {
        Ok(match self.lookup(impl_ty, contract)? {
            CacheEntry::Adapter(_) => true,
            CacheEntry::Matched(result) => result.satisfied,
        })
    }

    /// Whether the runtime type of `value` satisfies `contract`.
    ///
    /// Values without a runtime type (`null`, `void`) satisfy nothing.
    pub fn satisfies(&self, value: &Value, contract: TypeIdx) -> Result<bool> {
        match value.runtime_type() {
            Some(impl_ty) => self.check_satisfies(impl_ty, contract),
            None => Ok(false),
        }
    }

    /// The full match result, issues included, without raising.
    #[tracing::instrument(level = "debug", skip_all, fields(?impl_ty, contract = contract.raw()))]
    pub fn explain(&self, impl_ty: ImplTy, contract: TypeIdx) -> Result<Arc<MatchResult>> {
        Ok(Arc::clone(self.lookup(impl_ty, contract)?.match_result()))
    }

    /// View `instance` through `contract`.
    #[tracing::instrument(level = "debug", skip_all, fields(contract = contract.raw()))]
    pub fn convert(&self, instance: Value, contract: TypeIdx) -> Result<Adapter> {
        let impl_ty = instance
            .runtime_type()
            .ok_or_else(|| ConformError::NoRuntimeType {
                value: instance.to_string(),
            })?;
        let ty = self.adapter_type(impl_ty, contract)?;
        Ok(Adapter::new(ty, Some(instance)))
    }

    /// An adapter with no instance, for contracts made only of static
    /// methods.
    #[tracing::instrument(level = "debug", skip_all, fields(?impl_ty, contract = contract.raw()))]
    pub fn convert_static(&self, impl_ty: ImplTy, contract: TypeIdx) -> Result<Adapter> {
        let entry = self.lookup(impl_ty, contract)?;
        let result = entry.match_result();
        if !result.static_only {
            return Err(ConformError::NullInstanceWithoutStaticOnlyContract {
                contract: result.contract_name.clone(),
            });
        }
        let ty = self.adapter_type(impl_ty, contract)?;
        Ok(Adapter::new(ty, None))
    }

    /// The adapter type for a satisfied pair, synthesizing it on first use.
    pub fn adapter_type(&self, impl_ty: ImplTy, contract: TypeIdx) -> Result<Arc<AdapterType>> {
        let result = match self.lookup(impl_ty, contract)? {
            CacheEntry::Adapter(ty) => return Ok(ty),
            CacheEntry::Matched(result) => result,
        };
        if !result.satisfied {
            return Err(ConformError::ContractUnsatisfied {
                type_name: result.type_name.clone(),
                contract: result.contract_name.clone(),
                issues: result.issues.clone(),
            });
        }
        let ty = {
            let registry = self.registry.read();
            AdapterType::synthesize(result, &registry, self.registry.clone())
        };
        Ok(self.cache.publish((impl_ty, contract), Arc::new(ty)))
    }

    /// Cached entry for the pair, running the matcher on a miss.
    fn lookup(&self, impl_ty: ImplTy, contract: TypeIdx) -> Result<CacheEntry> {
        let key = (impl_ty, contract);
        if let Some(entry) = self.cache.get(key) {
            tracing::debug!("cache hit");
            return Ok(entry);
        }
        tracing::debug!("cache miss");
        let result = {
            let registry = self.registry.read();
            if !registry.is_public(impl_ty) {
                return Err(invalid_shape(format!(
                    "{} is not public",
                    registry.type_name(impl_ty.as_type_ref())
                )));
            }
            let spec = extract(&*registry, contract)?;
            Matcher::new(&*registry, self.config).run(impl_ty, &spec)
        };
        Ok(self.cache.record_match(key, Arc::new(result)))
    }
}

impl std::fmt::Debug for ContractProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractProvider")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
