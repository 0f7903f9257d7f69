use super::*;
use pretty_assertions::assert_eq;

#[test]
fn defaults() {
    let config = ProviderConfig::default();
    assert!(!config.allow_parameter_substitution);
    assert!(config.use_fallback_table);
    assert!(config.search_operand_operators);
}

#[test]
fn setters_chain() {
    let config = ProviderConfig::default()
        .allow_parameter_substitution(true)
        .use_fallback_table(false)
        .search_operand_operators(false);
    assert_eq!(
        config,
        ProviderConfig {
            allow_parameter_substitution: true,
            use_fallback_table: false,
            search_operand_operators: false,
        }
    );
}
