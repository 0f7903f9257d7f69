//! Result cache behavior observed through `ContractProvider`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::collections::HashSet;

use conform::{
    premade, shared_registry, AdapterId, Builtin, ContractProvider, ImplTy, SharedInterner,
    TypeRef, TypeRegistry, Value,
};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn provider() -> ContractProvider {
    ContractProvider::new(TypeRegistry::with_prelude(SharedInterner::new()))
}

#[test]
fn matcher_runs_once_per_key() {
    let provider = provider();
    let addable =
        premade::addable(&mut provider.registry().write(), TypeRef::I32, TypeRef::I32)
            .expect("declare");
    let i32_ty = ImplTy::Builtin(Builtin::I32);

    for _ in 0..3 {
        assert!(provider.check_satisfies(i32_ty, addable).expect("checked"));
    }
    let stats = provider.cache_stats();
    assert_eq!(stats.matcher_runs, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.syntheses, 0);

    let first = provider.convert(Value::I32(1), addable).expect("adapter");
    let runs_after_first = provider.cache_stats();
    assert_eq!(runs_after_first.syntheses, 1);

    for n in 0..10 {
        let adapter = provider.convert(Value::I32(n), addable).expect("adapter");
        assert_eq!(adapter.adapter_type().id(), first.adapter_type().id());
    }
    let stats = provider.cache_stats();
    assert_eq!(stats.matcher_runs, 1);
    assert_eq!(stats.syntheses, 1);
    assert_eq!(stats.discarded_syntheses, 0);
}

#[test]
fn unsatisfied_results_are_cached_too() {
    let provider = provider();
    let addable =
        premade::addable(&mut provider.registry().write(), TypeRef::I32, TypeRef::I32)
            .expect("declare");
    let bool_ty = ImplTy::Builtin(Builtin::Bool);

    assert!(!provider.check_satisfies(bool_ty, addable).expect("checked"));
    assert!(provider.convert(Value::Bool(true), addable).is_err());
    assert!(!provider.check_satisfies(bool_ty, addable).expect("checked"));
    let stats = provider.cache_stats();
    assert_eq!(stats.matcher_runs, 1);
    assert_eq!(stats.syntheses, 0);
}

#[test]
fn clear_cache_forces_a_new_match() {
    let provider = provider();
    let stringable = premade::stringable(&mut provider.registry().write()).expect("declare");
    let before = provider.convert(Value::I32(1), stringable).expect("adapter");

    provider.clear_cache();
    let after = provider.convert(Value::I32(1), stringable).expect("adapter");
    assert_ne!(before.adapter_type().id(), after.adapter_type().id());
    assert_eq!(provider.cache_stats().matcher_runs, 2);
}

#[test]
fn providers_do_not_share_adapter_types() {
    let shared = shared_registry(TypeRegistry::with_prelude(SharedInterner::new()));
    let stringable = premade::stringable(&mut shared.write()).expect("declare");
    let one = ContractProvider::builder_shared(shared.clone()).build();
    let two = ContractProvider::builder_shared(shared).build();

    let a = one.convert(Value::I32(1), stringable).expect("adapter");
    let b = two.convert(Value::I32(1), stringable).expect("adapter");
    assert_ne!(a.adapter_type().id(), b.adapter_type().id());
}

#[test]
fn concurrent_resolution_agrees_on_one_adapter_type() {
    let provider = provider();
    let addable =
        premade::addable(&mut provider.registry().write(), TypeRef::I32, TypeRef::I32)
            .expect("declare");

    let results: Vec<(AdapterId, Value)> = (0..256)
        .into_par_iter()
        .map(|n| {
            let adapter = provider.convert(Value::I32(n), addable).expect("adapter");
            let sum = adapter.call("add", &[Value::I32(1)]).expect("add");
            (adapter.adapter_type().id(), sum)
        })
        .collect();

    let ids: HashSet<AdapterId> = results.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), 1);
    for (n, (_, sum)) in (0..256).zip(&results) {
        assert_eq!(*sum, Value::I32(n + 1));
    }
    let stats = provider.cache_stats();
    assert_eq!(stats.syntheses - stats.discarded_syntheses, 1);
}

#[test]
fn concurrent_resolution_of_distinct_keys() {
    let provider = provider();
    let stringable = premade::stringable(&mut provider.registry().write()).expect("declare");
    let values = [
        Value::I32(1),
        Value::I64(2),
        Value::Bool(true),
        Value::string("s"),
        Value::F64(0.5),
        Value::U8(3),
    ];

    let texts: Vec<Value> = values
        .par_iter()
        .map(|value| {
            provider
                .convert(value.clone(), stringable)
                .and_then(|adapter| Ok(adapter.call("to_string", &[])?))
                .expect("to_string")
        })
        .collect();

    let expected: Vec<Value> = ["1", "2", "true", "s", "0.5", "3"]
        .into_iter()
        .map(Value::string)
        .collect();
    assert_eq!(texts, expected);
    assert_eq!(provider.cache_stats().matcher_runs, 6);
}
