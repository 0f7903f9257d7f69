use super::*;
use pretty_assertions::assert_eq;

#[test]
fn intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("Value");
    let b = interner.intern("Value");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "Value");
}

#[test]
fn distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let add = interner.intern("Add");
    let sub = interner.intern("Subtract");
    assert_ne!(add, sub);
    assert_eq!(interner.lookup(add), "Add");
    assert_eq!(interner.lookup(sub), "Subtract");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn get_does_not_intern() {
    let interner = StringInterner::new();
    let before = interner.len();
    assert_eq!(interner.get("never_seen"), None);
    assert_eq!(interner.len(), before);
    let name = interner.intern("never_seen");
    assert_eq!(interner.get("never_seen"), Some(name));
}

#[test]
fn shared_interner_is_shared() {
    let shared = SharedInterner::new();
    let clone = shared.clone();
    let name = shared.intern("Point");
    assert_eq!(clone.lookup(name), "Point");
}

#[test]
fn concurrent_interning_agrees() {
    let shared = SharedInterner::new();
    let names: Vec<Name> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let interner = shared.clone();
                scope.spawn(move || interner.intern("Concurrent"))
            })
            .collect();
        handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .collect()
    });
    assert_eq!(names.len(), 8);
    assert!(names.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn names_pack_shard_and_slot() {
    let name = Name::pack(5, 1000);
    assert_eq!((name.shard(), name.slot()), (5, 1000));
    assert_eq!(name.raw(), (5 << SLOT_BITS) | 1000);
    assert_eq!(format!("{name:?}"), "Name(5:1000)");
    let last = Name::pack(SHARDS - 1, MAX_SLOT);
    assert_eq!((last.shard(), last.slot()), (SHARDS - 1, MAX_SLOT as usize));
}

#[test]
fn empty_name_is_the_default() {
    assert_eq!(Name::default(), Name::EMPTY);
    assert_eq!((Name::EMPTY.shard(), Name::EMPTY.slot()), (0, 0));
}

#[test]
fn interned_names_land_in_their_hashed_shard() {
    let interner = StringInterner::new();
    for text in ["get_x", "set_x", "CastableTo<i64>", "sum"] {
        let name = interner.intern(text);
        assert_eq!(name.shard(), StringInterner::shard_for(text));
        assert_eq!(interner.lookup(name), text);
    }
}

#[test]
fn foreign_names_resolve_to_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::pack(3, MAX_SLOT)), "");
}
