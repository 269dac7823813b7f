use super::*;
use crate::sym;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_same_string_twice() {
    let interner = StringInterner::new();
    let a = interner.intern("catch");
    let b = interner.intern("catch");
    assert_eq!(a, b);
}

#[test]
fn test_intern_distinct_strings() {
    let interner = StringInterner::new();
    let a = interner.intern("throw");
    let b = interner.intern("catch");
    assert_ne!(a, b);
    assert_eq!(interner.lookup(a), "throw");
    assert_eq!(interner.lookup(b), "catch");
}

#[test]
fn test_empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
}

#[test]
fn test_reserved_symbols_are_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("break"), Some(sym::BREAK));
    assert_eq!(interner.get("return"), Some(sym::RETURN));
    assert_eq!(interner.len(), sym::PRE_INTERNED.len());
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    let before = interner.len();
    assert_eq!(interner.get("not-yet-seen"), None);
    assert_eq!(interner.len(), before);
}

#[test]
fn test_lookup_unknown_name_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(9_999)), "");
}

#[test]
fn test_shared_interner_clones_share_table() {
    let shared = SharedInterner::new();
    let clone = shared.clone();
    let name = shared.intern("shared");
    assert_eq!(clone.lookup(name), "shared");
}
