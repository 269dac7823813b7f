//! PROTECT and UNPROTECT on series, words, object fields and nested graphs.

use super::{error_id, eval, interpreter, value_of};
use pretty_assertions::assert_eq;

#[test]
fn protected_series_refuses_changes() {
    assert_eq!(error_id("b: [1 2] protect b append b 3"), "protected");
    assert_eq!(error_id("b: [1 2] protect b b/1: 5"), "protected");
    assert_eq!(error_id("b: [1 2] protect b clear b"), "protected");
    assert_eq!(error_id("s: \"ab\" protect s append s \"c\""), "protected");
}

#[test]
fn protected_series_stays_readable() {
    assert_eq!(eval("b: [1 2] protect b b/2"), "2");
    assert_eq!(eval("b: [1 2] protect b length? b"), "2");
}

#[test]
fn unprotect_restores_mutability() {
    assert_eq!(eval("b: [1 2] protect b unprotect b append b 3"), "[1 2 3]");
    assert_eq!(eval("s: \"ab\" protect s unprotect s append s \"c\""), "\"abc\"");
}

#[test]
fn protect_returns_its_argument() {
    assert_eq!(eval("protect [1 2]"), "[1 2]");
    assert_eq!(eval("protect 5"), "5");
}

#[test]
fn protected_word_refuses_assignment() {
    assert_eq!(error_id("x: 1 protect 'x x: 2"), "locked-word");
    assert_eq!(error_id("x: 1 protect 'x set 'x 2"), "locked-word");
    assert_eq!(eval("x: 1 protect 'x x"), "1");
}

#[test]
fn unprotected_word_accepts_assignment() {
    assert_eq!(eval("x: 1 protect 'x unprotect 'x x: 2 x"), "2");
}

#[test]
fn protect_path_locks_one_field() {
    assert_eq!(error_id("o: object [a: 1 b: 2] protect 'o/a o/a: 5"), "locked-word");
    assert_eq!(eval("o: object [a: 1 b: 2] protect 'o/a o/b: 5 o/b"), "5");
}

#[test]
fn protected_object_locks_every_field() {
    assert_eq!(error_id("o: object [a: 1] protect o o/a: 2"), "locked-word");
    assert_eq!(eval("o: object [a: 1] protect o unprotect o o/a: 2 o/a"), "2");
}

#[test]
fn protect_words_locks_each_listed_word() {
    assert_eq!(eval("x: 1 y: 2 protect/words [x y] e: trap [y: 3] e/id"), "locked-word");
    assert_eq!(eval("x: 1 y: 2 protect/words [x y] unprotect/words [x] x: 5 x"), "5");
}

#[test]
fn protect_values_protects_what_words_refer_to() {
    assert_eq!(error_id("b: [1] protect/values [b] append b 2"), "protected");
    assert_eq!(eval("b: [1] protect/values [b] b: 7"), "7");
    assert_eq!(
        error_id("o: object [c: [1]] protect/values [o/c] append o/c 2"),
        "protected"
    );
}

#[test]
fn shallow_protect_leaves_nested_series_mutable() {
    assert_eq!(eval("b: [[1] 2] protect b append first b 3 first b"), "[1 3]");
}

#[test]
fn deep_protect_reaches_nested_series() {
    assert_eq!(error_id("b: [[1] 2] protect/deep b append first b 3"), "protected");
    assert_eq!(
        eval("b: [[1] 2] protect/deep b unprotect/deep b append first b 3 first b"),
        "[1 3]"
    );
}

#[test]
fn deep_protect_reaches_object_fields() {
    assert_eq!(
        error_id("o: object [inner: object [v: 1]] protect/deep o o/inner/v: 2"),
        "locked-word"
    );
}

#[test]
fn deep_walk_terminates_on_cycles() {
    let setup = "a: [1] b: [2] append/only a b append/only b a ";
    assert_eq!(
        eval(&format!("{setup} protect/deep a e: trap [append b 3] e/id")),
        "protected"
    );
    assert_eq!(
        eval(&format!("{setup} protect/deep a unprotect/deep a append b 3 length? b")),
        "3"
    );
    assert_eq!(
        eval(&format!(
            "{setup} protect/deep a unprotect/deep a protect/deep a e: trap [append a 4] e/id"
        )),
        "protected"
    );
}

#[test]
fn hide_removes_field_from_view() {
    assert_eq!(eval("o: object [a: 1 b: 2] protect/hide 'o/a words-of o"), "[b]");
    assert_eq!(error_id("o: object [a: 1 b: 2] protect/hide 'o/a o/a"), "invalid-path");
}

#[test]
fn hide_survives_unprotect() {
    assert_eq!(
        eval("o: object [a: 1 b: 2] protect/hide 'o/a unprotect o unprotect/deep o words-of o"),
        "[b]"
    );
}

#[test]
fn hidden_root_word_can_be_defined_again() {
    let mut interp = interpreter();
    assert_eq!(value_of(&mut interp, "x: 1 protect/hide 'x value? 'x"), "false");
    assert_eq!(value_of(&mut interp, "x: 5 x"), "5");
    assert_eq!(value_of(&mut interp, "protect/hide 'x value? 'x"), "false");
}

#[test]
fn hide_needs_a_binding() {
    assert_eq!(error_id("protect/hide [1 2]"), "bad-refines");
    assert_eq!(error_id("protect/hide 5"), "bad-refines");
}
