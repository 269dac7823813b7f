//! BREAK, CONTINUE, RETURN, EXIT, QUIT, THROW and CATCH.

use super::{error_id, eval, eval_legacy, eval_with_output, interpreter, run_in};
use crate::Completion;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tide_ir::sym;
use tide_value::{Outcome, Thrown, Value};

// Interrupt values

#[test]
fn thrown_take_yields_name_and_payload_once() {
    let thrown = Thrown::named(sym::BREAK, Value::Integer(1));
    assert!(thrown.is_named(sym::BREAK));
    assert!(!thrown.is_unnamed());
    let (payload, name) = thrown.take();
    assert!(matches!(payload, Value::Integer(1)));
    assert!(name.is_word_named(sym::BREAK));
}

#[test]
fn unnamed_throw_has_none_name() {
    let thrown = Thrown::new(Value::None, Value::Integer(2));
    assert!(thrown.is_unnamed());
    assert!(!thrown.is_named(sym::QUIT));
}

#[test]
fn outcome_converts_from_both_channels() {
    assert!(matches!(Outcome::from(Value::None), Outcome::Value(Value::None)));
    let thrown = Thrown::named(sym::CONTINUE, Value::Unset);
    assert!(matches!(Outcome::from(thrown), Outcome::Thrown(_)));
}

// CATCH

#[test]
fn catch_passes_plain_results_through() {
    assert_eq!(eval("catch [1 + 2]"), "3");
    assert_eq!(eval("catch []"), "#[unset]");
    assert_eq!(eval("catch/name [\"a\"] 'x"), "\"a\"");
}

#[test]
fn catch_claims_unnamed_throws() {
    assert_eq!(eval("catch [throw 10 20]"), "10");
    assert_eq!(eval("catch [1 throw 'word 2]"), "word");
}

#[test]
fn catch_without_name_ignores_named_throws() {
    assert_eq!(eval("catch/name [catch [throw/name 1 'x]] 'x"), "1");
    assert_eq!(error_id("catch [throw/name 1 'x]"), "no-catch");
}

#[test]
fn catch_name_matches_single_name() {
    assert_eq!(eval("catch/name [throw/name 42 'x] 'x"), "42");
}

#[test]
fn catch_name_passes_other_names_through_unchanged() {
    assert_eq!(eval("catch/name [catch/name [throw/name 42 'y] 'x] 'y"), "42");
}

#[test]
fn catch_name_matches_any_list_element() {
    assert_eq!(eval("catch/name [throw/name 5 'b] [a b c]"), "5");
    assert_eq!(error_id("catch/name [throw/name 5 'd] [a b c]"), "no-catch");
}

#[test]
fn catch_name_compares_by_equality() {
    assert_eq!(eval("catch/name [throw/name 1 \"Tag\"] \"tag\""), "1");
    assert_eq!(eval("catch/name [throw/name 2 7] 7"), "2");
}

#[test]
fn catch_does_not_claim_loop_exits_by_default() {
    assert_eq!(error_id("catch [break]"), "no-loop");
    assert_eq!(eval("loop 3 [catch [break/with 5]]"), "5");
    assert_eq!(eval("f: func [] [catch [return 4] 9] f"), "4");
}

#[test]
fn catch_claims_reserved_names_when_listed() {
    assert_eq!(eval("catch/name [break/with 7] 'break"), "7");
    assert_eq!(eval("catch/name [return 8] [return exit]"), "8");
}

#[test]
fn catch_any_claims_everything_but_quit() {
    assert_eq!(eval("catch/any [throw/name 3 'x]"), "3");
    assert_eq!(eval("catch/any [break/with 4]"), "4");
    assert_eq!(eval("catch/any [throw 5]"), "5");

    let mut interp = interpreter();
    match run_in(&mut interp, "catch/any [throw/name 1 'quit]").unwrap() {
        Completion::Quit(value) => assert!(matches!(value, Value::Integer(1))),
        Completion::Value(value) => panic!("caught quit: {}", interp.mold(&value)),
    }
}

#[test]
fn catch_quit_claims_quit() {
    assert_eq!(eval("catch/any/quit [throw/name 1 'quit]"), "1");
    assert_eq!(eval("catch/quit [quit/return 2]"), "2");
}

#[test]
fn catch_name_alone_does_not_claim_quit() {
    let mut interp = interpreter();
    let completion = run_in(&mut interp, "catch/name [quit/return 6] 'quit").unwrap();
    assert_eq!(completion.exit_code(), 6);
}

#[test]
fn catch_rejects_conflicting_refinements() {
    assert_eq!(error_id("catch/any/name [1] 'x"), "bad-refines");
}

#[test]
fn catch_rejects_nested_name_lists() {
    assert_eq!(error_id("catch/name [throw/name 1 'c] [a [b]]"), "invalid-arg");
}

#[test]
fn catch_lets_raises_pass() {
    assert_eq!(error_id("catch/any [1 / 0]"), "zero-divide");
    assert_eq!(eval("e: trap [catch/any [1 / 0]] e/id"), "zero-divide");
}

// CATCH handlers

#[test]
fn catch_block_handler_is_evaluated() {
    assert_eq!(eval("catch/with [throw 1] [2 + 3]"), "5");
}

#[test]
fn catch_nullary_handler_gets_nothing() {
    assert_eq!(eval("catch/with [throw 1] func [] [\"none\"]"), "\"none\"");
    assert_eq!(eval("catch/with [throw 1] func [/opt] [opt]"), "none");
}

#[test]
fn catch_unary_handler_gets_payload() {
    assert_eq!(eval("catch/with [throw 1] func [x] [x + 10]"), "11");
    assert_eq!(eval("catch/with [throw 1] func [x /opt] [reduce [x opt]]"), "[1 none]");
}

#[test]
fn catch_binary_handler_gets_payload_and_name() {
    assert_eq!(
        eval("catch/name/with [throw/name 1 'x] 'x func [v n] [reduce [v n]]"),
        "[1 x]"
    );
    assert_eq!(eval("catch/with [throw 1] func [v n] [none? n]"), "true");
}

#[test]
fn catch_handler_interrupts_propagate() {
    assert_eq!(eval("loop 2 [catch/with [throw 1] [break/with 9]]"), "9");
}

#[test]
fn catch_rejects_non_callable_handlers() {
    assert_eq!(error_id("catch/with [throw 1] 5"), "expect-arg");
}

// THROW

#[test]
fn throw_refuses_error_values() {
    assert_eq!(error_id("throw trap [1 / 0]"), "use-fail");
}

#[test]
fn throw_refuses_block_names() {
    assert_eq!(error_id("throw/name 1 [a]"), "invalid-arg");
}

// Loop and function exits

#[test]
fn break_with_and_return_refinements() {
    assert_eq!(eval("loop 3 [break]"), "#[unset]");
    assert_eq!(eval("loop 3 [break/with 1]"), "1");
    assert_eq!(eval("loop 3 [break/return 2]"), "2");
}

#[test]
fn return_unwinds_nested_blocks() {
    assert_eq!(eval("f: func [x] [if x > 1 [return x * 2] 0] f 5"), "10");
    assert_eq!(eval("f: func [] [loop 5 [return 7] 0] f"), "7");
}

#[test]
fn exit_leaves_the_function() {
    assert_eq!(eval("f: func [] [exit 1] f"), "#[unset]");
    assert_eq!(eval("f: func [] [exit/with 2 1] f"), "2");
}

#[test]
fn exit_outside_function_is_reported() {
    assert_eq!(error_id("exit"), "not-in-func");
    assert_eq!(error_id("return 1"), "not-in-func");
    assert_eq!(error_id("continue"), "no-loop");
}

#[test]
fn legacy_exit_throws_return() {
    assert_eq!(eval_legacy("catch/name [exit/with 3] 'return"), "3");
    assert_eq!(eval_legacy("f: func [] [exit/with 4] f"), "4");
    assert_eq!(error_id("catch/name [exit/with 3] 'return"), "not-in-func");
}

#[test]
fn exits_propagate_through_argument_gathering() {
    let (value, output) = eval_with_output("loop 1 [print break/with 3]");
    assert_eq!(value, "3");
    assert_eq!(output, "");
    assert_eq!(eval("f: func [] [1 + return 2] f"), "2");
    assert_eq!(eval("catch [x: throw 4]"), "4");
}

#[test]
fn quit_ends_the_run() {
    let mut interp = interpreter();
    let completion = run_in(&mut interp, "loop 3 [quit/return 2] 99").unwrap();
    assert!(matches!(completion, Completion::Quit(Value::Integer(2))));
    assert_eq!(completion.exit_code(), 2);
}

proptest! {
    /// A CATCH around code that throws nothing returns that code's value.
    #[test]
    fn catch_is_transparent_without_throw(a in -1000i64..1000, b in -1000i64..1000) {
        prop_assert_eq!(eval(&format!("catch [{a} + {b}]")), (a + b).to_string());
        prop_assert_eq!(eval(&format!("catch/any/quit [{a}]")), a.to_string());
    }

    /// The payload comes back from the matching CATCH however deep the
    /// non-matching ones are nested.
    #[test]
    fn named_throw_skips_non_matching_catches(payload in any::<i32>(), depth in 0usize..6) {
        let mut source = format!("throw/name {payload} 'target");
        for _ in 0..depth {
            source = format!("catch/name [{source}] 'other");
        }
        source = format!("catch/name [{source}] 'target");
        prop_assert_eq!(eval(&source), payload.to_string());
    }
}
