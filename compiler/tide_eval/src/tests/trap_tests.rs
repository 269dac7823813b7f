//! TRAP, ATTEMPT, FAIL and recovery point bookkeeping.

use super::{error_id, eval, interpreter, run_in, value_of};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn attempt_returns_none_on_raise() {
    assert_eq!(eval("attempt [1 / 0]"), "none");
    assert_eq!(eval("attempt [undefined-word]"), "none");
}

#[test]
fn attempt_returns_block_result() {
    assert_eq!(eval("attempt [1 + 1]"), "2");
    assert_eq!(eval("attempt []"), "#[unset]");
}

#[test]
fn attempt_does_not_propagate_the_raise() {
    assert_eq!(eval("x: attempt [fail \"no\"] 5"), "5");
}

#[test]
fn trap_returns_the_error_value() {
    assert_eq!(eval("e: trap [1 / 0] e/id"), "zero-divide");
    assert_eq!(eval("error? trap [1 / 0]"), "true");
    assert_eq!(eval("trap [1 + 1]"), "2");
}

#[test]
fn trap_error_carries_its_message() {
    assert_eq!(eval("e: trap [fail \"boom\"] e/message"), "\"boom\"");
    assert_eq!(eval("e: trap [fail \"boom\"] e/id"), "user");
}

#[test]
fn trap_with_unary_handler_gets_the_error() {
    assert_eq!(eval("trap/with [fail \"boom\"] func [e] [e/message]"), "\"boom\"");
}

#[test]
fn trap_with_binary_handler_gets_only_the_error() {
    assert_eq!(eval("trap/with [fail \"boom\"] func [e n] [none? n]"), "true");
}

#[test]
fn trap_with_nullary_and_block_handlers() {
    assert_eq!(eval("trap/with [1 / 0] func [] [7]"), "7");
    assert_eq!(eval("trap/with [1 / 0] [8]"), "8");
}

#[test]
fn trap_with_handler_is_skipped_without_raise() {
    assert_eq!(eval("trap/with [3] [8]"), "3");
}

#[test]
fn raises_pass_through_catch_and_loops() {
    assert_eq!(eval("e: trap [loop 3 [catch/any [1 / 0]]] e/id"), "zero-divide");
}

#[test]
fn interrupts_pass_through_trap() {
    assert_eq!(eval("catch [trap [throw 3]]"), "3");
    assert_eq!(eval("loop 2 [attempt [break/with 4]]"), "4");
    assert_eq!(eval("f: func [] [trap [return 6] 0] f"), "6");
}

#[test]
fn nested_traps_land_innermost_first() {
    assert_eq!(eval("trap [e: trap [1 / 0] 5] e/id"), "zero-divide");
    assert_eq!(eval("attempt [attempt [1 / 0] 5]"), "5");
}

#[test]
fn raise_in_handler_reaches_outer_trap() {
    assert_eq!(eval("e: trap [trap/with [1 / 0] [fail \"again\"]] e/message"), "\"again\"");
}

#[test]
fn landing_restores_environment_and_call_stack() {
    let mut interp = interpreter();
    assert_eq!(value_of(&mut interp, "f: func [x] [object [a: x / 0]] attempt [f 1]"), "none");
    assert_eq!(interp.env().depth(), 1);
    assert!(interp.call_stack().is_empty());
    assert_eq!(interp.recovery_depth(), 0);
}

#[test]
fn recovery_points_are_popped_on_every_path() {
    let mut interp = interpreter();
    value_of(&mut interp, "attempt [1]");
    value_of(&mut interp, "attempt [1 / 0]");
    value_of(&mut interp, "loop 1 [trap [break]]");
    value_of(&mut interp, "catch [trap [throw 1]]");
    assert_eq!(interp.recovery_depth(), 0);
}

#[test]
fn unrecovered_raise_reaches_the_host() {
    let mut interp = interpreter();
    let err = run_in(&mut interp, "1 / 0").unwrap_err();
    assert_eq!(err.id(), "zero-divide");
    assert_eq!(interp.recovery_depth(), 0);
}

#[test]
fn trap_rejects_non_callable_handlers() {
    assert_eq!(error_id("trap/with [1] 5"), "expect-arg");
}

// FAIL

#[test]
fn fail_with_string_raises_user_error() {
    assert_eq!(error_id("fail \"bad\""), "user");
}

#[test]
fn fail_with_block_forms_the_reduced_message() {
    assert_eq!(eval("e: trap [fail [\"bad\" (1 + 1)]] e/message"), "\"bad 2\"");
    assert_eq!(eval("n: 3 e: trap [fail [\"got\" n]] e/message"), "\"got 3\"");
}

#[test]
fn fail_block_refuses_function_words() {
    assert_eq!(error_id("fail [print]"), "limited-fail-input");
    assert_eq!(error_id("fail [[nested]]"), "limited-fail-input");
}

#[test]
fn fail_reraises_error_values() {
    assert_eq!(eval("e: trap [fail trap [1 / 0]] e/id"), "zero-divide");
}

#[test]
fn fail_refuses_other_values() {
    assert_eq!(error_id("fail 5"), "expect-arg");
}

proptest! {
    /// ATTEMPT yields the quotient or none, and never leaks the raise.
    #[test]
    fn attempt_contains_division(a in -100i64..100, b in -3i64..3) {
        let expected = if b == 0 {
            "none".to_string()
        } else {
            value_of(&mut interpreter(), &format!("{a} / {b}"))
        };
        let mut interp = interpreter();
        prop_assert_eq!(value_of(&mut interp, &format!("attempt [{a} / {b}]")), expected);
        prop_assert_eq!(interp.recovery_depth(), 0);
        prop_assert!(interp.call_stack().is_empty());
    }
}
