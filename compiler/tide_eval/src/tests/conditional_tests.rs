//! ALL, ANY, CASE, SWITCH, IF, EITHER and UNLESS.

use super::{error_id, eval, eval_with_output};
use pretty_assertions::assert_eq;

// ALL / ANY

#[test]
fn all_returns_last_value_or_none() {
    assert_eq!(eval("all [1 2 3]"), "3");
    assert_eq!(eval("all [1 none 3]"), "none");
    assert_eq!(eval("all [true false]"), "none");
    assert_eq!(eval("all []"), "true");
}

#[test]
fn all_stops_at_first_false() {
    let (value, output) = eval_with_output("all [print 1 false print 2]");
    assert_eq!(value, "none");
    assert_eq!(output, "1\n");
}

#[test]
fn any_returns_first_true_set_value() {
    assert_eq!(eval("any [none false 3 4]"), "3");
    assert_eq!(eval("any [none false]"), "none");
    assert_eq!(eval("any []"), "none");
    assert_eq!(eval("any [print 1 2]"), "2");
}

#[test]
fn all_and_any_forward_interrupts() {
    assert_eq!(eval("loop 1 [all [1 break/with 2 3]]"), "2");
    assert_eq!(eval("loop 1 [any [none break/with 2 3]]"), "2");
    assert_eq!(eval("f: func [] [all [return 4]] f"), "4");
}

// CASE

#[test]
fn case_runs_first_true_body() {
    assert_eq!(eval("case [false [1] true [2]]"), "2");
    assert_eq!(eval("case [1 + 1 = 2 [\"yes\"] true [\"no\"]]"), "\"yes\"");
}

#[test]
fn case_all_runs_every_true_body() {
    assert_eq!(eval("case/all [true [1] true [2]]"), "2");
    assert_eq!(eval("x: 0 case/all [true [x: x + 1] false [x: 100] true [x: x + 10]] x"), "11");
}

#[test]
fn case_without_match_is_none() {
    assert_eq!(eval("case []"), "none");
    assert_eq!(eval("case [false [1] none [2]]"), "none");
}

#[test]
fn case_non_block_body_is_the_result() {
    assert_eq!(eval("case [true 5]"), "5");
    assert_eq!(eval("case/only [true [1 + 1]]"), "[1 + 1]");
}

#[test]
fn case_evaluates_bodies_of_false_conditions() {
    assert_eq!(eval("x: 0 case [false x: 5 true [x]]"), "5");
}

#[test]
fn case_rejects_unset_condition_and_missing_body() {
    assert_eq!(error_id("case [() [1]]"), "no-return");
    assert_eq!(error_id("case [true]"), "past-end");
}

#[test]
fn case_forwards_interrupts() {
    assert_eq!(eval("loop 1 [case [true [break/with 3]]]"), "3");
    assert_eq!(eval("loop 1 [case [break/with 4 [1]]]"), "4");
    assert_eq!(eval("loop 1 [case [false break/with 5 true [1]]]"), "5");
}

// SWITCH

#[test]
fn switch_runs_matching_body() {
    assert_eq!(eval("switch 2 [1 [\"a\"] 2 [\"b\"] 3 [\"c\"]]"), "\"b\"");
}

#[test]
fn switch_keys_share_the_next_body() {
    assert_eq!(eval("switch 2 [1 2 [\"low\"] 3 [\"high\"]]"), "\"low\"");
}

#[test]
fn switch_all_runs_every_matching_body() {
    assert_eq!(eval("x: 0 switch/all 2 [2 [x: x + 1] 3 [x: 50] 2 [x: x + 10]] x"), "11");
    assert_eq!(eval("switch/all 2 [2 [\"first\"] 2 [\"last\"]]"), "\"last\"");
}

#[test]
fn switch_without_match() {
    assert_eq!(eval("switch 9 [1 [\"a\"]]"), "none");
    assert_eq!(eval("switch/default 9 [1 [\"a\"]] [\"d\"]"), "\"d\"");
    assert_eq!(eval("switch/default 9 [] 5"), "5");
    assert_eq!(eval("switch 9 [1 [\"a\"] \"other\"]"), "\"other\"");
}

#[test]
fn switch_default_is_skipped_after_a_match() {
    assert_eq!(eval("switch/default 1 [1 [\"a\"]] [\"d\"]"), "\"a\"");
}

#[test]
fn switch_comparison_is_coerced_unless_strict() {
    assert_eq!(eval("switch \"A\" [\"a\" [1]]"), "1");
    assert_eq!(eval("switch/strict \"A\" [\"a\" [1] \"A\" [2]]"), "2");
    assert_eq!(eval("switch 1 [1.0 [\"num\"]]"), "\"num\"");
}

#[test]
fn switch_evaluates_parens_and_get_words() {
    assert_eq!(eval("switch 3 [(1 + 2) [\"three\"]]"), "\"three\"");
    assert_eq!(eval("k: 4 switch 4 [:k [\"k\"]]"), "\"k\"");
    assert_eq!(eval("switch 'k [k [\"literal\"]]"), "\"literal\"");
}

#[test]
fn switch_forwards_interrupts() {
    assert_eq!(eval("loop 1 [switch 1 [1 [break/with 5]]]"), "5");
    assert_eq!(eval("loop 1 [switch 1 [(break/with 6) [1]]]"), "6");
}

// IF / EITHER / UNLESS

#[test]
fn if_selects_by_truth() {
    assert_eq!(eval("if true [1]"), "1");
    assert_eq!(eval("if false [1]"), "none");
    assert_eq!(eval("if none [1]"), "none");
    assert_eq!(eval("if 0 [\"zero is true\"]"), "\"zero is true\"");
}

#[test]
fn if_returns_non_block_branch_as_is() {
    assert_eq!(eval("if true 2"), "2");
    assert_eq!(eval("if/only true [1 + 1]"), "[1 + 1]");
}

#[test]
fn either_picks_one_branch() {
    assert_eq!(eval("either 1 > 2 [\"a\"] [\"b\"]"), "\"b\"");
    assert_eq!(eval("either true 1 2"), "1");
    assert_eq!(eval("either/only false [1] [2]"), "[2]");
}

#[test]
fn unless_inverts_the_condition() {
    assert_eq!(eval("unless false [3]"), "3");
    assert_eq!(eval("unless true [3]"), "none");
}

#[test]
fn unset_condition_is_rejected() {
    assert_eq!(error_id("if () [1]"), "expect-arg");
    assert_eq!(error_id("either () [1] [2]"), "expect-arg");
    assert_eq!(error_id("unless () [1]"), "expect-arg");
}

#[test]
fn branches_forward_interrupts() {
    assert_eq!(eval("f: func [] [either true [return 1] [2] 3] f"), "1");
    assert_eq!(eval("loop 1 [unless false [break/with 8]]"), "8");
    assert_eq!(eval("loop 1 [if break/with 9 [1]]"), "9");
}

#[test]
fn branches_let_raises_reach_trap() {
    assert_eq!(eval("attempt [if true [1 / 0]]"), "none");
    assert_eq!(eval("e: trap [either false [1] [fail \"no\"]] e/message"), "\"no\"");
}
