//! Behavioral tests run through source text.
//!
//! Each helper builds a fresh `TestRun` interpreter with a buffered print
//! handler, loads the source and runs it to completion.

mod conditional_tests;
mod control_tests;
mod protect_tests;
mod trap_tests;

use crate::{Completion, EvalMode, Interpreter, InterpreterBuilder, LegacyOptions};
use tide_value::EvalError;

fn interpreter() -> Interpreter {
    InterpreterBuilder::new().mode(EvalMode::TestRun).build()
}

fn run_in(interp: &mut Interpreter, source: &str) -> Result<Completion, EvalError> {
    let block = interp.load(source).unwrap();
    interp.run(&block)
}

fn value_of(interp: &mut Interpreter, source: &str) -> String {
    match run_in(interp, source) {
        Ok(Completion::Value(value)) => interp.mold(&value),
        Ok(Completion::Quit(value)) => panic!("{source} quit with {}", interp.mold(&value)),
        Err(err) => panic!("{source} raised {}: {err}", err.id()),
    }
}

/// Molded result of running `source`.
fn eval(source: &str) -> String {
    value_of(&mut interpreter(), source)
}

/// Molded result and captured print output.
fn eval_with_output(source: &str) -> (String, String) {
    let mut interp = interpreter();
    let value = value_of(&mut interp, source);
    (value, interp.get_print_output())
}

/// Id of the error `source` ends with.
fn error_id(source: &str) -> &'static str {
    match run_in(&mut interpreter(), source) {
        Err(err) => err.id(),
        Ok(_) => panic!("{source} did not raise"),
    }
}

fn eval_legacy(source: &str) -> String {
    let mut interp = InterpreterBuilder::new()
        .mode(EvalMode::TestRun)
        .legacy(LegacyOptions {
            exit_as_return: true,
        })
        .build();
    value_of(&mut interp, source)
}
