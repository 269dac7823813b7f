//! LOOP, WHILE and FOREVER.
//!
//! A loop claims `break` (ending with its payload) and `continue` (moving
//! to the next iteration). Every other interrupt leaves the loop.

use super::{block_arg, integer_arg, Args, NativeDef};
use crate::Interpreter;
use tide_ir::sym;
use tide_value::{EvalError, EvalResult, Outcome, Thrown, Value};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("loop", "count body", loop_),
    NativeDef::prefix("while", "condition body", while_),
    NativeDef::prefix("forever", "body", forever),
];

/// What a loop does after one evaluation of its body or condition.
enum LoopAction {
    /// Keep going; the value is the iteration's result.
    Next(Value),
    Break(Value),
    Exit(Thrown),
}

impl LoopAction {
    fn of(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Value(value) => LoopAction::Next(value),
            Outcome::Thrown(thrown) if thrown.is_named(sym::BREAK) => {
                let (payload, _) = thrown.take();
                LoopAction::Break(payload)
            }
            Outcome::Thrown(thrown) if thrown.is_named(sym::CONTINUE) => {
                LoopAction::Next(Value::Unset)
            }
            Outcome::Thrown(thrown) => LoopAction::Exit(thrown),
        }
    }
}

/// Run `step` until it breaks, exits, or returns `None` for "done".
fn drive(
    interp: &mut Interpreter,
    mut step: impl FnMut(&mut Interpreter) -> Result<Option<Outcome>, EvalError>,
) -> EvalResult {
    let mut result = Value::None;
    while let Some(outcome) = step(interp)? {
        match LoopAction::of(outcome) {
            LoopAction::Next(value) => result = value,
            LoopAction::Break(payload) => return Ok(payload.into()),
            LoopAction::Exit(thrown) => return Ok(thrown.into()),
        }
    }
    Ok(result.into())
}

fn loop_(interp: &mut Interpreter, args: Args) -> EvalResult {
    let count = integer_arg("loop", "count", &args.value(0))?;
    let body = block_arg("loop", "body", args.value(1))?;
    let mut remaining = count;
    drive(interp, |interp| {
        if remaining <= 0 {
            return Ok(None);
        }
        remaining -= 1;
        interp.evaluate_all(&body).map(Some)
    })
}

fn while_(interp: &mut Interpreter, args: Args) -> EvalResult {
    let condition = block_arg("while", "condition", args.value(0))?;
    let body = block_arg("while", "body", args.value(1))?;
    drive(interp, |interp| match interp.evaluate_all(&condition)? {
        Outcome::Value(value) if value.is_truthy() => interp.evaluate_all(&body).map(Some),
        Outcome::Value(_) => Ok(None),
        thrown @ Outcome::Thrown(_) => Ok(Some(thrown)),
    })
}

fn forever(interp: &mut Interpreter, args: Args) -> EvalResult {
    let body = block_arg("forever", "body", args.value(0))?;
    drive(interp, |interp| interp.evaluate_all(&body).map(Some))
}
