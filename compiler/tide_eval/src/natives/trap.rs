//! TRAP, ATTEMPT and FAIL: raising fatal conditions and recovering them.

use super::{block_arg, type_error, Args, NativeDef};
use crate::interpreter::Handler;
use crate::Interpreter;
use tide_value::{
    limited_fail_input, propagate, user_error, BlockRef, EvalError, EvalResult, Outcome, Value,
    WordKind,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("trap", "block /with handler", trap),
    NativeDef::prefix("attempt", "block", attempt),
    NativeDef::prefix("fail", "reason", fail),
];

/// Evaluate `block` under a recovery point.
///
/// `Err` is a raise that landed on the point. Interrupts pass through as
/// `Ok` outcomes.
fn guarded(interp: &mut Interpreter, block: &BlockRef) -> Result<Outcome, EvalError> {
    let mut point = interp.push_recovery_point();
    match point.evaluate_all(block) {
        Ok(outcome) => {
            point.disarm();
            Ok(outcome)
        }
        Err(err) => Err(point.land(err)),
    }
}

#[tracing::instrument(level = "trace", skip_all)]
fn trap(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("trap", "block", args.value(0))?;
    let handler = args
        .refinement_arg(1)
        .map(|handler| Handler::classify("trap", handler))
        .transpose()?;
    let err = match guarded(interp, &block) {
        Ok(outcome) => return Ok(outcome),
        Err(err) => err,
    };
    let error = Value::error(err);
    match handler {
        None => Ok(error.into()),
        Some(handler) => interp.dispatch_handler(&handler, error, None),
    }
}

#[tracing::instrument(level = "trace", skip_all)]
fn attempt(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("attempt", "block", args.value(0))?;
    Ok(guarded(interp, &block).unwrap_or_else(|_| Value::None.into()))
}

/// Raise an error value, a message, or a message built from a block.
fn fail(interp: &mut Interpreter, args: Args) -> EvalResult {
    match args.value(0) {
        Value::Error(err) => Err((*err).clone()),
        Value::String(text) => Err(user_error(text.text())),
        Value::Block(block) => {
            for item in block.to_vec() {
                let allowed = match &item {
                    Value::String(_) | Value::Integer(_) | Value::Decimal(_) | Value::Paren(_) => {
                        true
                    }
                    Value::Word(WordKind::Word, name) => {
                        !matches!(interp.env.lookup(*name), Some(Value::Function(_)))
                    }
                    _ => false,
                };
                if !allowed {
                    return Err(limited_fail_input());
                }
            }
            let reduced = propagate!(interp.reduce(&block)?);
            Err(user_error(interp.form(&reduced)))
        }
        other => Err(type_error("fail", "reason", &other)),
    }
}
