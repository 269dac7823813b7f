//! Named exits: BREAK, CONTINUE, RETURN, EXIT, QUIT, THROW and CATCH.
//!
//! Each exit produces an interrupt carrying a reserved name. THROW carries
//! a user name, or `none` without `/name`. CATCH is the only native that
//! inspects interrupt names other than its own loop or call boundary.

use super::{block_arg, Args, NativeDef};
use crate::interpreter::Handler;
use crate::Interpreter;
use tide_ir::sym;
use tide_value::{
    bad_refines, equal, invalid_arg, use_fail, EvalResult, Outcome, Thrown, Value,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("break", "/with value /return value", break_),
    NativeDef::prefix("continue", "", continue_),
    NativeDef::prefix("return", "value", return_),
    NativeDef::prefix("exit", "/with value", exit),
    NativeDef::prefix("quit", "/return value", quit),
    NativeDef::prefix("throw", "value /name word", throw),
    NativeDef::prefix("catch", "block /name names /quit /any /with handler", catch),
];

/// `/return` is the older spelling of `/with`.
fn break_(_: &mut Interpreter, args: Args) -> EvalResult {
    let payload = args
        .refinement_arg(0)
        .or_else(|| args.refinement_arg(2))
        .unwrap_or(Value::Unset);
    Ok(Thrown::named(sym::BREAK, payload).into())
}

fn continue_(_: &mut Interpreter, _: Args) -> EvalResult {
    Ok(Thrown::named(sym::CONTINUE, Value::Unset).into())
}

fn return_(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Thrown::named(sym::RETURN, args.value(0)).into())
}

fn exit(interp: &mut Interpreter, args: Args) -> EvalResult {
    let name = if interp.legacy().exit_as_return {
        sym::RETURN
    } else {
        sym::EXIT
    };
    let payload = args.refinement_arg(0).unwrap_or(Value::Unset);
    Ok(Thrown::named(name, payload).into())
}

fn quit(_: &mut Interpreter, args: Args) -> EvalResult {
    let payload = args.refinement_arg(0).unwrap_or(Value::Unset);
    Ok(Thrown::named(sym::QUIT, payload).into())
}

fn throw(_: &mut Interpreter, args: Args) -> EvalResult {
    let payload = args.value(0);
    if matches!(payload, Value::Error(_)) {
        return Err(use_fail());
    }
    let name = match args.refinement_arg(1) {
        Some(Value::Block(_)) => return Err(invalid_arg("block! throw name")),
        Some(name) => name,
        None => Value::None,
    };
    Ok(Thrown::new(name, payload).into())
}

/// Which interrupts a CATCH claims.
struct CatchFilter {
    names: Option<Value>,
    quit: bool,
    any: bool,
}

impl CatchFilter {
    fn claims(&self, thrown: &Thrown) -> bool {
        if thrown.is_named(sym::QUIT) {
            return self.quit;
        }
        if self.any {
            return true;
        }
        match &self.names {
            Some(Value::Block(list)) => list
                .to_vec()
                .iter()
                .any(|candidate| equal(candidate, thrown.name())),
            Some(name) => equal(name, thrown.name()),
            None => thrown.is_unnamed(),
        }
    }
}

#[tracing::instrument(level = "trace", skip_all)]
fn catch(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("catch", "block", args.value(0))?;
    let filter = CatchFilter {
        names: args.refinement_arg(1),
        quit: args.refined(3),
        any: args.refined(4),
    };
    if filter.any && filter.names.is_some() {
        return Err(bad_refines());
    }
    if let Some(Value::Block(list)) = &filter.names {
        if let Some(nested) = list.to_vec().into_iter().find(|name| matches!(name, Value::Block(_))) {
            return Err(invalid_arg(&interp.mold(&nested)));
        }
    }
    let handler = args
        .refinement_arg(5)
        .map(|handler| Handler::classify("catch", handler))
        .transpose()?;

    let thrown = match interp.evaluate_all(&block)? {
        Outcome::Thrown(thrown) if filter.claims(&thrown) => thrown,
        outcome => return Ok(outcome),
    };
    tracing::trace!(name = %interp.mold(thrown.name()), "caught");
    let (payload, name) = thrown.take();
    match handler {
        None => Ok(payload.into()),
        Some(handler) => interp.dispatch_handler(&handler, payload, Some(name)),
    }
}
