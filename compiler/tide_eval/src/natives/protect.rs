//! PROTECT and UNPROTECT.
//!
//! A word or path protects the binding it names (the field's write-lock,
//! or hide). A series or object protects its container. `/deep` continues
//! into nested containers through a [`ProtectWalk`], whose visited set is
//! dropped on every exit path.

use super::{Args, NativeDef};
use crate::Interpreter;
use tide_value::{
    bad_refines, propagate, BlockRef, EvalError, EvalResult, PathKind, ProtectFlags, ProtectWalk,
    Value,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("protect", "value /deep /words /values /hide", protect),
    NativeDef::prefix("unprotect", "value /deep /words /values", unprotect),
];

/// How a PROTECT or UNPROTECT call reads its argument.
#[derive(Copy, Clone)]
struct Target {
    flags: ProtectFlags,
    words: bool,
    values: bool,
}

fn protect(interp: &mut Interpreter, args: Args) -> EvalResult {
    let mut flags = ProtectFlags::SET;
    flags |= if args.refined(4) {
        ProtectFlags::HIDE
    } else {
        ProtectFlags::WORD
    };
    if args.refined(1) {
        flags |= ProtectFlags::DEEP;
    }
    let target = Target {
        flags,
        words: args.refined(2),
        values: args.refined(3),
    };
    apply(interp, args.value(0), target)
}

/// Hide has no inverse, so UNPROTECT only ever clears locks.
fn unprotect(interp: &mut Interpreter, args: Args) -> EvalResult {
    let mut flags = ProtectFlags::WORD;
    if args.refined(1) {
        flags |= ProtectFlags::DEEP;
    }
    let target = Target {
        flags,
        words: args.refined(2),
        values: args.refined(3),
    };
    apply(interp, args.value(0), target)
}

#[tracing::instrument(level = "trace", skip_all, fields(flags = ?target.flags))]
fn apply(interp: &mut Interpreter, value: Value, target: Target) -> EvalResult {
    let mut walk = ProtectWalk::new(target.flags);
    match &value {
        Value::Word(..) | Value::Path(..) => protect_binding(interp, &mut walk, &value)?,
        Value::Block(block) if target.words => {
            for item in block.to_vec() {
                protect_binding(interp, &mut walk, &item)?;
            }
        }
        Value::Block(block) if target.values => {
            for item in block.to_vec() {
                let referenced = match item {
                    Value::Word(_, name) => interp.env.lookup(name).unwrap_or(Value::None),
                    Value::Path(_, segments) => {
                        let path = Value::Path(PathKind::Path, segments);
                        propagate!(eval_path_value(interp, path)?)
                    }
                    other => other,
                };
                walk.protect_value(&referenced);
            }
        }
        _ if target.flags.contains(ProtectFlags::HIDE) => return Err(bad_refines()),
        _ => walk.protect_value(&value),
    }
    let visited = walk.finish();
    tracing::debug!(visited, "protect walk finished");
    Ok(value.into())
}

/// Lock or hide the field a word or path names. Unbound names are skipped.
fn protect_binding(
    interp: &Interpreter,
    walk: &mut ProtectWalk,
    item: &Value,
) -> Result<(), EvalError> {
    let field = match item {
        Value::Word(_, name) => interp.env.resolve(*name),
        Value::Path(_, segments) => interp.resolve_path_field(segments)?,
        _ => None,
    };
    if let Some((frame, index)) = field {
        walk.protect_field(&frame, index);
    }
    Ok(())
}

/// The value a path refers to, applying a function found along it.
fn eval_path_value(interp: &mut Interpreter, path: Value) -> EvalResult {
    interp.evaluate_all(&BlockRef::new(vec![path]))
}
