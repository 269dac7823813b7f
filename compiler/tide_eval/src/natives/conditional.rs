//! Structured conditionals: ALL, ANY, CASE, SWITCH, IF, EITHER, UNLESS.
//!
//! Every sub-evaluation is matched before its value is inspected; an
//! interrupt is returned as the conditional's own result.

use super::{block_arg, branch, type_error, Args, NativeDef};
use crate::Interpreter;
use tide_value::{
    equal, no_return, past_end, propagate, strict_equal, BlockRef, EvalError, EvalResult,
    PathKind, Step, Value, WordKind,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("all", "block", all),
    NativeDef::prefix("any", "block", any),
    NativeDef::prefix("case", "block /all /only", case),
    NativeDef::prefix("switch", "value cases /default case /all /strict", switch),
    NativeDef::prefix("if", "condition branch /only", if_),
    NativeDef::prefix("either", "condition true-branch false-branch /only", either),
    NativeDef::prefix("unless", "condition branch /only", unless),
];

/// Last value, or none at the first conditionally false one.
fn all(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("all", "block", args.value(0))?;
    let mut result = Value::Logic(true);
    let mut index = block.index();
    loop {
        match interp.evaluate_next(&block, index)? {
            Step::End => return Ok(result.into()),
            Step::Thrown(thrown) => return Ok(thrown.into()),
            Step::Value { value, next } => {
                if !value.is_truthy() {
                    return Ok(Value::None.into());
                }
                result = value;
                index = next;
            }
        }
    }
}

/// First value that is conditionally true and set.
fn any(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("any", "block", args.value(0))?;
    let mut index = block.index();
    loop {
        match interp.evaluate_next(&block, index)? {
            Step::End => return Ok(Value::None.into()),
            Step::Thrown(thrown) => return Ok(thrown.into()),
            Step::Value { value, next } => {
                if value.is_truthy() && !value.is_unset() {
                    return Ok(value.into());
                }
                index = next;
            }
        }
    }
}

/// Condition/body pairs.
///
/// The body expression is evaluated even when its condition is false, so
/// the scan lands on the next condition. A block body of a true condition
/// is then run unless `/only`.
fn case(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("case", "block", args.value(0))?;
    let all = args.refined(1);
    let only = args.refined(2);
    let mut result = Value::None;
    let mut index = block.index();
    loop {
        let (condition, after_condition) = match interp.evaluate_next(&block, index)? {
            Step::End => return Ok(result.into()),
            Step::Thrown(thrown) => return Ok(thrown.into()),
            Step::Value { value, next } => (value, next),
        };
        if condition.is_unset() {
            return Err(no_return());
        }
        let (body, after_body) = match interp.evaluate_next(&block, after_condition)? {
            Step::End => return Err(past_end()),
            Step::Thrown(thrown) => return Ok(thrown.into()),
            Step::Value { value, next } => (value, next),
        };
        index = after_body;
        if !condition.is_truthy() {
            continue;
        }
        result = propagate!(branch(interp, body, only)?);
        if !all {
            return Ok(result.into());
        }
    }
}

/// Compare `value` against each case item; run the body after a match.
///
/// Parens, get-words and get-paths in the cases are evaluated to produce
/// the item compared; anything else compares literally. Without a match
/// the result is the `/default` body, or the trailing item when the cases
/// end on one.
fn switch(interp: &mut Interpreter, args: Args) -> EvalResult {
    let value = args.value(0);
    let cases = block_arg("switch", "cases", args.value(1))?;
    let default = args.refinement_arg(2);
    let all = args.refined(4);
    let strict = args.refined(5);

    let mut fallout = Value::None;
    let mut matched: Option<Value> = None;
    let mut index = cases.index();
    while let Some(item) = cases.get(index) {
        index += 1;
        if matches!(item, Value::Block(_)) {
            fallout = Value::None;
            continue;
        }
        let candidate = propagate!(case_item(interp, item)?);
        let hit = if strict {
            strict_equal(&value, &candidate)
        } else {
            equal(&value, &candidate)
        };
        fallout = candidate.clone();
        if !hit {
            continue;
        }
        let Some((body, at)) = next_block(&cases, index) else {
            matched = Some(candidate);
            break;
        };
        index = at + 1;
        let result = propagate!(interp.evaluate_all(&body)?);
        if !all {
            return Ok(result.into());
        }
        matched = Some(result);
    }

    match (matched, default) {
        (Some(result), _) => Ok(result.into()),
        (None, Some(default)) => branch(interp, default, false),
        (None, None) => Ok(fallout.into()),
    }
}

fn case_item(interp: &mut Interpreter, item: Value) -> EvalResult {
    match item {
        Value::Paren(body) => interp.evaluate_all(&body),
        Value::Word(WordKind::GetWord, name) => {
            Ok(interp.env.lookup(name).unwrap_or(Value::Unset).into())
        }
        Value::Path(PathKind::GetPath, segments) => Ok(interp.get_path(&segments)?.into()),
        other => Ok(other.into()),
    }
}

fn next_block(cases: &BlockRef, from: usize) -> Option<(BlockRef, usize)> {
    (from..cases.series_len()).find_map(|at| match cases.get(at) {
        Some(Value::Block(body)) => Some((body, at)),
        _ => None,
    })
}

fn condition(func: &str, value: Value) -> Result<bool, EvalError> {
    if value.is_unset() {
        return Err(type_error(func, "condition", &value));
    }
    Ok(value.is_truthy())
}

fn if_(interp: &mut Interpreter, args: Args) -> EvalResult {
    if condition("if", args.value(0))? {
        branch(interp, args.value(1), args.refined(2))
    } else {
        Ok(Value::None.into())
    }
}

fn either(interp: &mut Interpreter, args: Args) -> EvalResult {
    let chosen = if condition("either", args.value(0))? {
        args.value(1)
    } else {
        args.value(2)
    };
    branch(interp, chosen, args.refined(3))
}

fn unless(interp: &mut Interpreter, args: Args) -> EvalResult {
    if condition("unless", args.value(0))? {
        Ok(Value::None.into())
    } else {
        branch(interp, args.value(1), args.refined(2))
    }
}
