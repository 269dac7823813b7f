//! Words, printing and type predicates.

use super::{type_error, Args, NativeDef};
use crate::Interpreter;
use tide_value::{no_value, propagate, EvalResult, Value};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("set", "word value", set),
    NativeDef::prefix("get", "word", get),
    NativeDef::prefix("value?", "word", value_q),
    NativeDef::prefix("form", "value", form),
    NativeDef::prefix("mold", "value", mold),
    NativeDef::prefix("print", "value", print),
    NativeDef::prefix("type?", "value", type_q),
    NativeDef::prefix("none?", "value", none_q),
    NativeDef::prefix("unset?", "value", unset_q),
    NativeDef::prefix("error?", "value", error_q),
];

fn set(interp: &mut Interpreter, args: Args) -> EvalResult {
    let word = args.value(0);
    let Some(name) = word.as_any_word() else {
        return Err(type_error("set", "word", &word));
    };
    let value = args.value(1);
    interp.assign_word(name, value.clone())?;
    Ok(value.into())
}

fn get(interp: &mut Interpreter, args: Args) -> EvalResult {
    let word = args.value(0);
    let Some(name) = word.as_any_word() else {
        return Err(type_error("get", "word", &word));
    };
    match interp.env.lookup(name) {
        Some(value) => Ok(value.into()),
        None => Err(no_value(interp.interner().lookup(name))),
    }
}

fn value_q(interp: &mut Interpreter, args: Args) -> EvalResult {
    let bound = args
        .value(0)
        .as_any_word()
        .and_then(|name| interp.env.lookup(name))
        .is_some_and(|value| !value.is_unset());
    Ok(Value::Logic(bound).into())
}

fn form(interp: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::string(interp.form(&args.value(0))).into())
}

fn mold(interp: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::string(interp.mold(&args.value(0))).into())
}

/// A block is reduced before it is formed.
fn print(interp: &mut Interpreter, args: Args) -> EvalResult {
    let value = match args.value(0) {
        Value::Block(block) => propagate!(interp.reduce(&block)?),
        other => other,
    };
    let text = interp.form(&value);
    interp.print_handler().println(&text);
    Ok(Value::Unset.into())
}

fn type_q(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::Datatype(args.value(0).kind()).into())
}

fn none_q(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::Logic(args.value(0).is_none()).into())
}

fn unset_q(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::Logic(args.value(0).is_unset()).into())
}

fn error_q(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::Logic(matches!(args.value(0), Value::Error(_))).into())
}
