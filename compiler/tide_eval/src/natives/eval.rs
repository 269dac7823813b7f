//! Evaluation natives: DO, REDUCE, ALSO, COMMENT and the function and
//! object makers.

use std::rc::Rc;

use super::{block_arg, Args, NativeDef};
use crate::Interpreter;
use tide_value::{
    invalid_spec, syntax_error, use_eval, use_fail, BlockRef, EvalError, EvalResult,
    Frame, Function, FunctionBody, Handle, Outcome, Param, ParamKind, Value, WordKind,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("do", "value", do_),
    NativeDef::prefix("reduce", "block", reduce),
    NativeDef::prefix("also", "value1 value2", also),
    NativeDef::prefix("comment", "'value", comment),
    NativeDef::prefix("func", "spec body", func),
    NativeDef::prefix("does", "body", does),
    NativeDef::prefix("object", "body", object),
    NativeDef::prefix("context", "body", object),
];

fn do_(interp: &mut Interpreter, args: Args) -> EvalResult {
    match args.value(0) {
        Value::Block(block) | Value::Paren(block) => interp.evaluate_all(&block),
        Value::None => Ok(Value::None.into()),
        Value::String(text) => {
            let block = interp
                .load(&text.text())
                .map_err(|err| syntax_error(err.to_string()))?;
            interp.evaluate_all(&block)
        }
        Value::Error(_) => Err(use_fail()),
        other => Err(use_eval(other.kind().name())),
    }
}

fn reduce(interp: &mut Interpreter, args: Args) -> EvalResult {
    let block = block_arg("reduce", "block", args.value(0))?;
    interp.reduce(&block)
}

fn also(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(args.value(0).into())
}

fn comment(_: &mut Interpreter, _: Args) -> EvalResult {
    Ok(Value::Unset.into())
}

fn func(interp: &mut Interpreter, args: Args) -> EvalResult {
    let spec = block_arg("func", "spec", args.value(0))?;
    let body = block_arg("func", "body", args.value(1))?;
    let params = parse_params(interp, &spec)?;
    Ok(user_function(params, body).into())
}

fn does(_: &mut Interpreter, args: Args) -> EvalResult {
    let body = block_arg("does", "body", args.value(0))?;
    Ok(user_function(Vec::new(), body).into())
}

fn user_function(params: Vec<Param>, body: BlockRef) -> Value {
    Value::Function(Rc::new(Function {
        params,
        body: FunctionBody::User(body),
        infix: false,
    }))
}

/// Parameters from a FUNC spec block. Strings (doc notes) and blocks
/// (type notes) are skipped.
fn parse_params(interp: &Interpreter, spec: &BlockRef) -> Result<Vec<Param>, EvalError> {
    let mut params = Vec::new();
    for item in spec.to_vec() {
        let (kind, name) = match item {
            Value::Word(WordKind::Word, name) => (ParamKind::Normal, name),
            Value::Word(WordKind::LitWord, name) => (ParamKind::Literal, name),
            Value::Word(WordKind::GetWord, name) => (ParamKind::Get, name),
            Value::Word(WordKind::Refinement, name) => (ParamKind::Refinement, name),
            Value::String(_) | Value::Block(_) => continue,
            other => return Err(invalid_spec(&interp.mold(&other))),
        };
        if params.iter().any(|param: &Param| param.name == name) {
            return Err(invalid_spec(interp.interner().lookup(name)));
        }
        params.push(Param { name, kind });
    }
    Ok(params)
}

/// Make an object from a body block.
///
/// Top-level set-words in the body become the object's fields; the body is
/// then evaluated with the object as the innermost scope.
fn object(interp: &mut Interpreter, args: Args) -> EvalResult {
    let body = block_arg("object", "body", args.value(0))?;
    let mut fields = Vec::new();
    for item in body.to_vec() {
        if let Value::Word(WordKind::SetWord, name) = item {
            if !fields.iter().any(|(field, _)| *field == name) {
                fields.push((name, Value::None));
            }
        }
    }
    let frame = Handle::new(Frame::with_fields(fields));
    let outcome = interp.with_frame(frame.clone(), |scoped| scoped.evaluate_all(&body))?;
    if let Outcome::Thrown(thrown) = outcome {
        return Ok(thrown.into());
    }
    Ok(Value::Object(frame).into())
}
