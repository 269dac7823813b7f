//! Series and object accessors. Writes go through `Series::data_mut`, which
//! refuses a protected series.

use rustc_hash::FxHashMap;
use tide_stack::ensure_sufficient_stack;

use super::{integer_arg, object_arg, type_error, Args, NativeDef};
use crate::interpreter::path::{pick as pick_at, poke as poke_at};
use crate::Interpreter;
use tide_value::{BlockRef, ContainerId, EvalResult, Frame, Handle, TextRef, Value};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::prefix("append", "series value /only", append),
    NativeDef::prefix("insert", "series value /only", insert),
    NativeDef::prefix("poke", "series index value", poke),
    NativeDef::prefix("clear", "series", clear),
    NativeDef::prefix("first", "series", first),
    NativeDef::prefix("pick", "series index", pick),
    NativeDef::prefix("length?", "series", length),
    NativeDef::prefix("copy", "value /deep", copy),
    NativeDef::prefix("words-of", "object", words_of),
];

/// Items to splice: a block's contents unless `only`, otherwise the value.
fn splice(value: Value, only: bool) -> Vec<Value> {
    match value {
        Value::Block(block) if !only => block.to_vec(),
        other => vec![other],
    }
}

fn append(interp: &mut Interpreter, args: Args) -> EvalResult {
    let series = args.value(0);
    match &series {
        Value::Block(block) => {
            let items = splice(args.value(1), args.refined(2));
            block.series().borrow_mut().data_mut()?.extend(items);
        }
        Value::String(text) => {
            let addition = interp.form(&args.value(1));
            text.series().borrow_mut().data_mut()?.push_str(&addition);
        }
        other => return Err(type_error("append", "series", other)),
    }
    Ok(series.into())
}

/// Insert at the series position; the result is positioned after the
/// inserted items.
fn insert(interp: &mut Interpreter, args: Args) -> EvalResult {
    match args.value(0) {
        Value::Block(block) => {
            let items = splice(args.value(1), args.refined(2));
            let count = items.len();
            let at = block.index().min(block.series_len());
            block
                .series()
                .borrow_mut()
                .data_mut()?
                .splice(at..at, items);
            Ok(Value::Block(block.at(at + count)).into())
        }
        Value::String(text) => {
            let addition = interp.form(&args.value(1));
            text.series().borrow_mut().data_mut()?.insert_str(0, &addition);
            Ok(Value::String(text).into())
        }
        other => Err(type_error("insert", "series", &other)),
    }
}

fn poke(_: &mut Interpreter, args: Args) -> EvalResult {
    let Value::Block(block) = args.value(0) else {
        return Err(type_error("poke", "series", &args.value(0)));
    };
    let index = integer_arg("poke", "index", &args.value(1))?;
    let value = args.value(2);
    poke_at(&block, index, value.clone())?;
    Ok(value.into())
}

fn clear(_: &mut Interpreter, args: Args) -> EvalResult {
    let series = args.value(0);
    match &series {
        Value::Block(block) => {
            let at = block.index();
            block.series().borrow_mut().data_mut()?.truncate(at);
        }
        Value::String(text) => text.series().borrow_mut().data_mut()?.clear(),
        Value::None => {}
        other => return Err(type_error("clear", "series", other)),
    }
    Ok(series.into())
}

fn first(_: &mut Interpreter, args: Args) -> EvalResult {
    pick_value("first", args.value(0), 1)
}

fn pick(_: &mut Interpreter, args: Args) -> EvalResult {
    let index = integer_arg("pick", "index", &args.value(1))?;
    pick_value("pick", args.value(0), index)
}

/// 1-based; none when out of range.
fn pick_value(func: &str, series: Value, index: i64) -> EvalResult {
    match series {
        Value::Block(block) | Value::Paren(block) => Ok(pick_at(&block, index).into()),
        Value::String(text) => {
            let picked = usize::try_from(index)
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|offset| text.text().chars().nth(offset));
            Ok(picked
                .map_or(Value::None, |ch| Value::string(ch.to_string()))
                .into())
        }
        other => Err(type_error(func, "series", &other)),
    }
}

fn length(_: &mut Interpreter, args: Args) -> EvalResult {
    let len = match args.value(0) {
        Value::Block(block) | Value::Paren(block) => block.len(),
        Value::String(text) => text.char_len(),
        Value::Object(frame) => frame.borrow().words().len(),
        other => return Err(type_error("length?", "series", &other)),
    };
    Ok(Value::Integer(i64::try_from(len).unwrap_or(i64::MAX)).into())
}

fn copy(_: &mut Interpreter, args: Args) -> EvalResult {
    let value = args.value(0);
    if args.refined(1) {
        return Ok(DeepCopy::default().copy(&value).into());
    }
    Ok(shallow_copy(&value).into())
}

fn shallow_copy(value: &Value) -> Value {
    match value {
        Value::Block(block) => Value::Block(BlockRef::new(block.to_vec())),
        Value::Paren(block) => Value::Paren(BlockRef::new(block.to_vec())),
        Value::String(text) => Value::String(TextRef::new(text.text())),
        Value::Object(frame) => {
            Value::Object(Handle::new(Frame::with_fields(frame.borrow().visible_fields())))
        }
        other => other.clone(),
    }
}

/// Deep copy of nested blocks. A block reached twice is copied once, so a
/// cyclic block copies to a cyclic block.
#[derive(Default)]
struct DeepCopy {
    copies: FxHashMap<ContainerId, BlockRef>,
}

impl DeepCopy {
    fn copy(&mut self, value: &Value) -> Value {
        match value {
            Value::Block(block) => Value::Block(self.copy_block(block)),
            Value::Paren(block) => Value::Paren(self.copy_block(block)),
            other => shallow_copy(other),
        }
    }

    fn copy_block(&mut self, block: &BlockRef) -> BlockRef {
        if let Some(copy) = self.copies.get(&block.id()) {
            return copy.clone();
        }
        let copy = BlockRef::new(Vec::new());
        self.copies.insert(block.id(), copy.clone());
        let items: Vec<Value> =
            ensure_sufficient_stack(|| block.to_vec().iter().map(|item| self.copy(item)).collect());
        if let Ok(data) = copy.series().borrow_mut().data_mut() {
            *data = items;
        }
        copy
    }
}

fn words_of(_: &mut Interpreter, args: Args) -> EvalResult {
    let frame = object_arg("words-of", "object", args.value(0))?;
    let words = frame.borrow().words().into_iter().map(Value::word).collect();
    Ok(Value::block(words).into())
}
