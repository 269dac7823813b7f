//! Path evaluation.
//!
//! `a/b/c` selects through objects (by field), blocks (by 1-based index, or
//! the value after a matching word) and error objects (`/id`, `/message`).
//! A function found at the head, or anywhere along the path, is applied
//! with the remaining segments as refinements.

use std::rc::Rc;

use super::Interpreter;
use tide_ir::{sym, Name};
use tide_value::{
    equal, invalid_path, locked_word, no_value, past_end, protected, BlockRef, EvalError,
    ObjectRef, PathKind, Step, Value, WriteDenied,
};

impl Interpreter {
    pub(super) fn eval_path(
        &mut self,
        segments: &Rc<[Value]>,
        block: &BlockRef,
        next: usize,
    ) -> Result<Step, EvalError> {
        let mut value = self.path_head(segments)?;
        if let Value::Function(func) = &value {
            let name = segments[0].as_any_word().unwrap_or(Name::EMPTY);
            return self.call(name, &Rc::clone(func), &segments[1..], block, next);
        }
        for (offset, segment) in segments.iter().enumerate().skip(1) {
            value = self.select(&value, segment, segments)?;
            if let Value::Function(func) = &value {
                let name = segment.as_any_word().unwrap_or(Name::EMPTY);
                return self.call(name, &Rc::clone(func), &segments[offset + 1..], block, next);
            }
        }
        Ok(Step::Value { value, next })
    }

    /// Select through every segment without applying functions.
    pub(crate) fn get_path(&self, segments: &Rc<[Value]>) -> Result<Value, EvalError> {
        let mut value = self.path_head(segments)?;
        for segment in segments.iter().skip(1) {
            value = self.select(&value, segment, segments)?;
        }
        Ok(value)
    }

    pub(super) fn set_path(&mut self, segments: &Rc<[Value]>, value: Value) -> Result<(), EvalError> {
        let (target, last) = self.path_target(segments)?;
        match (&target, last) {
            (Value::Object(frame), Value::Word(_, name)) => {
                let index = frame
                    .borrow()
                    .find(*name)
                    .ok_or_else(|| self.path_error(segments, last))?;
                let assigned = frame.borrow_mut().assign(index, value);
                assigned.map_err(|denied| match denied {
                    WriteDenied::Locked(word) => locked_word(self.interner.lookup(word)),
                    WriteDenied::Protected => protected(),
                })
            }
            (Value::Block(series), Value::Integer(position)) => poke(series, *position, value),
            _ => Err(self.path_error(segments, last)),
        }
    }

    /// The object field a path names, if it names one.
    pub(crate) fn resolve_path_field(
        &self,
        segments: &Rc<[Value]>,
    ) -> Result<Option<(ObjectRef, usize)>, EvalError> {
        let (target, last) = self.path_target(segments)?;
        let (Value::Object(frame), Some(name)) = (target, last.as_any_word()) else {
            return Ok(None);
        };
        let index = frame.borrow().find(name);
        Ok(index.map(|index| (frame, index)))
    }

    /// Container selected by all but the last segment, plus the last segment.
    fn path_target<'s>(&self, segments: &'s Rc<[Value]>) -> Result<(Value, &'s Value), EvalError> {
        let Some((last, init)) = segments.split_last() else {
            return Err(self.path_error(segments, &Value::None));
        };
        if init.is_empty() {
            return Err(self.path_error(segments, last));
        }
        let mut target = self.path_head(segments)?;
        for segment in &init[1..] {
            target = self.select(&target, segment, segments)?;
        }
        Ok((target, last))
    }

    fn path_head(&self, segments: &Rc<[Value]>) -> Result<Value, EvalError> {
        let head = segments.first().unwrap_or(&Value::None);
        let Some(name) = head.as_any_word() else {
            return Err(self.path_error(segments, head));
        };
        match self.env.lookup(name) {
            Some(value) if !value.is_unset() => Ok(value),
            _ => Err(no_value(self.interner.lookup(name))),
        }
    }

    fn select(
        &self,
        container: &Value,
        segment: &Value,
        segments: &Rc<[Value]>,
    ) -> Result<Value, EvalError> {
        match (container, segment) {
            (Value::Object(frame), Value::Word(_, name)) => frame
                .borrow()
                .get(*name)
                .ok_or_else(|| self.path_error(segments, segment)),
            (Value::Block(series) | Value::Paren(series), Value::Integer(position)) => {
                Ok(pick(series, *position))
            }
            (Value::Block(series), Value::Word(_, _)) => {
                let items = series.to_vec();
                let found = items.iter().position(|item| equal(item, segment));
                Ok(found
                    .and_then(|at| items.get(at + 1).cloned())
                    .unwrap_or(Value::None))
            }
            (Value::Error(err), Value::Word(_, name)) if *name == sym::ID => {
                Ok(Value::word(self.interner.intern(err.id())))
            }
            (Value::Error(err), Value::Word(_, name)) if *name == sym::MESSAGE => {
                Ok(Value::string(err.message()))
            }
            _ => Err(self.path_error(segments, segment)),
        }
    }

    #[cold]
    fn path_error(&self, segments: &Rc<[Value]>, segment: &Value) -> EvalError {
        invalid_path(
            &self.mold(&Value::Path(PathKind::Path, Rc::clone(segments))),
            &self.mold(segment),
        )
    }
}

/// 1-based selection relative to the series position; none when out of range.
pub(crate) fn pick(series: &BlockRef, position: i64) -> Value {
    usize::try_from(position)
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|offset| series.item(offset))
        .unwrap_or(Value::None)
}

/// 1-based replacement relative to the series position.
pub(crate) fn poke(series: &BlockRef, position: i64, value: Value) -> Result<(), EvalError> {
    let offset = usize::try_from(position)
        .ok()
        .and_then(|position| position.checked_sub(1))
        .ok_or_else(past_end)?;
    let mut data = series.series().borrow_mut();
    let slot = data
        .data_mut()?
        .get_mut(series.index() + offset)
        .ok_or_else(past_end)?;
    *slot = value;
    Ok(())
}
