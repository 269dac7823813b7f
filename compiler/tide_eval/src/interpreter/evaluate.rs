//! The evaluator interface.
//!
//! `evaluate_next` advances one expression: a term followed by any infix
//! operators. `evaluate_all` repeats it to the tail of the block. Every
//! call site inspects the returned [`Step`] or [`Outcome`] before using the
//! value, so an interrupt can never be mistaken for an ordinary result.

use std::rc::Rc;

use super::Interpreter;
use tide_ir::Name;
use tide_stack::ensure_sufficient_stack;
use tide_value::{
    locked_word, need_value, no_arg, no_value, protected, BlockRef, EvalError, Function,
    Outcome, PathKind, Step, Value, WordKind, WriteDenied,
};

impl Interpreter {
    /// Evaluate the expression starting at absolute position `index`.
    pub fn evaluate_next(&mut self, block: &BlockRef, index: usize) -> Result<Step, EvalError> {
        ensure_sufficient_stack(|| self.eval_expression(block, index))
    }

    /// Evaluate from the block's position to its tail.
    ///
    /// The result is the last expression's value, or unset for an empty
    /// block.
    pub fn evaluate_all(&mut self, block: &BlockRef) -> Result<Outcome, EvalError> {
        let mut result = Value::Unset;
        let mut index = block.index();
        loop {
            match self.evaluate_next(block, index)? {
                Step::Value { value, next } => {
                    result = value;
                    index = next;
                }
                Step::End => return Ok(Outcome::Value(result)),
                Step::Thrown(thrown) => return Ok(Outcome::Thrown(thrown)),
            }
        }
    }

    /// Evaluate every expression and collect the results into a new block.
    pub fn reduce(&mut self, block: &BlockRef) -> Result<Outcome, EvalError> {
        let mut items = Vec::with_capacity(block.len());
        let mut index = block.index();
        loop {
            match self.evaluate_next(block, index)? {
                Step::Value { value, next } => {
                    items.push(value);
                    index = next;
                }
                Step::End => return Ok(Outcome::Value(Value::block(items))),
                Step::Thrown(thrown) => return Ok(Outcome::Thrown(thrown)),
            }
        }
    }

    fn eval_expression(&mut self, block: &BlockRef, index: usize) -> Result<Step, EvalError> {
        let Some(item) = block.get(index) else {
            return Ok(Step::End);
        };
        let (mut value, mut next) = match self.eval_term(item, block, index + 1)? {
            Step::Value { value, next } => (value, next),
            other => return Ok(other),
        };

        while let Some((name, op)) = self.infix_at(block, next) {
            let Some(operand) = block.get(next + 1) else {
                return Err(no_arg(self.interner.lookup(name), "value2"));
            };
            let right = match self.eval_term(operand, block, next + 2)? {
                Step::Value { value, next: after } => {
                    next = after;
                    value
                }
                other => return Ok(other),
            };
            match self.invoke_values(name, &op, [value, right])? {
                Outcome::Value(result) => value = result,
                Outcome::Thrown(thrown) => return Ok(Step::Thrown(thrown)),
            }
        }
        Ok(Step::Value { value, next })
    }

    /// The infix operator named by the word at `index`, if any.
    fn infix_at(&self, block: &BlockRef, index: usize) -> Option<(Name, Rc<Function>)> {
        let Some(Value::Word(WordKind::Word, name)) = block.get(index) else {
            return None;
        };
        match self.env.lookup(name) {
            Some(Value::Function(func)) if func.infix => Some((name, func)),
            _ => None,
        }
    }

    /// Evaluate one term. `next` is the position after `item`.
    fn eval_term(&mut self, item: Value, block: &BlockRef, next: usize) -> Result<Step, EvalError> {
        let value = match item {
            Value::Word(WordKind::Word, name) => match self.env.lookup(name) {
                Some(Value::Function(func)) => return self.call(name, &func, &[], block, next),
                Some(value) if !value.is_unset() => value,
                _ => return Err(no_value(self.interner.lookup(name))),
            },
            Value::Word(WordKind::SetWord, name) => {
                return match self.evaluate_next(block, next)? {
                    Step::Value { value, next } if !value.is_unset() => {
                        self.assign_word(name, value.clone())?;
                        Ok(Step::Value { value, next })
                    }
                    Step::Thrown(thrown) => Ok(Step::Thrown(thrown)),
                    Step::Value { .. } | Step::End => {
                        Err(need_value(self.interner.lookup(name)))
                    }
                };
            }
            Value::Word(WordKind::GetWord, name) => self.env.lookup(name).unwrap_or(Value::Unset),
            Value::Word(WordKind::LitWord, name) => Value::word(name),
            Value::Path(PathKind::Path, segments) => {
                return self.eval_path(&segments, block, next);
            }
            Value::Path(PathKind::SetPath, segments) => {
                return match self.evaluate_next(block, next)? {
                    Step::Value { value, next } if !value.is_unset() => {
                        self.set_path(&segments, value.clone())?;
                        Ok(Step::Value { value, next })
                    }
                    Step::Thrown(thrown) => Ok(Step::Thrown(thrown)),
                    Step::Value { .. } | Step::End => {
                        Err(need_value(&self.mold(&Value::Path(PathKind::SetPath, segments))))
                    }
                };
            }
            Value::Path(PathKind::GetPath, segments) => self.get_path(&segments)?,
            Value::Path(PathKind::LitPath, segments) => Value::Path(PathKind::Path, segments),
            Value::Paren(body) => match self.evaluate_all(&body)? {
                Outcome::Value(value) => value,
                Outcome::Thrown(thrown) => return Ok(Step::Thrown(thrown)),
            },
            other => other,
        };
        Ok(Step::Value { value, next })
    }

    /// Assign through the binding of `name`.
    pub(crate) fn assign_word(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        self.env.assign(name, value).map_err(|denied| match denied {
            WriteDenied::Locked(word) => locked_word(self.interner.lookup(word)),
            WriteDenied::Protected => protected(),
        })
    }
}
