//! Function application.
//!
//! Arguments are gathered from the call site: fixed parameters first, then
//! each refinement named in the path, in call-site order, followed by that
//! refinement's own arguments. Slots of refinements that were not used stay
//! `none`.

use std::rc::Rc;

use smallvec::{smallvec, SmallVec};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::natives::Args;
use tide_ir::{sym, Name};
use tide_value::{
    bad_refines, expect_arg, invalid_arg, invalid_path, no_arg, BlockRef, EvalError, EvalResult,
    Frame, Function, FunctionBody, Handle, HandlerShape, Outcome, Param, ParamKind, Step, Value,
    WordKind,
};

/// A CATCH or TRAP handler, classified when the construct receives it.
#[derive(Clone, Debug)]
pub(crate) enum Handler {
    /// Evaluated; its result becomes the construct's result.
    Block(BlockRef),
    /// Called with as many values as its shape takes.
    Function(Rc<Function>, HandlerShape),
}

impl Handler {
    pub(crate) fn classify(func: &str, value: Value) -> Result<Handler, EvalError> {
        match value {
            Value::Block(block) => Ok(Handler::Block(block)),
            Value::Function(function) => {
                let shape = function.handler_shape();
                Ok(Handler::Function(function, shape))
            }
            other => Err(expect_arg(func, "handler", other.kind().name())),
        }
    }
}

impl Interpreter {
    /// Gather arguments for `func` from `block` at `next` and apply it.
    ///
    /// `refinements` are the path segments after the function's name.
    pub(crate) fn call(
        &mut self,
        name: Name,
        func: &Rc<Function>,
        refinements: &[Value],
        block: &BlockRef,
        next: usize,
    ) -> Result<Step, EvalError> {
        let mut values: SmallVec<[Value; 8]> = smallvec![Value::None; func.declared_arity()];
        let mut pos = next;

        for slot in 0..func.fixed_arity() {
            match self.gather_arg(name, func.params[slot], block, pos)? {
                Step::Value { value, next } => {
                    values[slot] = value;
                    pos = next;
                }
                other => return Ok(other),
            }
        }

        let mut used: SmallVec<[usize; 4]> = SmallVec::new();
        for segment in refinements {
            let Some(slot) = segment.as_any_word().and_then(|word| func.refinement(word)) else {
                return Err(invalid_path(self.interner.lookup(name), &self.mold(segment)));
            };
            if used.contains(&slot) {
                return Err(bad_refines());
            }
            used.push(slot);
            values[slot] = Value::Logic(true);
            for arg in slot + 1..func.declared_arity() {
                if func.is_refinement_param(arg) {
                    break;
                }
                match self.gather_arg(name, func.params[arg], block, pos)? {
                    Step::Value { value, next } => {
                        values[arg] = value;
                        pos = next;
                    }
                    other => return Ok(other),
                }
            }
        }

        Ok(match self.invoke(name, func, Args::new(values))? {
            Outcome::Value(value) => Step::Value { value, next: pos },
            Outcome::Thrown(thrown) => Step::Thrown(thrown),
        })
    }

    fn gather_arg(
        &mut self,
        func: Name,
        param: Param,
        block: &BlockRef,
        pos: usize,
    ) -> Result<Step, EvalError> {
        let (func, arg) = (self.interner.lookup(func), self.interner.lookup(param.name));
        let missing = || no_arg(func, arg);
        match param.kind {
            ParamKind::Normal | ParamKind::Refinement => match self.evaluate_next(block, pos)? {
                Step::End => Err(missing()),
                step => Ok(step),
            },
            ParamKind::Literal => {
                let value = block.get(pos).ok_or_else(missing)?;
                Ok(Step::Value {
                    value,
                    next: pos + 1,
                })
            }
            ParamKind::Get => {
                let value = match block.get(pos).ok_or_else(missing)? {
                    Value::Word(WordKind::Word | WordKind::GetWord, word) => {
                        self.env.lookup(word).unwrap_or(Value::Unset)
                    }
                    other => other,
                };
                Ok(Step::Value {
                    value,
                    next: pos + 1,
                })
            }
        }
    }

    /// Run `func` with gathered arguments inside a call frame.
    pub(crate) fn invoke(&mut self, name: Name, func: &Function, args: Args) -> EvalResult {
        self.call_stack
            .push(CallFrame { name })
            .map_err(|err| self.call_stack.attach_backtrace(err, &self.interner))?;

        let result = match &func.body {
            FunctionBody::Native(id) => match self.natives.get(usize::from(id.0)).copied() {
                Some(def) => (def.run)(self, args),
                None => Err(invalid_arg(self.interner.lookup(name))),
            },
            FunctionBody::User(body) => self.run_user(func, body, args),
        };
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, &self.interner));
        self.call_stack.pop();
        result
    }

    /// Invoke with values already in hand, as infix operators are.
    pub(crate) fn invoke_values<const N: usize>(
        &mut self,
        name: Name,
        func: &Function,
        values: [Value; N],
    ) -> EvalResult {
        let mut slots: SmallVec<[Value; 8]> = smallvec![Value::None; func.declared_arity()];
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = value;
        }
        self.invoke(name, func, Args::new(slots))
    }

    /// Apply `func` to positional values, padding missing ones with none.
    pub fn apply(&mut self, func: &Function, values: impl IntoIterator<Item = Value>) -> EvalResult {
        tracing::trace!(arity = func.declared_arity(), "apply");
        let mut slots: SmallVec<[Value; 8]> = smallvec![Value::None; func.declared_arity()];
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = value;
        }
        self.invoke(Name::EMPTY, func, Args::new(slots))
    }

    /// A user function's body runs in a fresh frame of its parameters.
    /// RETURN and EXIT stop at this boundary.
    fn run_user(&mut self, func: &Function, body: &BlockRef, args: Args) -> EvalResult {
        let frame = Frame::with_fields(
            func.params
                .iter()
                .map(|param| param.name)
                .zip(args.into_values()),
        );
        let outcome = self.with_frame(Handle::new(frame), |scoped| scoped.evaluate_all(body))?;
        match outcome {
            Outcome::Thrown(thrown) if thrown.is_named(sym::RETURN) || thrown.is_named(sym::EXIT) => {
                let (payload, _) = thrown.take();
                Ok(Outcome::Value(payload))
            }
            other => Ok(other),
        }
    }

    /// Run a CATCH or TRAP handler.
    ///
    /// `name` is the interrupt's name for CATCH and `None` for TRAP, where a
    /// binary handler receives only the error.
    pub(crate) fn dispatch_handler(
        &mut self,
        handler: &Handler,
        payload: Value,
        name: Option<Value>,
    ) -> EvalResult {
        match handler {
            Handler::Block(block) => self.evaluate_all(block),
            Handler::Function(func, HandlerShape::Nullary) => self.apply(func, std::iter::empty()),
            Handler::Function(func, HandlerShape::Unary) => self.apply(func, [payload]),
            Handler::Function(func, HandlerShape::Binary) => match name {
                Some(name) => self.apply(func, [payload, name]),
                None => self.apply(func, [payload]),
            },
        }
    }
}
