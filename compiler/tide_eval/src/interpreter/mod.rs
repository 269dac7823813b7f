//! Tree-walking interpreter for Tide.
//!
//! # Architecture
//!
//! - `evaluate.rs`: the evaluator interface. [`Interpreter::evaluate_next`]
//!   advances one expression, [`Interpreter::evaluate_all`] runs a block to
//!   its tail. Both report interrupts as [`Step::Thrown`]/[`Outcome::Thrown`]
//!   and fatal conditions as `Err`.
//! - `path.rs`: path selection, set-paths and field resolution.
//! - `apply.rs`: argument gathering, native and user function invocation,
//!   `apply` with positional values, and CATCH/TRAP handler dispatch.
//! - `recovery.rs`: recovery points pushed by TRAP and ATTEMPT.
//! - `scope_guard.rs`: RAII scopes for object bodies and user function calls.
//!
//! # Unwinding
//!
//! An interrupt is an ordinary return value. Each caller of the evaluator
//! either claims it (a loop claims `break`/`continue`, a user function claims
//! `return`/`exit`, CATCH claims matching throws) or hands it back with
//! [`propagate!`](tide_value::propagate). A fatal condition travels on the
//! `Err` side through `?` and only a recovery point stops it.

mod apply;
mod builder;
mod evaluate;
pub(crate) mod path;
mod recovery;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub(crate) use apply::Handler;
pub use recovery::{PointState, RecoveryGuard, RecoveryToken};
pub use scope_guard::ScopedInterpreter;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::natives::NativeDef;
use crate::print_handler::SharedPrintHandler;
use recovery::RecoveryStack;
use tide_ir::{sym, SharedInterner, StringInterner};
use tide_load::LoadError;
use tide_value::{
    mold, no_catch, no_loop_for_break, no_loop_for_continue, not_in_function, BlockRef,
    EvalError, Outcome, Thrown, Value,
};

/// Compatibility switches for programs written against older semantics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyOptions {
    /// EXIT throws `return` instead of `exit`.
    pub exit_as_return: bool,
}

/// How a top-level run ended.
#[derive(Clone, Debug)]
pub enum Completion {
    /// The block ran to its tail.
    Value(Value),
    /// QUIT was called; the payload is the requested exit value.
    Quit(Value),
}

impl Completion {
    /// Process exit status: 0, or the integer QUIT returned with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Completion::Quit(Value::Integer(code)) => i32::try_from(*code).unwrap_or(1),
            Completion::Value(_) | Completion::Quit(_) => 0,
        }
    }
}

/// Tree-walking interpreter.
///
/// Created through [`InterpreterBuilder`], which registers the natives and
/// the constant words in the root context.
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    pub(crate) env: Environment,
    /// Live call stack for depth limiting and backtraces.
    pub(crate) call_stack: CallStack,
    /// Armed recovery points, innermost last.
    pub(crate) recovery: RecoveryStack,
    /// Native table; `NativeId` indexes into it.
    pub(crate) natives: Vec<&'static NativeDef>,
    pub(crate) mode: EvalMode,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) legacy: LegacyOptions,
}

impl Interpreter {
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn legacy(&self) -> LegacyOptions {
        self.legacy
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Number of armed recovery points.
    pub fn recovery_depth(&self) -> usize {
        self.recovery.depth()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured so far; empty when printing to stdout.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    /// Load source text with this interpreter's interner.
    pub fn load(&self, source: &str) -> Result<BlockRef, LoadError> {
        tide_load::load(source, &self.interner)
    }

    /// Evaluate a top-level block.
    ///
    /// QUIT ends the run normally. Any other interrupt that reaches this
    /// level had no enclosing loop, function or CATCH and is reported as an
    /// error.
    #[tracing::instrument(level = "debug", skip_all, fields(len = block.len()))]
    pub fn run(&mut self, block: &BlockRef) -> Result<Completion, EvalError> {
        match self.evaluate_all(block)? {
            Outcome::Value(value) => Ok(Completion::Value(value)),
            Outcome::Thrown(thrown) if thrown.is_named(sym::QUIT) => {
                let (payload, _) = thrown.take();
                Ok(Completion::Quit(payload))
            }
            Outcome::Thrown(thrown) => Err(self.uncaught(thrown)),
        }
    }

    /// Diagnostic for an interrupt nothing claimed.
    pub(crate) fn uncaught(&self, thrown: Thrown) -> EvalError {
        if thrown.is_named(sym::BREAK) {
            no_loop_for_break()
        } else if thrown.is_named(sym::CONTINUE) {
            no_loop_for_continue()
        } else if thrown.is_named(sym::RETURN) || thrown.is_named(sym::EXIT) {
            not_in_function()
        } else {
            no_catch(&mold(thrown.name(), &self.interner))
        }
    }

    /// MOLD with this interpreter's interner.
    pub fn mold(&self, value: &Value) -> String {
        mold(value, &self.interner)
    }

    /// FORM with this interpreter's interner.
    pub fn form(&self, value: &Value) -> String {
        tide_value::form(value, &self.interner)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
