//! Tide Eval - tree-walking interpreter and control-flow core.
//!
//! # Architecture
//!
//! - [`Interpreter`]: evaluates blocks one expression at a time
//!   ([`Interpreter::evaluate_next`]) or to completion
//!   ([`Interpreter::evaluate_all`]).
//! - [`Environment`]: dynamic binding over a stack of frames.
//! - Natives: BREAK, CONTINUE, RETURN, EXIT, QUIT, THROW, CATCH, TRAP,
//!   ATTEMPT, PROTECT, UNPROTECT, ALL, ANY, CASE, SWITCH, IF, EITHER, UNLESS
//!   and the supporting natives they are exercised with.
//!
//! Two unwinding channels run through every native:
//!
//! - interrupts ([`Outcome::Thrown`]) come back as ordinary `Ok` results and
//!   are forwarded with [`propagate!`](tide_value::propagate) until a loop,
//!   a function call or a CATCH claims them;
//! - fatal conditions (`Err(EvalError)`) unwind through `?` to the innermost
//!   recovery point pushed by TRAP or ATTEMPT, or to the host.

mod diagnostics;
mod environment;
mod eval_mode;
pub mod interpreter;
mod natives;
mod print_handler;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::Environment;
pub use eval_mode::EvalMode;
pub use interpreter::{
    Completion, Interpreter, InterpreterBuilder, LegacyOptions, PointState, RecoveryGuard,
    RecoveryToken, ScopedInterpreter,
};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};

// Re-export value types from tide_value
pub use tide_value::{
    propagate, BlockRef, EvalError, EvalErrorKind, EvalResult, Outcome, Step, Thrown, Value,
};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
