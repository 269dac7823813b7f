//! Tide values and the two unwinding channels of the interpreter.
//!
//! - [`Value`] is the tagged cell passed between evaluation steps. Blocks,
//!   strings and objects are shared containers behind a [`Handle`].
//! - [`Outcome`] and [`Step`] carry the interrupt envelope ([`Thrown`]) used by
//!   BREAK, CONTINUE, RETURN, EXIT, QUIT and THROW. An interrupted result is a
//!   distinct variant, so a caller cannot read it as an ordinary value.
//! - [`EvalError`] is a fatal condition. It travels in the `Err` side of
//!   [`EvalResult`] and is only recovered by an explicit trap boundary.
//! - [`ProtectWalk`] applies or clears protection flags over container graphs
//!   with a walk-local visited set.

mod errors;
mod handle;
mod protect;
mod signal;
mod value;

pub use errors::{
    bad_refines, cannot_use, expect_arg, invalid_arg, invalid_path, invalid_spec,
    limited_fail_input, locked_word, need_value, no_arg, no_catch, no_loop_for_break,
    no_loop_for_continue, no_return, no_value, not_in_function, overflow, past_end, protected,
    stack_overflow, syntax_error, use_eval, use_fail, user_error, zero_divide, BacktraceFrame,
    EvalBacktrace, EvalError, EvalErrorKind, EvalNote,
};
pub use handle::{ContainerId, Handle};
pub use protect::{ProtectFlags, ProtectWalk};
pub use signal::{EvalResult, Outcome, Step, Thrown};
pub use value::{
    equal, form, mold, strict_equal, BlockData, BlockRef, Frame, Function, FunctionBody,
    HandlerShape, Key, Kind, NativeId, ObjectRef, Param, ParamKind, PathKind, Series, TextData,
    TextRef, Value, WordKind, WriteDenied,
};
