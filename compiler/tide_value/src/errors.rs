//! Fatal conditions raised during evaluation.
//!
//! A fatal condition is an [`EvalError`]. It unwinds through `?` to the
//! innermost TRAP or ATTEMPT recovery point, or to the host when none is
//! active. Errors are built through the `#[cold]` factory functions below,
//! never by filling in the struct by hand.
//!
//! Every [`EvalErrorKind`] has a stable [`id`](EvalErrorKind::id), which is
//! what an error value's `/id` path yields and what the host prints.

use std::fmt;
use tide_ir::Span;

/// Typed error category.
///
/// `Display` renders the user-facing message. Names inside a kind are
/// already resolved to text, so an error outlives the interner borrow that
/// produced it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Binding
    #[error("{word} has no value")]
    NoValue { word: String },
    #[error("{word} needs a value")]
    NeedValue { word: String },
    #[error("protected word - cannot modify: {word}")]
    LockedWord { word: String },
    #[error("cannot access {segment} in path {path}")]
    InvalidPath { path: String, segment: String },

    // Arguments
    #[error("{func} is missing its {arg} argument")]
    NoArg { func: String, arg: String },
    #[error("{func} does not allow {got} for its {arg} argument")]
    ExpectArg {
        func: String,
        arg: String,
        got: String,
    },
    #[error("invalid argument: {value}")]
    InvalidArg { value: String },
    #[error("incompatible or invalid refinements")]
    BadRefines,
    #[error("invalid function spec: {reason}")]
    InvalidSpec { reason: String },

    // Series
    #[error("out of range or past end")]
    PastEnd,
    #[error("protected value or series - cannot modify")]
    Protected,

    // Evaluation
    #[error("block did not return a value")]
    NoReturn,
    #[error("cannot use {op} on {kind} value")]
    CannotUse { op: String, kind: String },
    #[error("use DO only on blocks or parens, not {kind}")]
    UseEval { kind: String },
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
    #[error("syntax error: {message}")]
    Syntax { message: String },

    // Math
    #[error("attempt to divide by zero")]
    ZeroDivide,
    #[error("math or number overflow")]
    Overflow,

    // Raising
    #[error("use FAIL (instead of THROW) to raise errors")]
    UseFail,
    #[error("FAIL only accepts strings, scalars, parens and non-function words")]
    LimitedFailInput,
    #[error("{message}")]
    User { message: String },

    // Uncaught interrupts reported by the host
    #[error("no loop to break from")]
    NoLoopForBreak,
    #[error("no loop to continue")]
    NoLoopForContinue,
    #[error("return or exit not in function")]
    NotInFunction,
    #[error("no catch for throw: {name}")]
    NoCatch { name: String },
}

impl EvalErrorKind {
    /// Stable identifier of this category.
    pub fn id(&self) -> &'static str {
        match self {
            Self::NoValue { .. } => "no-value",
            Self::NeedValue { .. } => "need-value",
            Self::LockedWord { .. } => "locked-word",
            Self::InvalidPath { .. } => "invalid-path",
            Self::NoArg { .. } => "no-arg",
            Self::ExpectArg { .. } => "expect-arg",
            Self::InvalidArg { .. } => "invalid-arg",
            Self::BadRefines => "bad-refines",
            Self::InvalidSpec { .. } => "bad-func-def",
            Self::PastEnd => "past-end",
            Self::Protected => "protected",
            Self::NoReturn => "no-return",
            Self::CannotUse { .. } => "cannot-use",
            Self::UseEval { .. } => "use-eval",
            Self::StackOverflow { .. } => "stack-overflow",
            Self::Syntax { .. } => "syntax",
            Self::ZeroDivide => "zero-divide",
            Self::Overflow => "overflow",
            Self::UseFail => "use-fail",
            Self::LimitedFailInput => "limited-fail-input",
            Self::User { .. } => "user",
            Self::NoLoopForBreak | Self::NoLoopForContinue => "no-loop",
            Self::NotInFunction => "not-in-func",
            Self::NoCatch { .. } => "no-catch",
        }
    }
}

/// Additional context note attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name the function was called through (`<anonymous>` for `apply`).
    pub name: String,
}

/// Snapshot of the call stack at the point an error was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// A fatal condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Call stack at the raise site, innermost frame first.
    ///
    /// Filled in by the interpreter the first time the error crosses a
    /// function boundary; an error value re-raised by FAIL keeps its own.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Stable identifier, see [`EvalErrorKind::id`].
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

// Binding

#[cold]
pub fn no_value(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoValue {
        word: word.to_string(),
    })
}

#[cold]
pub fn need_value(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NeedValue {
        word: word.to_string(),
    })
}

/// Assignment to a write-locked field.
#[cold]
pub fn locked_word(word: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LockedWord {
        word: word.to_string(),
    })
}

#[cold]
pub fn invalid_path(path: &str, segment: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidPath {
        path: path.to_string(),
        segment: segment.to_string(),
    })
}

// Arguments

#[cold]
pub fn no_arg(func: &str, arg: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoArg {
        func: func.to_string(),
        arg: arg.to_string(),
    })
}

/// An argument of a kind the function does not accept.
#[cold]
pub fn expect_arg(func: &str, arg: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectArg {
        func: func.to_string(),
        arg: arg.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_arg(value: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArg {
        value: value.to_string(),
    })
}

#[cold]
pub fn bad_refines() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadRefines)
}

#[cold]
pub fn invalid_spec(reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSpec {
        reason: reason.to_string(),
    })
}

// Series

#[cold]
pub fn past_end() -> EvalError {
    EvalError::from_kind(EvalErrorKind::PastEnd)
}

/// Mutation of a protected series or object.
#[cold]
pub fn protected() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Protected)
}

// Evaluation

/// A condition that evaluated to no value.
#[cold]
pub fn no_return() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoReturn)
}

#[cold]
pub fn cannot_use(op: &str, kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotUse {
        op: op.to_string(),
        kind: kind.to_string(),
    })
}

#[cold]
pub fn use_eval(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UseEval {
        kind: kind.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// Source text passed to DO did not load.
#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
    })
}

// Math

#[cold]
pub fn zero_divide() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroDivide)
}

#[cold]
pub fn overflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Overflow)
}

// Raising

/// THROW was handed an error value.
#[cold]
pub fn use_fail() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UseFail)
}

#[cold]
pub fn limited_fail_input() -> EvalError {
    EvalError::from_kind(EvalErrorKind::LimitedFailInput)
}

/// Error raised by FAIL with a message.
#[cold]
pub fn user_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::User {
        message: message.into(),
    })
}

// Uncaught interrupts

#[cold]
pub fn no_loop_for_break() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoLoopForBreak)
}

#[cold]
pub fn no_loop_for_continue() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoLoopForContinue)
}

#[cold]
pub fn not_in_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotInFunction)
}

#[cold]
pub fn no_catch(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoCatch {
        name: name.to_string(),
    })
}
