//! The interrupt envelope.
//!
//! BREAK, CONTINUE, RETURN, EXIT, QUIT and THROW do not unwind the native
//! stack. They produce an [`Outcome::Thrown`], which every construct that
//! evaluates code must either handle or hand back to its own caller,
//! usually with [`propagate!`](crate::propagate). Because the envelope is a
//! separate variant, a construct cannot mistake it for an ordinary value.
//!
//! Fatal conditions use the other channel: the `Err` side of
//! [`EvalResult`]. The two never mix, so a TRAP cannot swallow a THROW and
//! a CATCH cannot swallow a raise.

use crate::errors::EvalError;
use crate::value::Value;
use tide_ir::Name;

/// A non-local exit in flight: a name and a payload.
///
/// The name is a word for the reserved exits (`break`, `return`, ...) and
/// for `THROW/name`, and `none` for an unnamed THROW.
#[derive(Clone, Debug)]
#[must_use = "a thrown interrupt must be propagated or caught"]
pub struct Thrown {
    name: Value,
    payload: Value,
}

impl Thrown {
    pub fn new(name: Value, payload: Value) -> Self {
        Self { name, payload }
    }

    /// Interrupt carrying one of the reserved exit names.
    pub fn named(sym: Name, payload: Value) -> Self {
        Self::new(Value::word(sym), payload)
    }

    pub fn name(&self) -> &Value {
        &self.name
    }

    /// True if the name is a word for `sym`.
    pub fn is_named(&self, sym: Name) -> bool {
        self.name.is_word_named(sym)
    }

    /// True for an unnamed THROW.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_none()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Extract the payload and the name.
    ///
    /// Consumes the envelope, so a payload can only be taken once.
    pub fn take(self) -> (Value, Value) {
        (self.payload, self.name)
    }
}

/// Result of evaluating code to completion.
#[derive(Clone, Debug)]
#[must_use = "an outcome may carry an interrupt that must be propagated"]
pub enum Outcome {
    Value(Value),
    Thrown(Thrown),
}

impl Outcome {
    #[inline]
    pub fn is_thrown(&self) -> bool {
        matches!(self, Outcome::Thrown(_))
    }

    /// Interrupt predicate plus name check in one step.
    pub fn is_thrown_named(&self, sym: Name) -> bool {
        matches!(self, Outcome::Thrown(thrown) if thrown.is_named(sym))
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Value(value)
    }
}

impl From<Thrown> for Outcome {
    fn from(thrown: Thrown) -> Self {
        Outcome::Thrown(thrown)
    }
}

/// Result of advancing one expression in a block.
#[derive(Clone, Debug)]
#[must_use = "a step may carry an interrupt that must be propagated"]
pub enum Step {
    /// An expression produced `value`; the next one starts at `next`.
    Value { value: Value, next: usize },
    /// The position was already at the tail.
    End,
    Thrown(Thrown),
}

/// Result of any evaluation: an outcome, or a fatal condition.
pub type EvalResult = Result<Outcome, EvalError>;

/// Unwrap an [`Outcome`] to its value, returning a thrown one from the
/// enclosing function as `Ok(Outcome::Thrown(..))`.
///
/// ```text
/// let condition = propagate!(interp.evaluate_all(&block)?);
/// ```
#[macro_export]
macro_rules! propagate {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Value(value) => value,
            $crate::Outcome::Thrown(thrown) => {
                return ::core::result::Result::Ok($crate::Outcome::Thrown(thrown))
            }
        }
    };
}
