//! Recovery points for fatal conditions.
//!
//! TRAP and ATTEMPT push a recovery point before running their block. A
//! raise is an `Err` travelling up through `?`; the innermost armed point is
//! the first construct that inspects it. Landing there restores the
//! environment and call stack depths saved at the push and retires the
//! point.
//!
//! Points are strictly LIFO. The guard returned by
//! [`Interpreter::push_recovery_point`] is the only way to pop one: it is
//! retired by [`RecoveryGuard::disarm`] on the normal path, by
//! [`RecoveryGuard::land`] when a raise arrives, and by `Drop` if neither
//! happened (a panic unwinding through the construct).

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use tide_value::EvalError;

/// Identity of one pushed recovery point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecoveryToken(u64);

/// Lifecycle of a recovery point. A point is never re-armed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointState {
    /// Pushed; its block is running.
    Armed,
    /// Popped on the normal path.
    Disarmed,
    /// A raise landed here.
    Triggered,
}

#[derive(Clone, Debug)]
struct Saved {
    token: RecoveryToken,
    scope_depth: usize,
    call_depth: usize,
}

/// Stack of armed recovery points.
#[derive(Debug, Default)]
pub(crate) struct RecoveryStack {
    points: Vec<Saved>,
    next: u64,
}

impl RecoveryStack {
    fn push(&mut self, scope_depth: usize, call_depth: usize) -> RecoveryToken {
        let token = RecoveryToken(self.next);
        self.next += 1;
        self.points.push(Saved {
            token,
            scope_depth,
            call_depth,
        });
        token
    }

    /// Pop the innermost point, which must be `token`.
    fn pop(&mut self, token: RecoveryToken) -> Option<Saved> {
        debug_assert_eq!(
            self.points.last().map(|saved| saved.token),
            Some(token),
            "recovery points popped out of order"
        );
        match self.points.last() {
            Some(saved) if saved.token == token => self.points.pop(),
            _ => None,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.points.len()
    }

    /// Token of the innermost armed point.
    #[cfg(test)]
    pub(crate) fn innermost(&self) -> Option<RecoveryToken> {
        self.points.last().map(|saved| saved.token)
    }
}

/// An armed recovery point.
///
/// Dereferences to the interpreter so the protected block is evaluated
/// through the guard.
pub struct RecoveryGuard<'i> {
    interp: &'i mut Interpreter,
    token: RecoveryToken,
    state: PointState,
}

impl RecoveryGuard<'_> {
    pub fn token(&self) -> RecoveryToken {
        self.token
    }

    pub fn state(&self) -> PointState {
        self.state
    }

    /// Retire the point on the normal exit path.
    pub fn disarm(mut self) {
        self.interp.recovery.pop(self.token);
        self.state = PointState::Disarmed;
    }

    /// Land a raise on this point.
    ///
    /// Scopes and call frames above the depths saved at the push are
    /// discarded, the point is retired, and the error is handed back for
    /// the construct to report.
    pub fn land(mut self, err: EvalError) -> EvalError {
        if let Some(saved) = self.interp.recovery.pop(self.token) {
            self.interp.env.truncate(saved.scope_depth);
            self.interp.call_stack.truncate(saved.call_depth);
        }
        self.state = PointState::Triggered;
        tracing::debug!(token = self.token.0, id = err.id(), "raise landed");
        err
    }
}

impl Deref for RecoveryGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interp
    }
}

impl DerefMut for RecoveryGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interp
    }
}

impl Drop for RecoveryGuard<'_> {
    fn drop(&mut self) {
        if self.state == PointState::Armed {
            self.interp.recovery.pop(self.token);
        }
    }
}

impl Interpreter {
    /// Arm a new innermost recovery point.
    pub fn push_recovery_point(&mut self) -> RecoveryGuard<'_> {
        let token = self
            .recovery
            .push(self.env.depth(), self.call_stack.depth());
        tracing::trace!(token = token.0, "recovery point armed");
        RecoveryGuard {
            interp: self,
            token,
            state: PointState::Armed,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
