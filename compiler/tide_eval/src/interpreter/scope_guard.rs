//! RAII scope guards for environment management.
//!
//! Object bodies and user function calls evaluate inside a frame pushed on
//! the environment. [`ScopedInterpreter`] pops it when dropped, so the
//! frame is gone on every exit path: a normal value, an interrupt handed
//! back with `propagate!`, a raise travelling through `?`, or a panic.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! giving transparent access to every interpreter method.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use tide_value::ObjectRef;

/// RAII guard that pops an environment scope on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push `frame` as the innermost scope until the guard is dropped.
    pub fn scoped(&mut self, frame: ObjectRef) -> ScopedInterpreter<'_> {
        self.env.push_scope(frame);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` with `frame` as the innermost scope.
    ///
    /// The scope is popped when `f` returns, whatever it returns.
    pub fn with_frame<T, F>(&mut self, frame: ObjectRef, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(frame);
        f(&mut scoped)
    }
}
