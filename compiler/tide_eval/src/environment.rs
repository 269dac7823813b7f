//! Dynamic binding over a stack of frames.
//!
//! The bottom frame is the root context holding the natives and every
//! global definition. Object bodies and function calls push a frame for
//! their duration. Words resolve innermost first; a set-word with no
//! binding anywhere defines itself in the root.

use tide_ir::Name;
use tide_value::{Frame, Handle, ObjectRef, Value, WriteDenied};

pub struct Environment {
    /// Never empty; `scopes[0]` is the root context.
    scopes: Vec<ObjectRef>,
}

impl Environment {
    pub fn new(root: Frame) -> Self {
        Self {
            scopes: vec![Handle::new(root)],
        }
    }

    pub fn root(&self) -> &ObjectRef {
        &self.scopes[0]
    }

    pub fn push_scope(&mut self, frame: ObjectRef) {
        self.scopes.push(frame);
    }

    /// Pop the innermost scope. The root is never popped.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "pop_scope() on the root context");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes, root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Drop scopes above `depth`, keeping the root.
    pub fn truncate(&mut self, depth: usize) {
        self.scopes.truncate(depth.max(1));
    }

    /// Frame and field index a word is bound to.
    pub fn resolve(&self, name: Name) -> Option<(ObjectRef, usize)> {
        self.scopes.iter().rev().find_map(|scope| {
            scope
                .borrow()
                .find(name)
                .map(|index| (scope.clone(), index))
        })
    }

    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.borrow().get(name))
    }

    /// Assign through the binding, or define in the root if unbound.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), WriteDenied> {
        match self.resolve(name) {
            Some((frame, index)) => frame.borrow_mut().assign(index, value),
            None => self.root().borrow_mut().define(name, value).map(|_| ()),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
