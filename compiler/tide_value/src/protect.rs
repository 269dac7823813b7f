//! Deep protection walker.
//!
//! PROTECT and UNPROTECT set or clear persistent protection bits on series,
//! object frames and individual object fields. With `DEEP` the walk descends
//! into nested containers. The visited set is local to one [`ProtectWalk`],
//! so a cyclic graph is entered at most once and nothing is left marked on
//! the containers themselves when the walk ends, however it ends.

use crate::handle::ContainerId;
use crate::value::{BlockRef, Key, ObjectRef, TextRef, Value};
use bitflags::bitflags;
use rustc_hash::FxHashSet;
use tide_stack::ensure_sufficient_stack;

bitflags! {
    /// What a walk changes.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ProtectFlags: u8 {
        /// Set the bits; without it the walk clears them.
        const SET = 1 << 0;
        /// Descend into nested containers.
        const DEEP = 1 << 1;
        /// Hide fields. Only ever set, never cleared.
        const HIDE = 1 << 2;
        /// Change field write-locks.
        const WORD = 1 << 3;
    }
}

/// One protect or unprotect traversal.
pub struct ProtectWalk {
    flags: ProtectFlags,
    visited: FxHashSet<ContainerId>,
}

impl ProtectWalk {
    pub fn new(flags: ProtectFlags) -> Self {
        Self {
            flags,
            visited: FxHashSet::default(),
        }
    }

    pub fn flags(&self) -> ProtectFlags {
        self.flags
    }

    /// Protect or unprotect a value's container. Scalars are ignored.
    pub fn protect_value(&mut self, value: &Value) {
        match value {
            Value::Block(block) | Value::Paren(block) => self.protect_block(block),
            Value::String(text) => self.protect_text(text),
            Value::Object(frame) => self.protect_object(frame),
            _ => {}
        }
    }

    /// Apply the key bits to one field of `frame`.
    ///
    /// With `DEEP`, the field's value is walked as well.
    pub fn protect_field(&mut self, frame: &ObjectRef, index: usize) {
        let value = {
            let mut frame = frame.borrow_mut();
            if let Some(key) = frame.key_mut(index) {
                self.apply_key(key);
            }
            frame.value(index).cloned()
        };
        if self.flags.contains(ProtectFlags::DEEP) {
            if let Some(value) = value {
                self.protect_value(&value);
            }
        }
    }

    /// Containers entered by this walk so far.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// End the walk and release its visited set.
    ///
    /// Returns the number of containers the walk descended into.
    pub fn finish(self) -> usize {
        self.visited.len()
    }

    fn apply_key(&self, key: &mut Key) {
        if self.flags.contains(ProtectFlags::WORD) {
            key.locked = self.flags.contains(ProtectFlags::SET);
        }
        if self.flags.contains(ProtectFlags::HIDE | ProtectFlags::SET) {
            key.hidden = true;
        }
    }

    /// True if this container was already entered by a deep walk.
    fn enter(&mut self, id: ContainerId) -> bool {
        !self.visited.insert(id)
    }

    fn protect_block(&mut self, block: &BlockRef) {
        if self.visited.contains(&block.id()) {
            return;
        }
        block
            .series()
            .borrow_mut()
            .set_protected(self.flags.contains(ProtectFlags::SET));
        if !self.flags.contains(ProtectFlags::DEEP) || self.enter(block.id()) {
            return;
        }
        tracing::trace!(id = ?block.id(), "protect walk entering block");
        let items = block.to_vec();
        ensure_sufficient_stack(|| {
            for item in &items {
                self.protect_value(item);
            }
        });
    }

    fn protect_text(&mut self, text: &TextRef) {
        text.series()
            .borrow_mut()
            .set_protected(self.flags.contains(ProtectFlags::SET));
    }

    fn protect_object(&mut self, frame: &ObjectRef) {
        if self.visited.contains(&frame.id()) {
            return;
        }
        let values = {
            let mut inner = frame.borrow_mut();
            inner.set_protected(self.flags.contains(ProtectFlags::SET));
            for key in inner.keys_mut() {
                self.apply_key(key);
            }
            inner.values().to_vec()
        };
        if !self.flags.contains(ProtectFlags::DEEP) || self.enter(frame.id()) {
            return;
        }
        tracing::trace!(id = ?frame.id(), "protect walk entering object");
        ensure_sufficient_stack(|| {
            for value in &values {
                self.protect_value(value);
            }
        });
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
