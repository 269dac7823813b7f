//! Object frames: keyed fields with per-field lock and hide bits.

use super::Value;
use crate::handle::Handle;
use tide_ir::Name;

pub type ObjectRef = Handle<Frame>;

/// A field name plus its protection bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub name: Name,
    /// Write-lock: assignment raises `locked-word`.
    pub locked: bool,
    /// Hidden fields are invisible to lookup and `words-of`. Never cleared.
    pub hidden: bool,
}

impl Key {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            locked: false,
            hidden: false,
        }
    }
}

/// Why a frame refused a write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteDenied {
    /// The field is write-locked.
    Locked(Name),
    /// The frame is protected and cannot gain fields.
    Protected,
}

/// Fields of an object, also used for the root context and call frames.
#[derive(Debug, Default)]
pub struct Frame {
    keys: Vec<Key>,
    values: Vec<Value>,
    protected: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame with the given fields, all unlocked.
    pub fn with_fields(fields: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let mut frame = Frame::new();
        for (name, value) in fields {
            frame.keys.push(Key::new(name));
            frame.values.push(value);
        }
        frame
    }

    /// Index of a visible field.
    pub fn find(&self, name: Name) -> Option<usize> {
        self.keys
            .iter()
            .position(|key| key.name == name && !key.hidden)
    }

    /// Value of a visible field.
    pub fn get(&self, name: Name) -> Option<Value> {
        self.find(name).map(|index| self.values[index].clone())
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    pub fn key_mut(&mut self, index: usize) -> Option<&mut Key> {
        self.keys.get_mut(index)
    }

    pub fn keys_mut(&mut self) -> impl Iterator<Item = &mut Key> {
        self.keys.iter_mut()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Visible field names in definition order.
    pub fn words(&self) -> Vec<Name> {
        self.keys
            .iter()
            .filter(|key| !key.hidden)
            .map(|key| key.name)
            .collect()
    }

    /// Visible `(name, value)` pairs in definition order.
    pub fn visible_fields(&self) -> Vec<(Name, Value)> {
        self.keys
            .iter()
            .zip(&self.values)
            .filter(|(key, _)| !key.hidden)
            .map(|(key, value)| (key.name, value.clone()))
            .collect()
    }

    /// Assign an existing field, honoring its write-lock.
    pub fn assign(&mut self, index: usize, value: Value) -> Result<(), WriteDenied> {
        let Some(key) = self.keys.get(index) else {
            return Err(WriteDenied::Protected);
        };
        if key.locked {
            return Err(WriteDenied::Locked(key.name));
        }
        self.values[index] = value;
        Ok(())
    }

    /// Assign `name`, adding the field if the frame does not have it.
    pub fn define(&mut self, name: Name, value: Value) -> Result<usize, WriteDenied> {
        if let Some(index) = self.find(name) {
            self.assign(index, value)?;
            return Ok(index);
        }
        if self.protected {
            return Err(WriteDenied::Protected);
        }
        self.keys.push(Key::new(name));
        self.values.push(value);
        Ok(self.keys.len() - 1)
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn set_protected(&mut self, on: bool) {
        self.protected = on;
    }
}
