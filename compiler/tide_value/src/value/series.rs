//! Series containers: blocks, parens and strings.

use super::Value;
use crate::errors::{protected, EvalError};
use crate::handle::{ContainerId, Handle};

/// Series storage plus its persistent protection flag.
#[derive(Debug, Default)]
pub struct Series<T> {
    data: T,
    protected: bool,
}

impl<T> Series<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            protected: false,
        }
    }

    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access, refused while the series is protected.
    #[inline]
    pub fn data_mut(&mut self) -> Result<&mut T, EvalError> {
        if self.protected {
            return Err(protected());
        }
        Ok(&mut self.data)
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn set_protected(&mut self, on: bool) {
        self.protected = on;
    }
}

pub type BlockData = Series<Vec<Value>>;
pub type TextData = Series<String>;

/// A block or paren: a shared series plus a position into it.
#[derive(Clone, Debug)]
pub struct BlockRef {
    series: Handle<BlockData>,
    index: usize,
}

impl BlockRef {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            series: Handle::new(Series::new(items)),
            index: 0,
        }
    }

    /// Same series, different position.
    #[must_use]
    pub fn at(&self, index: usize) -> Self {
        Self {
            series: self.series.clone(),
            index,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn series(&self) -> &Handle<BlockData> {
        &self.series
    }

    #[inline]
    pub fn id(&self) -> ContainerId {
        self.series.id()
    }

    /// Length of the whole series, ignoring the position.
    pub fn series_len(&self) -> usize {
        self.series.borrow().data().len()
    }

    /// Items from the position to the tail.
    pub fn len(&self) -> usize {
        self.series_len().saturating_sub(self.index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at an absolute series position.
    pub fn get(&self, position: usize) -> Option<Value> {
        self.series.borrow().data().get(position).cloned()
    }

    /// Item relative to the position, zero-based.
    pub fn item(&self, offset: usize) -> Option<Value> {
        self.get(self.index + offset)
    }

    /// Copy of the items from the position to the tail.
    pub fn to_vec(&self) -> Vec<Value> {
        let series = self.series.borrow();
        series.data().get(self.index..).map(<[Value]>::to_vec).unwrap_or_default()
    }

    pub fn is_protected(&self) -> bool {
        self.series.borrow().is_protected()
    }
}

/// A string: a shared character series.
#[derive(Clone, Debug)]
pub struct TextRef {
    series: Handle<TextData>,
}

impl TextRef {
    pub fn new(text: String) -> Self {
        Self {
            series: Handle::new(Series::new(text)),
        }
    }

    #[inline]
    pub fn series(&self) -> &Handle<TextData> {
        &self.series
    }

    #[inline]
    pub fn id(&self) -> ContainerId {
        self.series.id()
    }

    /// Copy of the current contents.
    pub fn text(&self) -> String {
        self.series.borrow().data().clone()
    }

    pub fn char_len(&self) -> usize {
        self.series.borrow().data().chars().count()
    }

    pub fn is_protected(&self) -> bool {
        self.series.borrow().is_protected()
    }
}
