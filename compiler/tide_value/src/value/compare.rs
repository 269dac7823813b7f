//! Value equality.
//!
//! `equal` is the coerced comparison used by `=` and plain SWITCH: integers
//! and decimals compare numerically, strings ignore case, and word flavors
//! compare by symbol. `strict_equal` (`==`, `SWITCH/strict`) requires the
//! same kind and exact content.
//!
//! Block comparison is structural. A pair of blocks already being compared
//! further up the recursion is assumed equal, so cyclic blocks terminate.

use super::{BlockRef, Value};
use crate::handle::ContainerId;
use rustc_hash::FxHashSet;
use std::rc::Rc;
use tide_stack::ensure_sufficient_stack;

pub fn equal(a: &Value, b: &Value) -> bool {
    Comparer::new(false).values(a, b)
}

pub fn strict_equal(a: &Value, b: &Value) -> bool {
    Comparer::new(true).values(a, b)
}

type BlockPair = ((ContainerId, usize), (ContainerId, usize));

struct Comparer {
    strict: bool,
    active: FxHashSet<BlockPair>,
}

impl Comparer {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            active: FxHashSet::default(),
        }
    }

    fn values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Unset, Value::Unset) | (Value::None, Value::None) => true,
            (Value::Logic(x), Value::Logic(y)) => x == y,
            (Value::Integer(x), Value::Integer(y)) => x == y,
            #[allow(clippy::float_cmp)]
            (Value::Decimal(x), Value::Decimal(y)) => x == y,
            #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
            (Value::Integer(x), Value::Decimal(y)) | (Value::Decimal(y), Value::Integer(x)) => {
                !self.strict && (*x as f64) == *y
            }
            (Value::String(x), Value::String(y)) => {
                if x.series().ptr_eq(y.series()) {
                    return true;
                }
                let (x, y) = (x.text(), y.text());
                if self.strict {
                    x == y
                } else {
                    x.to_lowercase() == y.to_lowercase()
                }
            }
            (Value::Block(x), Value::Block(y)) | (Value::Paren(x), Value::Paren(y)) => {
                self.blocks(x, y)
            }
            (Value::Word(kind_a, x), Value::Word(kind_b, y)) => {
                x == y && (!self.strict || kind_a == kind_b)
            }
            (Value::Path(kind_a, x), Value::Path(kind_b, y)) => {
                (!self.strict || kind_a == kind_b)
                    && x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|(x, y)| self.values(x, y))
            }
            (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::Error(x), Value::Error(y)) => Rc::ptr_eq(x, y) || x.kind == y.kind,
            (Value::Datatype(x), Value::Datatype(y)) => x == y,
            _ => false,
        }
    }

    fn blocks(&mut self, a: &BlockRef, b: &BlockRef) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let pair = ((a.id(), a.index()), (b.id(), b.index()));
        if !self.active.insert(pair) {
            return true;
        }
        let (items_a, items_b) = (a.to_vec(), b.to_vec());
        let same = ensure_sufficient_stack(|| {
            items_a
                .iter()
                .zip(&items_b)
                .all(|(x, y)| self.values(x, y))
        });
        self.active.remove(&pair);
        same
    }
}
