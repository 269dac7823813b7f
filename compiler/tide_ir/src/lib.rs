//! Tide IR - interned symbols and source spans.
//!
//! Every word in a Tide program is interned once into a [`Name`]. Symbols the
//! control-flow core needs to recognise (`break`, `return`, `quit`, ...) are
//! pre-interned at fixed indices and exposed as constants in [`sym`], so the
//! evaluator can compare against them without touching the interner.

mod interner;
mod name;
mod span;
pub mod sym;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
