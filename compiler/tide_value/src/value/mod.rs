//! Tagged values.
//!
//! A [`Value`] is cheap to clone: scalars are inline and containers are
//! shared handles. Cloning a block value aliases the block, it does not copy
//! it (`copy` does that).

mod compare;
mod display;
mod function;
mod object;
mod series;

pub use compare::{equal, strict_equal};
pub use display::{form, mold};
pub use function::{Function, FunctionBody, HandlerShape, NativeId, Param, ParamKind};
pub use object::{Frame, Key, ObjectRef, WriteDenied};
pub use series::{BlockData, BlockRef, Series, TextData, TextRef};

use crate::errors::EvalError;
use std::rc::Rc;
use tide_ir::Name;

/// Flavor of an any-word value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WordKind {
    /// `word`: looked up, functions are applied.
    Word,
    /// `word:` assigns the next expression.
    SetWord,
    /// `:word` fetches without applying.
    GetWord,
    /// `'word` evaluates to a plain word.
    LitWord,
    /// `/word`, used for function refinements.
    Refinement,
}

/// Flavor of an any-path value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathKind {
    Path,
    SetPath,
    GetPath,
    LitPath,
}

/// Datatype of a value, also a value itself (`integer!`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Unset,
    None,
    Logic,
    Integer,
    Decimal,
    String,
    Block,
    Paren,
    Word,
    SetWord,
    GetWord,
    LitWord,
    Refinement,
    Path,
    SetPath,
    GetPath,
    LitPath,
    Object,
    Function,
    Error,
    Datatype,
}

impl Kind {
    pub const ALL: [Kind; 21] = [
        Kind::Unset,
        Kind::None,
        Kind::Logic,
        Kind::Integer,
        Kind::Decimal,
        Kind::String,
        Kind::Block,
        Kind::Paren,
        Kind::Word,
        Kind::SetWord,
        Kind::GetWord,
        Kind::LitWord,
        Kind::Refinement,
        Kind::Path,
        Kind::SetPath,
        Kind::GetPath,
        Kind::LitPath,
        Kind::Object,
        Kind::Function,
        Kind::Error,
        Kind::Datatype,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Unset => "unset!",
            Kind::None => "none!",
            Kind::Logic => "logic!",
            Kind::Integer => "integer!",
            Kind::Decimal => "decimal!",
            Kind::String => "string!",
            Kind::Block => "block!",
            Kind::Paren => "paren!",
            Kind::Word => "word!",
            Kind::SetWord => "set-word!",
            Kind::GetWord => "get-word!",
            Kind::LitWord => "lit-word!",
            Kind::Refinement => "refinement!",
            Kind::Path => "path!",
            Kind::SetPath => "set-path!",
            Kind::GetPath => "get-path!",
            Kind::LitPath => "lit-path!",
            Kind::Object => "object!",
            Kind::Function => "function!",
            Kind::Error => "error!",
            Kind::Datatype => "datatype!",
        }
    }

    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// A tagged cell.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value. The result of an empty block and of most side effects.
    #[default]
    Unset,
    None,
    Logic(bool),
    Integer(i64),
    Decimal(f64),
    String(TextRef),
    Block(BlockRef),
    Paren(BlockRef),
    Word(WordKind, Name),
    Path(PathKind, Rc<[Value]>),
    Object(ObjectRef),
    Function(Rc<Function>),
    /// A raised condition captured as a value (by TRAP or `make error!`).
    Error(Rc<EvalError>),
    Datatype(Kind),
}

impl Value {
    pub fn block(items: Vec<Value>) -> Value {
        Value::Block(BlockRef::new(items))
    }

    pub fn string(text: impl Into<String>) -> Value {
        Value::String(TextRef::new(text.into()))
    }

    pub fn word(name: Name) -> Value {
        Value::Word(WordKind::Word, name)
    }

    pub fn lit_word(name: Name) -> Value {
        Value::Word(WordKind::LitWord, name)
    }

    pub fn error(err: EvalError) -> Value {
        Value::Error(Rc::new(err))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Unset => Kind::Unset,
            Value::None => Kind::None,
            Value::Logic(_) => Kind::Logic,
            Value::Integer(_) => Kind::Integer,
            Value::Decimal(_) => Kind::Decimal,
            Value::String(_) => Kind::String,
            Value::Block(_) => Kind::Block,
            Value::Paren(_) => Kind::Paren,
            Value::Word(WordKind::Word, _) => Kind::Word,
            Value::Word(WordKind::SetWord, _) => Kind::SetWord,
            Value::Word(WordKind::GetWord, _) => Kind::GetWord,
            Value::Word(WordKind::LitWord, _) => Kind::LitWord,
            Value::Word(WordKind::Refinement, _) => Kind::Refinement,
            Value::Path(PathKind::Path, _) => Kind::Path,
            Value::Path(PathKind::SetPath, _) => Kind::SetPath,
            Value::Path(PathKind::GetPath, _) => Kind::GetPath,
            Value::Path(PathKind::LitPath, _) => Kind::LitPath,
            Value::Object(_) => Kind::Object,
            Value::Function(_) => Kind::Function,
            Value::Error(_) => Kind::Error,
            Value::Datatype(_) => Kind::Datatype,
        }
    }

    /// Conditional truth: only `none` and `false` are false.
    ///
    /// Unset counts as true here; constructs that must reject unset check
    /// [`is_unset`](Self::is_unset) first.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::None | Value::Logic(false))
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Symbol of any word flavor.
    pub fn as_any_word(&self) -> Option<Name> {
        match self {
            Value::Word(_, name) => Some(*name),
            _ => None,
        }
    }

    /// True for a plain word or lit-word naming `sym`.
    pub fn is_word_named(&self, sym: Name) -> bool {
        matches!(self, Value::Word(WordKind::Word | WordKind::LitWord, name) if *name == sym)
    }

    /// Block (not paren) contents.
    pub fn as_block(&self) -> Option<&BlockRef> {
        match self {
            Value::Block(block) => Some(block),
            _ => None,
        }
    }

    /// True for values the deep walker descends into.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Value::Block(_) | Value::Paren(_) | Value::String(_) | Value::Object(_)
        )
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Logic(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Decimal(n)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
