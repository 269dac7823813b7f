//! Loader errors.

use tide_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadErrorKind {
    #[error("missing closing `{close}`")]
    UnclosedDelimiter { close: char },
    #[error("unexpected `{found}`")]
    UnexpectedDelimiter { found: char },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid number: {text}")]
    InvalidNumber { text: String },
    #[error("malformed path: {text}")]
    MalformedPath { text: String },
    #[error("invalid word: {text}")]
    InvalidWord { text: String },
}

/// A loader error with the source range it refers to.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub span: Span,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}
