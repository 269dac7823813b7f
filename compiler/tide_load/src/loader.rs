//! Source text to values.

use crate::cursor::Cursor;
use crate::errors::{LoadError, LoadErrorKind};
use std::rc::Rc;
use tide_ir::{Span, StringInterner};
use tide_value::{BlockRef, PathKind, Value, WordKind};

/// Load `source` into a block.
///
/// All words are interned into `interner`; the evaluator must use the same
/// interner to resolve them.
pub fn load(source: &str, interner: &StringInterner) -> Result<BlockRef, LoadError> {
    Loader::new(source, interner).run()
}

/// A block or paren still waiting for its closing delimiter.
struct Open {
    close: u8,
    start: usize,
    items: Vec<Value>,
}

struct Loader<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    /// Enclosing open containers; the top-level block is not on it.
    stack: Vec<Open>,
    items: Vec<Value>,
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b' ' | b'\t' | b'\n' | b'\r' | b'[' | b']' | b'(' | b')' | b'"' | b'{' | b'}' | b';'
    )
}

impl<'a> Loader<'a> {
    fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Self {
            cursor: Cursor::new(source),
            interner,
            stack: Vec::new(),
            items: Vec::new(),
        }
    }

    fn run(mut self) -> Result<BlockRef, LoadError> {
        while let Some(byte) = self.cursor.current() {
            let start = self.cursor.pos();
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' => self.cursor.advance(),
                b';' => self.cursor.eat_until_newline_or_eof(),
                b'[' | b'(' => {
                    self.cursor.advance();
                    let close = if byte == b'[' { b']' } else { b')' };
                    let outer = std::mem::take(&mut self.items);
                    self.stack.push(Open {
                        close,
                        start,
                        items: outer,
                    });
                }
                b']' | b')' => {
                    self.cursor.advance();
                    self.close(byte, start)?;
                }
                b'}' => {
                    return Err(self.error(
                        LoadErrorKind::UnexpectedDelimiter { found: '}' },
                        start,
                    ))
                }
                b'"' => {
                    let text = self.quoted_string(start)?;
                    self.items.push(Value::string(text));
                }
                b'{' => {
                    let text = self.brace_string(start)?;
                    self.items.push(Value::string(text));
                }
                _ => {
                    while self.cursor.current().is_some_and(|b| !is_delimiter(b)) {
                        self.cursor.advance_char();
                    }
                    let text = self.cursor.slice_from(start);
                    let value = self.classify(text, start)?;
                    self.items.push(value);
                }
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(LoadError::new(
                LoadErrorKind::UnclosedDelimiter {
                    close: char::from(open.close),
                },
                Span::from_offsets(open.start, open.start + 1),
            ));
        }
        Ok(BlockRef::new(self.items))
    }

    fn close(&mut self, byte: u8, start: usize) -> Result<(), LoadError> {
        match self.stack.pop() {
            Some(open) if open.close == byte => {
                let inner = std::mem::replace(&mut self.items, open.items);
                let block = BlockRef::new(inner);
                self.items.push(if byte == b']' {
                    Value::Block(block)
                } else {
                    Value::Paren(block)
                });
                Ok(())
            }
            _ => Err(self.error(
                LoadErrorKind::UnexpectedDelimiter {
                    found: char::from(byte),
                },
                start,
            )),
        }
    }

    fn error(&self, kind: LoadErrorKind, start: usize) -> LoadError {
        LoadError::new(kind, Span::from_offsets(start, self.cursor.pos().max(start + 1)))
    }

    /// `^` escape; the cursor is on the caret.
    fn escape(&mut self, out: &mut String) {
        self.cursor.advance();
        match self.cursor.current_char() {
            Some('/') => out.push('\n'),
            Some('-') => out.push('\t'),
            Some(c) => out.push(c),
            None => return,
        }
        self.cursor.advance_char();
    }

    fn quoted_string(&mut self, start: usize) -> Result<String, LoadError> {
        self.cursor.advance();
        let mut out = String::new();
        loop {
            let run_start = self.cursor.pos();
            let delim = self.cursor.skip_to_string_delim();
            out.push_str(self.cursor.slice_from(run_start));
            match delim {
                Some(b'"') => {
                    self.cursor.advance();
                    return Ok(out);
                }
                Some(b'^') => self.escape(&mut out),
                _ => return Err(self.error(LoadErrorKind::UnterminatedString, start)),
            }
        }
    }

    fn brace_string(&mut self, start: usize) -> Result<String, LoadError> {
        self.cursor.advance();
        let mut out = String::new();
        let mut depth = 1usize;
        loop {
            let run_start = self.cursor.pos();
            let delim = self.cursor.skip_to_brace_delim();
            out.push_str(self.cursor.slice_from(run_start));
            match delim {
                Some(b'{') => {
                    depth += 1;
                    out.push('{');
                    self.cursor.advance();
                }
                Some(b'}') => {
                    self.cursor.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push('}');
                }
                Some(b'^') => self.escape(&mut out),
                _ => return Err(self.error(LoadErrorKind::UnterminatedString, start)),
            }
        }
    }

    /// Classify a word-like run: number, word flavor or path flavor.
    fn classify(&self, text: &str, start: usize) -> Result<Value, LoadError> {
        let span = Span::from_offsets(start, start + text.len());
        let bytes = text.as_bytes();

        if looks_numeric(bytes) {
            return parse_number(text)
                .ok_or_else(|| LoadError::new(invalid_number(text), span));
        }

        let (kind, body) = if let Some(rest) = text.strip_prefix('\'') {
            (Flavor::Lit, rest)
        } else if let Some(rest) = text.strip_prefix(':') {
            (Flavor::Get, rest)
        } else if text.len() > 1 && text.ends_with(':') {
            (Flavor::Set, &text[..text.len() - 1])
        } else {
            (Flavor::Plain, text)
        };

        // `/`, `//` and `/name` are words and refinements, not paths.
        if kind == Flavor::Plain && body.starts_with('/') {
            let rest = &body[1..];
            if rest.is_empty() || rest == "/" {
                return Ok(Value::word(self.interner.intern(body)));
            }
            self.check_word(rest, span)?;
            return Ok(Value::Word(WordKind::Refinement, self.interner.intern(rest)));
        }

        if body.contains('/') && body != "/" && body != "//" {
            return self.path(kind, body, text, span);
        }

        self.check_word(body, span)?;
        let word_kind = match kind {
            Flavor::Plain => WordKind::Word,
            Flavor::Set => WordKind::SetWord,
            Flavor::Get => WordKind::GetWord,
            Flavor::Lit => WordKind::LitWord,
        };
        Ok(Value::Word(word_kind, self.interner.intern(body)))
    }

    fn path(&self, kind: Flavor, body: &str, text: &str, span: Span) -> Result<Value, LoadError> {
        let malformed = || {
            LoadError::new(
                LoadErrorKind::MalformedPath {
                    text: text.to_string(),
                },
                span,
            )
        };
        let mut segments = Vec::new();
        for (i, segment) in body.split('/').enumerate() {
            if segment.is_empty() {
                return Err(malformed());
            }
            if looks_numeric(segment.as_bytes()) {
                match segment.parse::<i64>() {
                    Ok(n) if i > 0 => segments.push(Value::Integer(n)),
                    _ => return Err(malformed()),
                }
                continue;
            }
            if self.check_word(segment, span).is_err() {
                return Err(malformed());
            }
            segments.push(Value::word(self.interner.intern(segment)));
        }
        let path_kind = match kind {
            Flavor::Plain => PathKind::Path,
            Flavor::Set => PathKind::SetPath,
            Flavor::Get => PathKind::GetPath,
            Flavor::Lit => PathKind::LitPath,
        };
        Ok(Value::Path(path_kind, Rc::from(segments)))
    }

    fn check_word(&self, body: &str, span: Span) -> Result<(), LoadError> {
        let valid = !body.is_empty()
            && !body.contains([':', '\'', '/'])
            && !body.starts_with(|c: char| c.is_ascii_digit());
        if valid {
            Ok(())
        } else {
            Err(LoadError::new(
                LoadErrorKind::InvalidWord {
                    text: body.to_string(),
                },
                span,
            ))
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Flavor {
    Plain,
    Set,
    Get,
    Lit,
}

/// Digits, or a sign or dot followed by a digit.
fn looks_numeric(bytes: &[u8]) -> bool {
    match bytes {
        [first, ..] if first.is_ascii_digit() => true,
        [b'+' | b'-' | b'.', second, ..] if second.is_ascii_digit() => true,
        [b'+' | b'-', b'.', third, ..] if third.is_ascii_digit() => true,
        _ => false,
    }
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Integer(n));
    }
    if text.contains(['.', 'e', 'E']) {
        return text
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Decimal);
    }
    None
}

fn invalid_number(text: &str) -> LoadErrorKind {
    LoadErrorKind::InvalidNumber {
        text: text.to_string(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
