//! MOLD and FORM renderings.
//!
//! `mold` produces source-like text that loads back to an equal value where
//! the value has a literal syntax. `form` is the human rendering used by
//! PRINT: strings lose their quotes and block items are joined with spaces.
//!
//! A block that contains itself renders the back-reference as `[...]`.

use super::{BlockRef, PathKind, Value, WordKind};
use crate::handle::ContainerId;
use rustc_hash::FxHashSet;
use std::fmt::Write;
use tide_ir::StringInterner;
use tide_stack::ensure_sufficient_stack;

pub fn mold(value: &Value, interner: &StringInterner) -> String {
    let mut out = String::new();
    Renderer::new(interner).mold(value, &mut out);
    out
}

pub fn form(value: &Value, interner: &StringInterner) -> String {
    let mut out = String::new();
    Renderer::new(interner).form(value, &mut out);
    out
}

struct Renderer<'a> {
    interner: &'a StringInterner,
    /// Containers on the current rendering path.
    open: FxHashSet<ContainerId>,
}

impl<'a> Renderer<'a> {
    fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            open: FxHashSet::default(),
        }
    }

    fn form(&mut self, value: &Value, out: &mut String) {
        match value {
            Value::Unset => {}
            Value::String(text) => out.push_str(&text.series().borrow().data()[..]),
            Value::Block(block) => self.items(block, out, Self::form),
            Value::Word(_, name) => out.push_str(self.interner.lookup(*name)),
            Value::Error(err) => out.push_str(&err.message()),
            _ => self.mold(value, out),
        }
    }

    fn mold(&mut self, value: &Value, out: &mut String) {
        match value {
            Value::Unset => out.push_str("#[unset]"),
            Value::None => out.push_str("none"),
            Value::Logic(flag) => out.push_str(if *flag { "true" } else { "false" }),
            Value::Integer(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Decimal(n) => {
                let _ = write!(out, "{n:?}");
            }
            Value::String(text) => mold_string(&text.text(), out),
            Value::Block(block) => self.bracketed(block, '[', ']', out),
            Value::Paren(block) => self.bracketed(block, '(', ')', out),
            Value::Word(kind, name) => {
                let text = self.interner.lookup(*name);
                match kind {
                    WordKind::Word => out.push_str(text),
                    WordKind::SetWord => {
                        out.push_str(text);
                        out.push(':');
                    }
                    WordKind::GetWord => {
                        out.push(':');
                        out.push_str(text);
                    }
                    WordKind::LitWord => {
                        out.push('\'');
                        out.push_str(text);
                    }
                    WordKind::Refinement => {
                        out.push('/');
                        out.push_str(text);
                    }
                }
            }
            Value::Path(kind, segments) => {
                match kind {
                    PathKind::GetPath => out.push(':'),
                    PathKind::LitPath => out.push('\''),
                    PathKind::Path | PathKind::SetPath => {}
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        out.push('/');
                    }
                    self.mold(segment, out);
                }
                if *kind == PathKind::SetPath {
                    out.push(':');
                }
            }
            Value::Object(frame) => {
                if !self.open.insert(frame.id()) {
                    out.push_str("make object! [...]");
                    return;
                }
                let fields = frame.borrow().visible_fields();
                out.push_str("make object! [");
                for (i, (name, field)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(self.interner.lookup(*name));
                    out.push_str(": ");
                    ensure_sufficient_stack(|| self.mold(field, out));
                }
                out.push(']');
                self.open.remove(&frame.id());
            }
            Value::Function(function) => {
                out.push_str("make function! [");
                for (i, param) in function.params.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(self.interner.lookup(param.name));
                }
                out.push(']');
            }
            Value::Error(err) => {
                out.push_str("make error! [id: ");
                out.push_str(err.id());
                out.push_str(" message: ");
                mold_string(&err.message(), out);
                out.push(']');
            }
            Value::Datatype(kind) => out.push_str(kind.name()),
        }
    }

    fn bracketed(&mut self, block: &BlockRef, open: char, close: char, out: &mut String) {
        out.push(open);
        self.items(block, out, Self::mold);
        out.push(close);
    }

    fn items(&mut self, block: &BlockRef, out: &mut String, render: fn(&mut Self, &Value, &mut String)) {
        if !self.open.insert(block.id()) {
            out.push_str("...");
            return;
        }
        for (i, item) in block.to_vec().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            ensure_sufficient_stack(|| render(self, item, out));
        }
        self.open.remove(&block.id());
    }
}

fn mold_string(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("^\""),
            '^' => out.push_str("^^"),
            '\n' => out.push_str("^/"),
            '\t' => out.push_str("^-"),
            c => out.push(c),
        }
    }
    out.push('"');
}
