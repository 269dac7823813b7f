//! Rendering run failures for the terminal.

use crate::RunError;
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use std::fmt::Write as _;
use tide_eval::EvalError;
use tide_load::LoadError;

/// Render any run failure. `source` is the text that was loaded.
pub fn render_error(err: &RunError, source: &str, path: &str) -> String {
    match err {
        RunError::Io { .. } => format!("error: {err}\n"),
        RunError::Load(err) => render_load_error(err, source, path),
        RunError::Eval(err) => render_eval_error(err),
    }
}

/// A load error as a labelled source snippet.
///
/// Load spans are byte offsets into `source`.
pub fn render_load_error(err: &LoadError, source: &str, path: &str) -> String {
    let start = err.span.start as usize;
    let end = (err.span.end as usize).max(start + 1).min(source.len().max(start));
    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, path, start)
        .with_config(
            Config::default()
                .with_color(false)
                .with_index_type(IndexType::Byte),
        )
        .with_message("syntax error")
        .with_label(Label::new((path, start..end)).with_message(err.kind.to_string()))
        .finish()
        .write((path, Source::from(source.to_string())), &mut out);
    if written.is_err() {
        return format!("{path}: syntax error: {err}\n");
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// An evaluation error, its notes and its backtrace.
pub fn render_eval_error(err: &EvalError) -> String {
    let mut out = format!("** {}: {}\n", err.id(), err.message());
    for note in &err.notes {
        let _ = writeln!(out, "   note: {}", note.message);
    }
    if let Some(backtrace) = err.backtrace.as_ref().filter(|trace| !trace.is_empty()) {
        let _ = write!(out, "{backtrace}");
    }
    out
}
