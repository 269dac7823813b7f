//! Tide command-line host.
//!
//! Loads a source file or string, runs it through [`tide_eval`], and turns
//! the outcome into a process exit status. Load errors are rendered as
//! source snippets; evaluation errors as `** id: message` with the call
//! stack captured at the raise.

pub mod commands;
mod report;

pub use report::{render_error, render_eval_error, render_load_error};

use std::sync::Once;
use tide_eval::{
    Completion, EvalError, EvalMode, Interpreter, InterpreterBuilder, LegacyOptions,
    SharedPrintHandler,
};
use tide_load::LoadError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Enable with `TIDE_LOG=tide_eval=debug` or `TIDE_LOG=trace`. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("TIDE_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_env("TIDE_LOG"))
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}

/// Why a run did not complete.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Host settings for one run.
#[derive(Clone, Default)]
pub struct RunOptions {
    pub mode: EvalMode,
    pub legacy: LegacyOptions,
    /// Defaults to stdout, or a buffer when the mode forbids IO.
    pub print_handler: Option<SharedPrintHandler>,
}

impl RunOptions {
    pub fn interpreter(&self) -> Interpreter {
        let mut builder = InterpreterBuilder::new().mode(self.mode).legacy(self.legacy);
        if let Some(handler) = &self.print_handler {
            builder = builder.print_handler(handler.clone());
        }
        builder.build()
    }
}

/// Read a source file.
pub fn read_source(path: &str) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| RunError::Io {
        path: path.to_string(),
        source,
    })
}

/// Load and run `source` to completion.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn execute(interp: &mut Interpreter, source: &str) -> Result<Completion, RunError> {
    let block = interp.load(source)?;
    Ok(interp.run(&block)?)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
