//! The `run` command: load and evaluate a Tide source file.

use super::run_reported;
use crate::{read_source, RunOptions};

/// Run a source file. Returns the process exit status.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    tracing::debug!(path, "running file");
    run_reported(&source, path, options, false)
}
