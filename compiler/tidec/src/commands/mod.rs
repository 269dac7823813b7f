//! Command handlers for the Tide CLI.
//!
//! Each handler returns the process exit status instead of exiting, so the
//! binary stays a thin argument parser.

mod eval;
mod run;

pub use eval::eval_code;
pub use run::run_file;

use crate::{execute, render_error, RunOptions};
use tide_eval::Completion;

/// Run `source`, report a failure on stderr, and map the result to a status.
///
/// With `echo`, a set final value is printed molded.
fn run_reported(source: &str, path: &str, options: &RunOptions, echo: bool) -> i32 {
    let mut interp = options.interpreter();
    match execute(&mut interp, source) {
        Ok(Completion::Value(value)) => {
            if echo && !value.is_unset() {
                println!("== {}", interp.mold(&value));
            }
            0
        }
        Ok(completion) => completion.exit_code(),
        Err(err) => {
            eprint!("{}", render_error(&err, source, path));
            1
        }
    }
}
