//! The `eval` command: evaluate source given on the command line.

use super::run_reported;
use crate::RunOptions;

/// Evaluate `code` and print its result. Returns the process exit status.
pub fn eval_code(code: &str, options: &RunOptions) -> i32 {
    run_reported(code, "<eval>", options, true)
}
