//! Evaluation modes for the Tide interpreter.
//!
//! `tide run`/`tide eval` use `Interpret`; the test suite uses `TestRun`,
//! which captures output and bounds recursion tightly enough that a
//! runaway test fails quickly.

/// Evaluation mode, selected once when the interpreter is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: prints to stdout.
    #[default]
    Interpret,
    /// Test execution: output is captured in a buffer.
    TestRun,
}

impl EvalMode {
    /// Whether PRINT goes to the process's stdout.
    #[inline]
    pub fn allows_io(self) -> bool {
        matches!(self, Self::Interpret)
    }

    /// Maximum call depth.
    ///
    /// - `Interpret`: 10 000 on native targets (stacker grows the native
    ///   stack below that), 200 on WASM
    /// - `TestRun`: always 500
    #[inline]
    pub fn max_recursion_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    Some(10_000)
                }
            }
            Self::TestRun => Some(500),
        }
    }
}
