//! Stack safety for deep recursion in the Tide interpreter.
//!
//! Evaluation, value comparison, molding and the deep protection walker all
//! recurse over user-built container graphs whose depth the interpreter does
//! not control. Each recursive step goes through [`ensure_sufficient_stack`],
//! which grows the native stack on demand instead of overflowing it.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! Guarding only prevents a native overflow. Runaway user recursion is still
//! bounded by the interpreter's call-depth limit.

/// Minimum stack space to keep available (128KB red zone).
///
/// One evaluator step holds a few `Value`s and a `Result` on the stack, so
/// this comfortably covers the frames between two guarded calls.
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, a new stack
/// segment is allocated before calling `f`.
///
/// ```text
/// fn walk(&mut self, value: &Value) -> Result<(), EvalError> {
///     ensure_sufficient_stack(|| {
///         for item in value.items() {
///             self.walk(&item)?;
///         }
///         Ok(())
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
