//! Tide source loader.
//!
//! Turns source text into a block of values. There is no separate token
//! stream: the loader scans items and builds blocks directly, keeping an
//! explicit stack of open blocks and parens so deeply nested input cannot
//! exhaust the native stack.
//!
//! ```text
//! print [1 + 2]            ; word, block of integer word integer
//! obj/field: "text"        ; set-path, string
//! catch/name [throw/name 42 'x] 'x
//! ```

mod cursor;
mod errors;
mod loader;

pub use errors::{LoadError, LoadErrorKind};
pub use loader::load;
