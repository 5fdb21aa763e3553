//! shsplit: shell-like word splitting that keeps constructs whole.
//!
//! Input is cut into words, operator runs, quoted strings, substitutions,
//! arithmetic expressions, brace and paren groups, and comments. Nested
//! constructs are matched for balance but never interpreted: `$(echo; ls)`
//! comes back as one token, exactly as written.
//!
//! ```
//! let words = shsplit::split_str("echo $(date) && ls {a,b} # done").unwrap();
//! assert_eq!(words, ["echo", "$(date)", "&&", "ls", "{a,b}", "# done"]);
//! ```
//!
//! # Architecture
//!
//! - **[`parse`]** — Character classes, the lookahead source and the tokenizer.
//! - **[`error`]** — Invalid-token and read errors.
//! - **[`config`]** — Configuration for the `shsplit` binary: embedded defaults + user overlay merge.
//! - **[`logging`]** — Logger setup for the binary.

/// Error types returned by the tokenizer.
pub mod error;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// `simplelog` setup driven by configuration.
pub mod logging;
/// Shell word splitting: classifier, character source, tokenizer.
pub mod parse;

pub use error::{Error, SplitError};
pub use parse::{Construct, Position, Tokenizer, split, split_str};
