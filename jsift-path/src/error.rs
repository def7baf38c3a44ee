//! Error types for path expression handling

use thiserror::Error;

/// Errors raised while parsing or evaluating a path expression
#[derive(Debug, Error)]
pub enum PathError {
    /// Expression text failed to parse.
    #[error(
        "Invalid path expression '{expr}' at offset {offset}: {reason}\n\
         \n\
         Path expressions support an optional leading '$', '.key' member segments,\n\
         bracketed segments [\"key\"], ['key'], and [0], and a trailing [*]\n\
         selecting the elements of the addressed array."
    )]
    InvalidPath {
        /// The expression that failed to parse
        expr: String,
        /// Byte offset of the offending character
        offset: usize,
        /// Explanation of what was expected there
        reason: String,
    },

    /// Wildcard segment in a non-terminal position.
    ///
    /// A non-terminal `[*]` would produce multiple matches; the filter core
    /// requires a single array target.
    #[error("Invalid path expression '{expr}': [*] may only appear as the final segment")]
    WildcardNotTerminal {
        /// The offending expression
        expr: String,
    },

    /// Navigation stopped before reaching the addressed location.
    #[error("Path '{expr}' not found: reached '{reached}', found {found}")]
    NotFound {
        /// The expression being resolved
        expr: String,
        /// The prefix successfully navigated before the failure
        reached: String,
        /// Description of the value at the failure point
        found: String,
    },

    /// Write-back location cannot hold a value.
    #[error("Cannot write at '{expr}': {reason}")]
    NotWritable {
        /// The expression being written
        expr: String,
        /// Why the final segment cannot be assigned
        reason: String,
    },
}
