//! Error types for jsift primitives

use thiserror::Error;

/// jsift core error types
#[derive(Debug, Error)]
pub enum SiftError {
    /// Mode string is not a recognized filter mode name.
    #[error("Unknown filter mode: '{0}', expected 'unique' or 'distinct'")]
    UnknownMode(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SiftError>;
