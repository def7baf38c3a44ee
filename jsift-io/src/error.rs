//! Error types for job orchestration

use jsift_core::SiftError;
use jsift_path::PathError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, running, or persisting a job
#[derive(Debug, Error)]
pub enum JobError {
    /// A required job option is missing after fallback merging.
    #[error("Missing required option '{name}'")]
    MissingOption {
        /// Raw option name as it appears in configuration
        name: &'static str,
    },

    /// Filter mode string was not a recognized mode name.
    #[error(transparent)]
    Mode(#[from] SiftError),

    /// Path expression could not be parsed or navigated.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The path expression resolved to a value that is not an array.
    #[error("Invalid data type: {actual} for property: {expr}, should be an array")]
    TypeMismatch {
        /// The path expression that was resolved
        expr: String,
        /// JSON type actually found there
        actual: &'static str,
    },

    /// A source or descriptor file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The target directory or file could not be written.
    #[error("Cannot write {path}: {source}")]
    Write {
        /// Path that failed to write
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File contents were not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        /// File whose contents failed to parse
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The rewritten document could not be serialized.
    #[error("Cannot serialize document for {path}: {source}")]
    Serialize {
        /// Target file the document was being serialized for
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The batch descriptor was not a JSON array of job option records.
    #[error("Invalid batch descriptor {path}: {source}")]
    BadDescriptor {
        /// Descriptor file that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JobError>;
