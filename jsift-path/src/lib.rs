//! jsift Path - Minimal path-expression engine over JSON documents
//!
//! This crate provides exactly the three capabilities the filter core
//! consumes:
//!
//! - Parsing and stringifying dot/bracket path expressions
//! - Deriving the container path (the expression minus its final segment)
//! - Resolving a path against a document and writing a value back in place

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod expr;
pub mod navigate;

// Re-export commonly used types
pub use error::PathError;
pub use expr::{PathExpr, Segment};
pub use navigate::{query, type_name, write};
