//! jsift Core - Comparison and filtering primitives
//!
//! This crate provides the pure comparison/filtering layer of jsift with no
//! I/O dependencies. It includes:
//!
//! - Field extraction from JSON elements by runtime key
//! - Multi-key case-insensitive comparators
//! - The keep/drop filter engine and its mode enum
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod filter;

// Re-export commonly used types
pub use compare::{field_value, split_fields, FieldComparator};
pub use error::{Result, SiftError};
pub use filter::{filter, filter_by, FilterMode};
