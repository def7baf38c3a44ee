//! jsift I/O - Job orchestration and persistence
//!
//! This crate turns raw option records into runnable jobs and executes
//! them:
//!
//! - Raw/resolved job option records with field-wise fallback merging
//! - Batch descriptor loading
//! - Document load, in-memory filtering, and persistence
//! - The strictly sequential batch runner

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod error;
pub mod job;
pub mod options;

// Re-export commonly used types
pub use batch::{run_batch, run_batch_with, BatchSummary, JobEvent};
pub use error::{JobError, Result};
pub use job::{apply_filter, load_document, run_job, store_document, FilterOutcome, JobSummary};
pub use options::{load_batch, JobOptions, RawJobOptions};
