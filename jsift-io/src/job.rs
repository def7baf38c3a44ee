//! Single-job orchestration: load, filter, reinsert, persist

use crate::error::{JobError, Result};
use crate::options::JobOptions;
use jsift_core::{filter, FieldComparator};
use jsift_path::{query, type_name, write};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of filtering one document in memory.
#[derive(Debug, Clone, Copy)]
pub struct FilterOutcome {
    /// Number of elements in the target array before filtering.
    pub records_in: usize,
    /// Number of elements kept.
    pub records_kept: usize,
}

/// Summary of one completed job.
#[derive(Debug, Clone)]
pub struct JobSummary {
    /// Path of the persisted document.
    pub target: PathBuf,
    /// Number of elements in the target array before filtering.
    pub records_in: usize,
    /// Number of elements kept.
    pub records_kept: usize,
    /// Number of elements removed.
    pub records_removed: usize,
}

/// Read and deserialize a JSON document.
pub fn load_document(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).map_err(|source| JobError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| JobError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Filter the target array inside `document` and write the result back at
/// the container path.
///
/// Fails before any mutation when the path expression resolves to a
/// non-array value.
pub fn apply_filter(options: &JobOptions, document: &mut Value) -> Result<FilterOutcome> {
    let target = query(document, &options.path)?;
    let Some(items) = target.as_array() else {
        return Err(JobError::TypeMismatch {
            expr: options.path.to_string(),
            actual: type_name(target),
        });
    };

    let comparator = FieldComparator::new(options.fields.clone());
    let kept = filter(items, options.mode, &comparator);
    let outcome = FilterOutcome {
        records_in: items.len(),
        records_kept: kept.len(),
    };

    write(document, &options.path.container(), Value::Array(kept))?;
    Ok(outcome)
}

/// Persist `document` to `<target_path>/<target_file>`.
///
/// The target directory is created if absent; creation is idempotent, so
/// jobs sharing a target directory can repeat it safely. Output is
/// pretty-printed with a trailing newline to stay human-diffable.
pub fn store_document(options: &JobOptions, document: &Value) -> Result<PathBuf> {
    fs::create_dir_all(&options.target_path).map_err(|source| JobError::Write {
        path: options.target_path.clone(),
        source,
    })?;

    let target = options.target();
    let mut payload =
        serde_json::to_string_pretty(document).map_err(|source| JobError::Serialize {
            path: target.clone(),
            source,
        })?;
    payload.push('\n');

    fs::write(&target, payload).map_err(|source| JobError::Write {
        path: target.clone(),
        source,
    })?;
    Ok(target)
}

/// Run one job end to end: load the source document, filter the target
/// array, and persist the rewritten document.
///
/// Reads exactly one file and writes exactly one file; a failing job
/// writes nothing.
pub fn run_job(options: &JobOptions) -> Result<JobSummary> {
    let mut document = load_document(&options.source_file)?;
    let outcome = apply_filter(options, &mut document)?;
    let target = store_document(options, &document)?;
    Ok(JobSummary {
        target,
        records_in: outcome.records_in,
        records_kept: outcome.records_kept,
        records_removed: outcome.records_in - outcome.records_kept,
    })
}
