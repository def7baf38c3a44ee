//! Job option records: raw acquisition form and resolved form
//!
//! Options arrive as all-optional string records, either deserialized from
//! a batch descriptor entry or assembled from flags and environment
//! variables. A descriptor entry inherits any field it leaves unset from
//! the invocation-level options before resolution.

use crate::error::{JobError, Result};
use jsift_core::{split_fields, FilterMode};
use jsift_path::PathExpr;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw, unresolved job options.
///
/// Blank values (empty or whitespace-only) count as unset, both when
/// merging with fallbacks and when checking required fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobOptions {
    /// Source JSON document to read.
    pub source_file: Option<String>,
    /// Directory the rewritten document is stored in.
    pub target_path: Option<String>,
    /// Target file name; defaults to the source file's base name.
    pub target_file: Option<String>,
    /// Filter mode name: `unique` or `distinct`.
    pub mode: Option<String>,
    /// Path expression addressing the array to filter.
    pub json_path: Option<String>,
    /// Comma-separated comparison field keys.
    pub json_fields: Option<String>,
}

impl RawJobOptions {
    /// Fill any unset field from `fallback`.
    pub fn or(self, fallback: &RawJobOptions) -> RawJobOptions {
        RawJobOptions {
            source_file: pick(self.source_file, &fallback.source_file),
            target_path: pick(self.target_path, &fallback.target_path),
            target_file: pick(self.target_file, &fallback.target_file),
            mode: pick(self.mode, &fallback.mode),
            json_path: pick(self.json_path, &fallback.json_path),
            json_fields: pick(self.json_fields, &fallback.json_fields),
        }
    }

    /// Resolve into an immutable [`JobOptions`], validating required fields
    /// and applying the `targetFile` default.
    pub fn resolve(&self) -> Result<JobOptions> {
        let source_file = PathBuf::from(required(&self.source_file, "sourceFile")?);
        let target_path = PathBuf::from(required(&self.target_path, "targetPath")?);
        let mode: FilterMode = required(&self.mode, "mode")?.parse()?;
        let path = PathExpr::parse(required(&self.json_path, "jsonPath")?)?;
        let fields = split_fields(required(&self.json_fields, "jsonFields")?);

        let target_file = match present(&self.target_file) {
            Some(name) => name.to_string(),
            None => default_target_file(&source_file)?,
        };

        Ok(JobOptions {
            source_file,
            target_path,
            target_file,
            mode,
            path,
            fields,
        })
    }
}

/// Resolved options for exactly one job. Constructed once, immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Source JSON document.
    pub source_file: PathBuf,
    /// Directory the rewritten document is stored in.
    pub target_path: PathBuf,
    /// Target file name within `target_path`.
    pub target_file: String,
    /// Filter mode.
    pub mode: FilterMode,
    /// Parsed path expression addressing the array to filter.
    pub path: PathExpr,
    /// Comparison field keys, in comparison order.
    pub fields: Vec<String>,
}

impl JobOptions {
    /// Full path of the persisted document.
    pub fn target(&self) -> PathBuf {
        self.target_path.join(&self.target_file)
    }
}

/// Load a batch descriptor: a JSON array of raw job option records.
///
/// A blank descriptor file yields an empty job list, which the batch
/// runner treats the same as an absent descriptor.
pub fn load_batch(path: &Path) -> Result<Vec<RawJobOptions>> {
    let data = fs::read_to_string(path).map_err(|source| JobError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|source| JobError::BadDescriptor {
        path: path.to_path_buf(),
        source,
    })
}

fn pick(own: Option<String>, fallback: &Option<String>) -> Option<String> {
    match present(&own) {
        Some(_) => own,
        None => fallback.clone(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    present(value).ok_or(JobError::MissingOption { name })
}

fn default_target_file(source: &Path) -> Result<String> {
    source
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or(JobError::MissingOption { name: "targetFile" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawJobOptions {
        RawJobOptions {
            source_file: Some("data/input.json".to_string()),
            target_path: Some("out".to_string()),
            target_file: None,
            mode: Some("unique".to_string()),
            json_path: Some("$.data.users[*]".to_string()),
            json_fields: Some("id,name".to_string()),
        }
    }

    #[test]
    fn resolve_applies_target_file_default() {
        let options = full_raw().resolve().unwrap();
        assert_eq!(options.target_file, "input.json");
        assert_eq!(options.target(), PathBuf::from("out/input.json"));
    }

    #[test]
    fn resolve_keeps_explicit_target_file() {
        let mut raw = full_raw();
        raw.target_file = Some("renamed.json".to_string());
        let options = raw.resolve().unwrap();
        assert_eq!(options.target_file, "renamed.json");
    }

    #[test]
    fn resolve_reports_missing_required_fields() {
        let mut raw = full_raw();
        raw.mode = None;
        let err = raw.resolve().unwrap_err();
        assert!(matches!(err, JobError::MissingOption { name: "mode" }));

        let mut raw = full_raw();
        raw.json_fields = Some("   ".to_string());
        let err = raw.resolve().unwrap_err();
        assert!(matches!(err, JobError::MissingOption { name: "jsonFields" }));
    }

    #[test]
    fn resolve_rejects_unknown_mode() {
        let mut raw = full_raw();
        raw.mode = Some("dedupe".to_string());
        assert!(matches!(raw.resolve(), Err(JobError::Mode(_))));
    }

    #[test]
    fn resolve_rejects_bad_path_expressions() {
        let mut raw = full_raw();
        raw.json_path = Some("$.data[".to_string());
        assert!(matches!(raw.resolve(), Err(JobError::Path(_))));
    }

    #[test]
    fn resolve_splits_fields_verbatim() {
        let mut raw = full_raw();
        raw.json_fields = Some("id,".to_string());
        let options = raw.resolve().unwrap();
        assert_eq!(options.fields, vec!["id".to_string(), String::new()]);
    }

    #[test]
    fn fallback_fills_only_unset_fields() {
        let entry = RawJobOptions {
            source_file: Some("entry.json".to_string()),
            mode: Some("".to_string()), // blank counts as unset
            ..RawJobOptions::default()
        };
        let fallback = full_raw();
        let merged = entry.or(&fallback);
        assert_eq!(merged.source_file.as_deref(), Some("entry.json"));
        assert_eq!(merged.mode.as_deref(), Some("unique"));
        assert_eq!(merged.json_fields.as_deref(), Some("id,name"));
    }

    #[test]
    fn descriptor_fields_use_camel_case() {
        let raw: RawJobOptions = serde_json::from_str(
            r#"{"sourceFile": "a.json", "targetPath": "out", "jsonPath": "$.a", "jsonFields": "id", "mode": "distinct"}"#,
        )
        .unwrap();
        assert_eq!(raw.source_file.as_deref(), Some("a.json"));
        assert_eq!(raw.json_fields.as_deref(), Some("id"));
    }
}
