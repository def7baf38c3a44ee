//! Multi-key case-insensitive comparison over JSON values
//!
//! A comparator is built from an ordered list of field keys. Keys are
//! applied left to right; the first key whose comparison is non-equal
//! decides the result. Only string field values are ordered (after Unicode
//! lowercasing); any other shape ties, deferring to the remaining keys.

use serde_json::Value;
use std::cmp::Ordering;

/// Split a raw comma-delimited field list into comparison keys.
///
/// Splitting is verbatim: keys are not trimmed and empty keys are kept, so
/// `"id,"` yields `["id", ""]`. An empty key never resolves to a field value
/// and therefore always ties.
pub fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Look up a comparison field inside a JSON element by runtime key.
///
/// Objects are indexed by member name, arrays by a numeric key. Scalars
/// have no addressable fields.
pub fn field_value<'a>(element: &'a Value, key: &str) -> Option<&'a Value> {
    match element {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Composite comparator over an ordered list of field keys.
#[derive(Debug, Clone)]
pub struct FieldComparator {
    fields: Vec<String>,
}

impl FieldComparator {
    /// Build a comparator from an ordered list of field keys.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// The field keys this comparator inspects, in comparison order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Three-way comparison of two elements.
    ///
    /// With no keys at all every pair compares equal.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.fields {
            let ordering = compare_key(field_value(a, key), field_value(b, key));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Equality under the composite comparison.
    pub fn eq(&self, a: &Value, b: &Value) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

// Only string pairs are ordered; everything else ties so later keys can
// decide.
fn compare_key(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_str), b.and_then(Value::as_str)) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        _ => Ordering::Equal,
    }
}
