//! Path resolution and write-back over JSON documents

use crate::error::PathError;
use crate::expr::{PathExpr, Segment};
use serde_json::Value;

/// Human-readable type name for a JSON value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve the value addressed by `path` within `document`.
///
/// A terminal `[*]` selects the contents of the array at its prefix, so the
/// expression resolves to the value found at the prefix itself; the caller
/// decides whether that value has the required shape.
pub fn query<'a>(document: &'a Value, path: &PathExpr) -> Result<&'a Value, PathError> {
    let segments = effective_segments(path);
    let mut current = document;
    for (depth, segment) in segments.iter().enumerate() {
        current = step(current, segment).ok_or_else(|| PathError::NotFound {
            expr: path.to_string(),
            reached: prefix_string(segments, depth),
            found: describe(current),
        })?;
    }
    Ok(current)
}

/// Replace the value at `path` inside `document`.
///
/// Intermediate segments must already exist; the final segment is assigned
/// in place (inserting the member if the parent object lacks it). The root
/// expression replaces the whole document.
pub fn write(document: &mut Value, path: &PathExpr, new_value: Value) -> Result<(), PathError> {
    let Some((last, prefix)) = path.segments().split_last() else {
        *document = new_value;
        return Ok(());
    };

    let mut current = document;
    for (depth, segment) in prefix.iter().enumerate() {
        // Failure context has to be captured up front: the mutable step
        // below consumes the `current` borrow.
        let failure = PathError::NotFound {
            expr: path.to_string(),
            reached: prefix_string(prefix, depth),
            found: describe(current),
        };
        current = step_mut(current, segment).ok_or(failure)?;
    }

    match (current, last) {
        (Value::Object(map), Segment::Key(key)) => {
            map.insert(key.clone(), new_value);
            Ok(())
        }
        (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
            items[*index] = new_value;
            Ok(())
        }
        (parent, segment) => Err(PathError::NotWritable {
            expr: path.to_string(),
            reason: format!(
                "final segment {} cannot be assigned in {}",
                describe_segment(segment),
                describe(parent)
            ),
        }),
    }
}

// A terminal wildcard addresses the contents of its prefix; navigation
// stops at the prefix.
fn effective_segments(path: &PathExpr) -> &[Segment] {
    match path.segments() {
        [prefix @ .., Segment::Wild] => prefix,
        segments => segments,
    }
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        (Value::Array(items), Segment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get(index))
        }
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get_mut(key),
        (Value::Array(items), Segment::Index(index)) => items.get_mut(*index),
        (Value::Array(items), Segment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get_mut(index))
        }
        _ => None,
    }
}

fn prefix_string(segments: &[Segment], depth: usize) -> String {
    PathExpr::from_segments(segments[..depth].to_vec()).to_string()
}

fn describe_segment(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => format!("key '{key}'"),
        Segment::Index(index) => format!("index {index}"),
        Segment::Wild => "wildcard [*]".to_string(),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().take(10).map(String::as_str).collect();
            if keys.is_empty() {
                "<empty object>".to_string()
            } else if map.len() > keys.len() {
                format!("<object with keys: {}, ... ({} total)>", keys.join(", "), map.len())
            } else {
                format!("<object with keys: {}>", keys.join(", "))
            }
        }
        Value::Array(items) => format!("<array with {} elements>", items.len()),
        other => format!("<{}>", type_name(other)),
    }
}
