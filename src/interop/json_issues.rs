//! Decoding of JSON-reported validation issues.
//!
//! Two wire shapes are supported:
//!
//! - segment-array issues, `{"path": ["items", 0, "total"], "message": "..."}`,
//!   where path elements are object keys (strings) or array indices
//!   (unsigned numbers);
//! - pointer issues, `{"instancePath": "/items/0/total", ...}`, the shape
//!   JSON Type Definition validators emit.

use serde_json::Value;

use crate::error::Issue;
use crate::path::{FieldPath, PathParseError};

/// Errors produced while decoding JSON-reported issues.
///
/// These are boundary errors: once issues are decoded, flattening itself
/// cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum InteropError {
    /// The top-level value was not an array of issue objects.
    #[error("expected an array of issues, got {0}")]
    NotAnArray(&'static str),

    /// One issue object was missing a field or had a field of the wrong type.
    #[error("issue {index}: {reason}")]
    MalformedIssue { index: usize, reason: String },

    /// One issue carried an instancePath that is not a valid JSON Pointer.
    #[error("issue {index}: bad instancePath")]
    BadPointer {
        index: usize,
        #[source]
        source: PathParseError,
    },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn malformed(index: usize, reason: impl Into<String>) -> InteropError {
    InteropError::MalformedIssue {
        index,
        reason: reason.into(),
    }
}

/// Decodes a JSON array of `{"path": [...], "message": "..."}` issues.
///
/// Path elements may be strings (object keys) or unsigned numbers (array
/// indices); a missing or null `path` is treated as the root path. An
/// optional string `code` is carried over when present. An empty array
/// decodes to an empty vec.
///
/// # Errors
///
/// Returns [`InteropError`] when the value is not an array, when an
/// element is not an object, when `message` is missing or not a string,
/// or when a path element is neither a string nor an unsigned number.
///
/// # Example
///
/// ```rust
/// use flatline::interop::issues_from_json;
/// use serde_json::json;
///
/// let issues = issues_from_json(&json!([
///     {"path": ["price"], "message": "Price must be greater than 0"}
/// ])).unwrap();
///
/// assert_eq!(issues[0].path.to_string(), "price");
/// ```
pub fn issues_from_json(value: &Value) -> Result<Vec<Issue>, InteropError> {
    let items = value
        .as_array()
        .ok_or_else(|| InteropError::NotAnArray(kind_of(value)))?;

    let mut issues = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| malformed(index, format!("expected an object, got {}", kind_of(item))))?;

        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(index, "missing or non-string 'message'"))?;

        let path = match obj.get("path") {
            None | Some(Value::Null) => FieldPath::root(),
            Some(Value::Array(elements)) => decode_segments(index, elements)?,
            Some(other) => {
                return Err(malformed(
                    index,
                    format!("'path' must be an array, got {}", kind_of(other)),
                ))
            }
        };

        let mut issue = Issue::new(path, message);
        if let Some(code) = obj.get("code").and_then(Value::as_str) {
            issue = issue.with_code(code);
        }
        issues.push(issue);
    }
    Ok(issues)
}

fn decode_segments(index: usize, elements: &[Value]) -> Result<FieldPath, InteropError> {
    let mut path = FieldPath::root();
    for element in elements {
        match element {
            Value::String(name) => path = path.push_field(name.clone()),
            Value::Number(n) => {
                let idx = n.as_u64().and_then(|v| usize::try_from(v).ok()).ok_or_else(|| {
                    malformed(index, format!("path index {} is not an unsigned integer", n))
                })?;
                path = path.push_index(idx);
            }
            other => {
                return Err(malformed(
                    index,
                    format!("path element must be a string or number, got {}", kind_of(other)),
                ))
            }
        }
    }
    Ok(path)
}

/// Decodes a JSON array of pointer-located issues.
///
/// Each element must be an object with a string `instancePath` holding a
/// JSON Pointer. `message` is optional (pointer-style validators often
/// report only locations); when absent the issue gets the message
/// "does not match schema" with code `schema_violation`, and a string
/// `schemaPath`, when present, is kept as the expected-side context.
///
/// # Errors
///
/// Returns [`InteropError`] when the value is not an array, an element is
/// not an object, `instancePath` is missing or not a string, or the
/// pointer itself is malformed.
///
/// # Example
///
/// ```rust
/// use flatline::interop::issues_from_pointer_json;
/// use serde_json::json;
///
/// let issues = issues_from_pointer_json(&json!([
///     {"instancePath": "/users/0/email", "schemaPath": "/properties/users"}
/// ])).unwrap();
///
/// assert_eq!(issues[0].path.to_string(), "users[0].email");
/// assert_eq!(issues[0].code, "schema_violation");
/// ```
pub fn issues_from_pointer_json(value: &Value) -> Result<Vec<Issue>, InteropError> {
    let items = value
        .as_array()
        .ok_or_else(|| InteropError::NotAnArray(kind_of(value)))?;

    let mut issues = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| malformed(index, format!("expected an object, got {}", kind_of(item))))?;

        let pointer = obj
            .get("instancePath")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(index, "missing or non-string 'instancePath'"))?;

        let path = FieldPath::from_pointer(pointer)
            .map_err(|source| InteropError::BadPointer { index, source })?;

        let mut issue = match obj.get("message").and_then(Value::as_str) {
            Some(message) => Issue::new(path, message),
            None => Issue::new(path, "does not match schema").with_code("schema_violation"),
        };
        if let Some(schema_path) = obj.get("schemaPath").and_then(Value::as_str) {
            issue = issue.with_expected(schema_path);
        }
        issues.push(issue);
    }
    Ok(issues)
}
