//! Document paths and JSON Pointer (RFC 6901) helpers.
//!
//! Paths are sequences of [`PathStep`]s. The change engine addresses patch
//! operations with them and renders them as slash-joined pointers when it
//! needs a string key, e.g. for line-provenance lookups.
//!
//! # Example
//!
//! ```
//! use dashdiff_json_pointer::{format_json_pointer, get, parse_json_pointer, PathStep};
//!
//! let path = vec![PathStep::from("time"), PathStep::from("from")];
//! assert_eq!(format_json_pointer(&path), "/time/from");
//!
//! let doc = serde_json::json!({"time": {"from": "now-6h"}});
//! assert_eq!(get(&doc, &parse_json_pointer("/time/from")), Some(&serde_json::json!("now-6h")));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use dashdiff_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use dashdiff_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into a path of key steps.
///
/// The empty string is the root. Numeric components stay keys; [`get`]
/// resolves them against arrays.
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .map(|c| PathStep::Key(unescape_component(c)))
        .collect()
}

/// Format a path into a JSON Pointer string. The root formats as `""`.
///
/// ```
/// use dashdiff_json_pointer::{format_json_pointer, PathStep};
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&[PathStep::from("panels"), PathStep::Index(0)]), "/panels/0");
/// ```
pub fn format_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.as_key()));
    }
    out
}

/// Check if a string is a canonical non-negative array index.
///
/// ```
/// use dashdiff_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Split a path into its parent path and last step.
pub fn parent(path: &[PathStep]) -> Result<(&[PathStep], &PathStep), JsonPointerError> {
    match path.split_last() {
        Some((last, rest)) => Ok((rest, last)),
        None => Err(JsonPointerError::NoParent),
    }
}

/// Get a value from a document by path. `None` if any step is missing.
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(step.as_index()?)?,
            Value::Object(map) => map.get(&*step.as_key())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(step.as_index()?)?,
            Value::Object(map) => map.get_mut(&*step.as_key())?,
            _ => return None,
        };
    }
    Some(current)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NO_PARENT")]
    NoParent,
}
