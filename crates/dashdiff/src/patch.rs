//! Patch operations between two documents, and their application.
//!
//! Only the three RFC 6902 operations the differ emits are modelled:
//! `add`, `replace` and `remove`.

use dashdiff_json_pointer::{get_mut, parent, Path, PathStep};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
}

/// Kind of a patch operation, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Replace,
    Remove,
}

/// A single edit addressed by a path from the document root.
///
/// `Remove` never carries a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: Path, value: Value },
    Replace { path: Path, value: Value },
    Remove { path: Path },
}

impl PatchOp {
    pub fn kind(&self) -> OpKind {
        match self {
            PatchOp::Add { .. } => OpKind::Add,
            PatchOp::Replace { .. } => OpKind::Replace,
            PatchOp::Remove { .. } => OpKind::Remove,
        }
    }

    pub fn path(&self) -> &[PathStep] {
        match self {
            PatchOp::Add { path, .. } | PatchOp::Replace { path, .. } | PatchOp::Remove { path } => path,
        }
    }

    /// The new value carried by `add` and `replace`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOp::Add { value, .. } | PatchOp::Replace { value, .. } => Some(value),
            PatchOp::Remove { .. } => None,
        }
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Apply `ops` in order to `doc`, stopping at the first failing operation.
pub fn apply_patch(doc: &mut Value, ops: &[PatchOp]) -> Result<(), PatchError> {
    for op in ops {
        apply_op(doc, op)?;
    }
    Ok(())
}

/// Apply one operation. Returns the value it displaced, if any.
pub fn apply_op(doc: &mut Value, op: &PatchOp) -> Result<Option<Value>, PatchError> {
    match op {
        PatchOp::Add { path, value } => apply_add(doc, path, value.clone()),
        PatchOp::Replace { path, value } => apply_replace(doc, path, value.clone()),
        PatchOp::Remove { path } => apply_remove(doc, path).map(Some),
    }
}

fn parent_mut<'a>(doc: &'a mut Value, path: &'a [PathStep]) -> Result<(&'a mut Value, &'a PathStep), PatchError> {
    let (parent_path, key) = parent(path).map_err(|_| PatchError::InvalidTarget)?;
    let container = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    Ok((container, key))
}

fn apply_add(doc: &mut Value, path: &[PathStep], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (container, key) = parent_mut(doc, path)?;
    match container {
        Value::Object(map) => Ok(map.insert(key.as_key().into_owned(), value)),
        Value::Array(arr) => {
            let idx = key.as_index().ok_or(PatchError::InvalidIndex)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(None)
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[PathStep], value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (container, key) = parent_mut(doc, path)?;
    match container {
        Value::Object(map) => {
            let slot = map.get_mut(&*key.as_key()).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
        Value::Array(arr) => {
            let idx = key.as_index().ok_or(PatchError::InvalidIndex)?;
            let slot = arr.get_mut(idx).ok_or(PatchError::NotFound)?;
            Ok(Some(std::mem::replace(slot, value)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[PathStep]) -> Result<Value, PatchError> {
    let (container, key) = parent_mut(doc, path)?;
    match container {
        // shift_remove keeps the remaining keys in document order
        Value::Object(map) => map.shift_remove(&*key.as_key()).ok_or(PatchError::NotFound),
        Value::Array(arr) => {
            let idx = key.as_index().ok_or(PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}
