//! Structural diff: generate patch operations from two document values.
//!
//! Arrays are compared by index position, not by element identity. An element
//! inserted in the middle of an array therefore shows up as `replace`
//! operations on every shifted index plus one trailing `add`. Line provenance
//! depends on this shape, so it must not be replaced by a sequence-matching
//! diff.

use dashdiff_json_pointer::PathStep;
use serde_json::{Map, Value};

use crate::equal::deep_equal;
use crate::patch::PatchOp;

// ── Public API ────────────────────────────────────────────────────────────

/// Generate the operations that transform `src` into `dst` when applied in
/// order.
///
/// Root values of different container kinds produce a single `replace` at the
/// empty path; two documents never do.
pub fn diff(src: &Value, dst: &Value) -> Vec<PatchOp> {
    let mut ops = Vec::new();
    let mut path = Vec::new();
    if same_container_kind(src, dst) {
        diff_container(&mut ops, &mut path, src, dst);
    } else if !deep_equal(src, dst) {
        ops.push(PatchOp::Replace { path, value: dst.clone() });
    }
    ops
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn same_container_kind(src: &Value, dst: &Value) -> bool {
    matches!((src, dst), (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)))
}

fn diff_container(ops: &mut Vec<PatchOp>, path: &mut Vec<PathStep>, src: &Value, dst: &Value) {
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d),
        _ => unreachable!("caller checks container kinds"),
    }
}

/// Compare two members found at the same key or index.
fn diff_member(ops: &mut Vec<PatchOp>, path: &mut Vec<PathStep>, src: &Value, dst: &Value) {
    if same_container_kind(src, dst) {
        diff_container(ops, path, src, dst);
    } else if !deep_equal(src, dst) {
        ops.push(PatchOp::Replace { path: path.clone(), value: dst.clone() });
    }
}

fn diff_obj(ops: &mut Vec<PatchOp>, path: &mut Vec<PathStep>, src: &Map<String, Value>, dst: &Map<String, Value>) {
    let mut deleted = false;
    // Walk src keys back to front: removals, then in-place changes.
    for (key, src_val) in src.iter().rev() {
        path.push(PathStep::Key(key.clone()));
        match dst.get(key) {
            Some(dst_val) => diff_member(ops, path, src_val, dst_val),
            None => {
                ops.push(PatchOp::Remove { path: path.clone() });
                deleted = true;
            }
        }
        path.pop();
    }
    if !deleted && src.len() == dst.len() {
        return;
    }
    for (key, dst_val) in dst {
        if !src.contains_key(key) {
            path.push(PathStep::Key(key.clone()));
            ops.push(PatchOp::Add { path: path.clone(), value: dst_val.clone() });
            path.pop();
        }
    }
}

fn diff_arr(ops: &mut Vec<PatchOp>, path: &mut Vec<PathStep>, src: &[Value], dst: &[Value]) {
    // Highest index first so removals never shift a pending index.
    for i in (0..src.len()).rev() {
        path.push(PathStep::Index(i));
        match dst.get(i) {
            Some(dst_val) => diff_member(ops, path, &src[i], dst_val),
            None => ops.push(PatchOp::Remove { path: path.clone() }),
        }
        path.pop();
    }
    for (i, dst_val) in dst.iter().enumerate().skip(src.len()) {
        path.push(PathStep::Index(i));
        ops.push(PatchOp::Add { path: path.clone(), value: dst_val.clone() });
        path.pop();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
