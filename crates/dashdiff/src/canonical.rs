//! Canonical forms for documents produced from live state.
//!
//! The live-state transform may emit keys in any order, explicit `null`s for
//! unset options and panels in memory order rather than layout order. None of
//! that is a user change, so live documents are canonicalized before they are
//! compared.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// Deep clone with object keys sorted and `null` members dropped.
///
/// Array elements are kept as-is (including `null`s) so indices stay stable.
pub fn sorted_clone_without_nulls(val: &Value) -> Value {
    match val {
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort_unstable();
            let mut out = Map::with_capacity(keys.len());
            for key in keys {
                let item = &obj[key.as_str()];
                if !item.is_null() {
                    out.insert(key.clone(), sorted_clone_without_nulls(item));
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sorted_clone_without_nulls).collect()),
        scalar => scalar.clone(),
    }
}

/// Sort `panels` row-major by grid position (`gridPos.y`, then `gridPos.x`),
/// including the panels nested in collapsed rows.
///
/// The sort is stable; a panel without a grid position sorts as `(0, 0)`.
pub fn sort_panels_by_grid_pos(doc: &mut Value) {
    let Some(panels) = doc.get_mut("panels").and_then(Value::as_array_mut) else {
        return;
    };
    panels.sort_by(compare_grid_pos);
    for row in panels.iter_mut() {
        if let Some(nested) = row.get_mut("panels").and_then(Value::as_array_mut) {
            nested.sort_by(compare_grid_pos);
        }
    }
}

fn grid_coord(panel: &Value, axis: &str) -> f64 {
    panel
        .get("gridPos")
        .and_then(|pos| pos.get(axis))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn compare_grid_pos(a: &Value, b: &Value) -> Ordering {
    grid_coord(a, "y")
        .total_cmp(&grid_coord(b, "y"))
        .then_with(|| grid_coord(a, "x").total_cmp(&grid_coord(b, "x")))
}
