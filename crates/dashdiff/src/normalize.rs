//! Semantic normalization of a dashboard document before diffing.
//!
//! Time range, refresh interval and variable values change constantly while a
//! dashboard is viewed. They are only persisted when the caller opts in;
//! otherwise the initial values are copied back into the changed document so
//! the structural diff never sees them. Whether each category changed is
//! reported either way.

use serde::Serialize;
use serde_json::Value;

use crate::config::ReportOptions;
use crate::equal::deep_equal;
use crate::variables::{apply_variable_changes, restore_field};

/// Which opt-in categories differ between two documents, measured before
/// normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChanges {
    pub has_time_changes: bool,
    pub has_variable_value_changes: bool,
    pub has_refresh_change: bool,
}

/// Normalize `changed` against `initial` in place and report which
/// categories changed.
///
/// Both documents must be working copies: pairing variables strips the
/// legacy `current.selected` field from `initial`. Folder placement is not a
/// document field and is never touched here.
pub fn normalize(changed: &mut Value, initial: &mut Value, options: &ReportOptions) -> CategoryChanges {
    let has_time_changes = time_changed(changed, initial);
    let has_refresh_change = refresh_changed(changed, initial);
    let has_variable_value_changes = apply_variable_changes(changed, initial, options.save_variables);

    if let Value::Object(target) = changed {
        if !options.save_time_range {
            restore_field(target, initial, "time");
        }
        if !options.save_refresh {
            restore_field(target, initial, "refresh");
        }
    }

    CategoryChanges {
        has_time_changes,
        has_variable_value_changes,
        has_refresh_change,
    }
}

/// `time.from` or `time.to` differ. Compared as raw identifiers, so `now-1h`
/// and an equivalent absolute range are different. Absent `time` on either
/// side is no change.
pub fn time_changed(changed: &Value, initial: &Value) -> bool {
    match (changed.get("time"), initial.get("time")) {
        (Some(c), Some(i)) => c.get("from") != i.get("from") || c.get("to") != i.get("to"),
        _ => false,
    }
}

/// `refresh` differs. Absent `refresh` on either side is no change.
pub fn refresh_changed(changed: &Value, initial: &Value) -> bool {
    match (changed.get("refresh"), initial.get("refresh")) {
        (Some(c), Some(i)) => !deep_equal(c, i),
        _ => false,
    }
}
