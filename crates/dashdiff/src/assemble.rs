//! Diff assembly: enrich raw patch operations with values and line spans,
//! then sort and group them for a diff view.

use dashdiff_json_pointer::{get, Path};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::diff::diff;
use crate::patch::{OpKind, PatchOp};
use crate::source_map::SourceMap;

/// One patch operation, ready for display.
///
/// `value` is set for `add`/`replace`, `original_value` for
/// `replace`/`remove`. Line numbers are 1-based; `0` means the path could not
/// be located in the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    pub op: OpKind,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_value: Option<Value>,
    pub start_line_number: usize,
    pub end_line_number: usize,
}

/// Diffs keyed by the first segment of their path, in first-seen order.
pub type DiffGroup = IndexMap<String, Vec<Diff>>;

/// Total number of diffs across all groups.
pub fn diff_count(groups: &DiffGroup) -> usize {
    groups.values().map(Vec::len).sum()
}

/// Diff two documents and assemble the result in one go.
///
/// Each document is serialized once for line lookups.
pub fn json_diff(initial: &Value, changed: &Value) -> DiffGroup {
    let ops = diff(initial, changed);
    if ops.is_empty() {
        return DiffGroup::new();
    }
    let initial_lines = SourceMap::new(initial);
    let changed_lines = SourceMap::new(changed);
    assemble(ops, initial, &initial_lines, &changed_lines)
}

/// Turn patch operations into grouped [`Diff`] records.
///
/// Removals are located in the initial document, additions and replacements
/// in the changed one. The list is stably sorted by start line before
/// grouping.
pub fn assemble(ops: Vec<PatchOp>, initial: &Value, initial_lines: &SourceMap, changed_lines: &SourceMap) -> DiffGroup {
    let mut diffs: Vec<Diff> = ops
        .into_iter()
        .map(|op| {
            let kind = op.kind();
            let original_value = match kind {
                OpKind::Add => None,
                OpKind::Replace | OpKind::Remove => get(initial, op.path()).cloned(),
            };
            let lines = match kind {
                OpKind::Remove => initial_lines,
                OpKind::Add | OpKind::Replace => changed_lines,
            };
            let (start, end) = lines.span(op.path()).map_or((0, 0), |span| (span.start, span.end));
            let value = op.value().cloned();
            let path = match op {
                PatchOp::Add { path, .. } | PatchOp::Replace { path, .. } | PatchOp::Remove { path } => path,
            };
            Diff {
                op: kind,
                path,
                value,
                original_value,
                start_line_number: start,
                end_line_number: end,
            }
        })
        .collect();

    diffs.sort_by_key(|d| d.start_line_number);

    let mut groups = DiffGroup::new();
    for d in diffs {
        let key = d.path.first().map(|step| step.to_string()).unwrap_or_default();
        groups.entry(key).or_default().push(d);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdiff_json_pointer::PathStep;
    use serde_json::json;

    #[test]
    fn replace_carries_both_values_and_changed_side_lines() {
        let initial = json!({"title": "a", "refresh": "5s"});
        let changed = json!({"title": "a", "refresh": "1m"});
        let groups = json_diff(&initial, &changed);
        assert_eq!(diff_count(&groups), 1);
        let d = &groups["refresh"][0];
        assert_eq!(d.op, OpKind::Replace);
        assert_eq!(d.value, Some(json!("1m")));
        assert_eq!(d.original_value, Some(json!("5s")));
        assert_eq!((d.start_line_number, d.end_line_number), (3, 3));
    }

    #[test]
    fn remove_uses_initial_side_lines() {
        let initial = json!({"a": 1, "b": 2, "c": {"d": [1, 2]}});
        let changed = json!({"a": 1});
        let groups = json_diff(&initial, &changed);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, ["b", "c"]);
        let c = &groups["c"][0];
        assert_eq!(c.op, OpKind::Remove);
        assert_eq!(c.value, None);
        assert_eq!(c.original_value, Some(json!({"d": [1, 2]})));
        assert_eq!((c.start_line_number, c.end_line_number), (4, 9));
    }

    #[test]
    fn add_has_no_original_value() {
        let groups = json_diff(&json!({}), &json!({"tags": ["x"]}));
        let d = &groups["tags"][0];
        assert_eq!(d.op, OpKind::Add);
        assert_eq!(d.original_value, None);
        assert_eq!((d.start_line_number, d.end_line_number), (2, 4));
    }

    #[test]
    fn sorted_by_line_then_grouped_in_first_seen_order() {
        let initial = json!({"title": "a", "panels": [{"id": 1}, {"id": 2}], "tags": ["x"]});
        let changed = json!({"title": "b", "panels": [{"id": 10}, {"id": 20}], "tags": ["y"]});
        let groups = json_diff(&initial, &changed);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, ["title", "panels", "tags"]);
        let panel_lines: Vec<usize> = groups["panels"].iter().map(|d| d.start_line_number).collect();
        assert_eq!(panel_lines, [5, 8]);
    }

    #[test]
    fn unresolvable_path_gets_line_zero() {
        let ops = vec![PatchOp::Remove { path: vec![PathStep::from("gone"), PathStep::Index(0)] }];
        let doc = json!({"gone": []});
        let lines = SourceMap::new(&doc);
        let groups = assemble(ops, &doc, &lines, &lines);
        let d = &groups["gone"][0];
        assert_eq!((d.start_line_number, d.end_line_number), (0, 0));
        assert_eq!(d.original_value, None);
    }

    #[test]
    fn serializes_camel_case() {
        let groups = json_diff(&json!({"x": 1}), &json!({"x": 2}));
        assert_eq!(
            serde_json::to_value(&groups).unwrap(),
            json!({"x": [{
                "op": "replace",
                "path": ["x"],
                "value": 2,
                "originalValue": 1,
                "startLineNumber": 2,
                "endLineNumber": 2
            }]})
        );
    }
}
