//! Change reports: the aggregate answer to "did this document change, how,
//! and which changes may the user discard before saving".

use serde::Serialize;
use serde_json::Value;

use crate::assemble::{diff_count, json_diff, DiffGroup};
use crate::canonical::{sort_panels_by_grid_pos, sorted_clone_without_nulls};
use crate::config::ReportOptions;
use crate::error::TrackerError;
use crate::normalize::normalize;
use crate::source::SaveModelSource;

/// Dashboard-level change report.
///
/// `initial_save_model` and `changed_save_model` are the working copies that
/// were diffed, i.e. after normalization. The three category flags describe
/// the documents before normalization and do not depend on the options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    pub initial_save_model: Value,
    pub changed_save_model: Value,
    pub diffs: DiffGroup,
    pub diff_count: usize,
    pub has_changes: bool,
    pub has_time_changes: bool,
    pub has_variable_value_changes: bool,
    pub has_refresh_change: bool,
    pub is_new: bool,
    /// Only set by the live-session builder; folder placement is metadata
    /// stored alongside the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_folder_changes: Option<bool>,
}

/// Panel-level change report. Panels carry no time, refresh or variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelChangeReport {
    pub initial_save_model: Value,
    pub changed_save_model: Value,
    pub diffs: DiffGroup,
    pub diff_count: usize,
    pub has_changes: bool,
}

/// A document whose `version` is `0` has never been saved.
pub fn is_new_document(doc: &Value) -> bool {
    doc.get("version").and_then(Value::as_f64) == Some(0.0)
}

/// Compare two dashboard documents.
///
/// Neither input is modified; normalization runs on private copies.
pub fn build_dashboard_change_report(initial: &Value, changed: &Value, options: &ReportOptions) -> ChangeReport {
    let mut initial_save_model = initial.clone();
    let mut changed_save_model = changed.clone();
    let categories = normalize(&mut changed_save_model, &mut initial_save_model, options);

    let diffs = json_diff(&initial_save_model, &changed_save_model);
    let diff_count = diff_count(&diffs);
    let is_new = is_new_document(changed);

    tracing::debug!(
        diff_count,
        groups = diffs.len(),
        has_time_changes = categories.has_time_changes,
        has_variable_value_changes = categories.has_variable_value_changes,
        has_refresh_change = categories.has_refresh_change,
        is_new,
        "built dashboard change report"
    );

    ChangeReport {
        initial_save_model,
        changed_save_model,
        diffs,
        diff_count,
        has_changes: diff_count > 0,
        has_time_changes: categories.has_time_changes,
        has_variable_value_changes: categories.has_variable_value_changes,
        has_refresh_change: categories.has_refresh_change,
        is_new,
        has_folder_changes: None,
    }
}

/// Compare two panel documents. No normalization applies.
pub fn build_panel_change_report(initial: &Value, changed: &Value) -> PanelChangeReport {
    let diffs = json_diff(initial, changed);
    let diff_count = diff_count(&diffs);
    tracing::debug!(diff_count, groups = diffs.len(), "built panel change report");

    PanelChangeReport {
        initial_save_model: initial.clone(),
        changed_save_model: changed.clone(),
        diffs,
        diff_count,
        has_changes: diff_count > 0,
    }
}

/// Compare a live session's persisted document with its current state.
///
/// Both documents are canonicalized (sorted keys, no `null` members) and have
/// their panels sorted by grid position, so transform artefacts and panels
/// reordered in memory but not on screen never show up as changes. A folder
/// move counts as a change on its own.
pub fn build_change_report_from_live_session<S>(source: &S, options: &ReportOptions) -> Result<ChangeReport, TrackerError>
where
    S: SaveModelSource + ?Sized,
{
    let initial = source.initial_save_model().ok_or(TrackerError::MissingInitial)?;
    let current = source.current_save_model()?;

    let mut initial = sorted_clone_without_nulls(&initial);
    let mut current = sorted_clone_without_nulls(&current);
    sort_panels_by_grid_pos(&mut initial);
    sort_panels_by_grid_pos(&mut current);

    let mut report = build_dashboard_change_report(&initial, &current, options);
    let has_folder_changes = source.initial_folder_uid() != source.current_folder_uid();
    if has_folder_changes {
        tracing::debug!(
            from = ?source.initial_folder_uid(),
            to = ?source.current_folder_uid(),
            "dashboard moved to another folder"
        );
    }
    report.has_folder_changes = Some(has_folder_changes);
    report.has_changes |= has_folder_changes;
    Ok(report)
}
