mod common;

use common::{dashboard, MemorySource};
use dashdiff::{build_change_report_from_live_session, ReportOptions, TrackerError};
use serde_json::{json, Value};

fn reversed_panels(mut doc: Value) -> Value {
    doc["panels"].as_array_mut().unwrap().reverse();
    doc
}

#[test]
fn panel_memory_order_is_not_a_change() {
    let source = MemorySource::new(dashboard());
    source.set_current(reversed_panels(dashboard()));

    let report = build_change_report_from_live_session(&source, &ReportOptions::default()).unwrap();
    assert_eq!(report.diff_count, 0);
    assert!(!report.has_changes);
    assert_eq!(report.has_folder_changes, Some(false));
}

#[test]
fn panel_moved_on_grid_is_a_change() {
    let source = MemorySource::new(dashboard());
    let mut current = dashboard();
    current["panels"][1]["gridPos"]["y"] = json!(8);
    source.set_current(current);

    let report = build_change_report_from_live_session(&source, &ReportOptions::default()).unwrap();
    assert!(report.has_changes);
    assert_eq!(report.diffs.keys().collect::<Vec<_>>(), ["panels"]);
}

#[test]
fn key_order_and_nulls_from_transform_are_ignored() {
    let source = MemorySource::new(dashboard());
    let mut current = serde_json::Map::new();
    let doc = dashboard();
    for (key, value) in doc.as_object().unwrap().iter().rev() {
        current.insert(key.clone(), value.clone());
    }
    current.insert("description".to_owned(), Value::Null);
    source.set_current(Value::Object(current));

    let report = build_change_report_from_live_session(&source, &ReportOptions::default()).unwrap();
    assert!(!report.has_changes);
}

#[test]
fn folder_move_alone_makes_the_report_dirty() {
    let source = MemorySource::new(dashboard());
    source.move_to_folder("folder-b");

    let report = build_change_report_from_live_session(&source, &ReportOptions::default()).unwrap();
    assert_eq!(report.diff_count, 0);
    assert_eq!(report.has_folder_changes, Some(true));
    assert!(report.has_changes);
}

#[test]
fn live_report_still_normalizes_categories() {
    let source = MemorySource::new(dashboard());
    let mut current = dashboard();
    current["time"]["to"] = json!("now-1h");
    source.set_current(current);

    let report = build_change_report_from_live_session(&source, &ReportOptions::default()).unwrap();
    assert!(report.has_time_changes);
    assert!(!report.has_changes);

    let saving = ReportOptions {
        save_time_range: true,
        ..ReportOptions::default()
    };
    let report = build_change_report_from_live_session(&source, &saving).unwrap();
    assert!(report.has_changes);
}

#[test]
fn source_errors_propagate() {
    let source = MemorySource::without_initial(dashboard());
    assert_eq!(
        build_change_report_from_live_session(&source, &ReportOptions::default()),
        Err(TrackerError::MissingInitial)
    );

    let source = MemorySource::new(dashboard());
    source.fail_transform("panel plugin not loaded");
    assert_eq!(
        build_change_report_from_live_session(&source, &ReportOptions::default()),
        Err(TrackerError::Transform("panel plugin not loaded".to_owned()))
    );
}
