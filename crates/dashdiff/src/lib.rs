//! dashdiff: change detection for dashboard save models.
//!
//! Given the persisted version of a dashboard document and the version about
//! to be saved, decide whether anything meaningful changed, what changed (with
//! line spans for a diff view), and which categories of change the user may
//! discard before saving.
//!
//! Pipeline, leaves first:
//!
//! - [`diff`]: structural patch operations between two documents
//! - [`source_map`]: pointer-to-line index over a deterministic serialization
//! - [`assemble`]: diff records sorted by line and grouped by top-level field
//! - [`normalize`] / [`variables`]: opt-in handling of time range, refresh and
//!   variable values
//! - [`report`]: dashboard, panel and live-session change reports
//! - [`tracker`]: debounced dirty tracking for an editing session
//!
//! ```
//! use dashdiff::{build_dashboard_change_report, ReportOptions};
//! use serde_json::json;
//!
//! let initial = json!({"title": "Ops", "version": 3, "time": {"from": "now-6h", "to": "now"}});
//! let changed = json!({"title": "Ops", "version": 3, "time": {"from": "now-1h", "to": "now"}});
//!
//! let report = build_dashboard_change_report(&initial, &changed, &ReportOptions::default());
//! assert!(report.has_time_changes);
//! assert!(!report.has_changes);
//! ```

pub mod assemble;
pub mod canonical;
pub mod config;
pub mod diff;
pub mod equal;
pub mod error;
pub mod normalize;
pub mod patch;
pub mod report;
pub mod source;
pub mod source_map;
pub mod tracker;
pub mod variables;

pub use assemble::{assemble, diff_count, json_diff, Diff, DiffGroup};
pub use config::{ReportOptions, TrackerConfig};
pub use diff::diff;
pub use error::TrackerError;
pub use normalize::{normalize, CategoryChanges};
pub use patch::{apply_patch, OpKind, PatchError, PatchOp};
pub use report::{
    build_change_report_from_live_session, build_dashboard_change_report, build_panel_change_report, ChangeReport,
    PanelChangeReport,
};
pub use source::{SaveModelSource, StateChange};
pub use source_map::{LineSpan, SourceMap};
pub use tracker::ChangeTracker;

pub use dashdiff_json_pointer::{Path, PathStep};
