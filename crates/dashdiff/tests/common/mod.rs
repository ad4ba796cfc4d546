#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use dashdiff::{SaveModelSource, TrackerError};
use serde_json::{json, Value};

/// A small but realistic dashboard save model.
pub fn dashboard() -> Value {
    json!({
        "id": 7,
        "uid": "ops-main",
        "title": "Operations",
        "tags": ["ops"],
        "version": 4,
        "refresh": "30s",
        "time": {"from": "now-6h", "to": "now"},
        "templating": {"list": [
            {
                "name": "env",
                "type": "custom",
                "current": {"text": "prod", "value": "prod"},
                "options": [{"text": "prod", "value": "prod"}, {"text": "dev", "value": "dev"}]
            },
            {
                "name": "filters",
                "type": "adhoc",
                "filters": [{"key": "job", "operator": "=", "value": "api"}]
            }
        ]},
        "panels": [
            {
                "id": 1,
                "type": "timeseries",
                "title": "Requests",
                "gridPos": {"h": 8, "w": 12, "x": 0, "y": 0},
                "targets": [{"refId": "A", "query": "rate(http_requests_total[5m])"}]
            },
            {
                "id": 2,
                "type": "stat",
                "title": "Errors",
                "gridPos": {"h": 8, "w": 12, "x": 12, "y": 0},
                "targets": [{"refId": "A", "query": "sum(errors)"}]
            }
        ]
    })
}

pub fn panel() -> Value {
    json!({
        "id": 1,
        "type": "timeseries",
        "title": "Requests",
        "gridPos": {"h": 8, "w": 12, "x": 0, "y": 0},
        "targets": [{"refId": "A", "query": "rate(http_requests_total[5m])"}]
    })
}

/// In-memory stand-in for a live editing session.
pub struct MemorySource {
    initial: Mutex<Option<Value>>,
    current: Mutex<Result<Value, TrackerError>>,
    initial_folder: Option<String>,
    current_folder: Mutex<Option<String>>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new(doc: Value) -> Self {
        Self {
            initial: Mutex::new(Some(doc.clone())),
            current: Mutex::new(Ok(doc)),
            initial_folder: Some("folder-a".to_owned()),
            current_folder: Mutex::new(Some("folder-a".to_owned())),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn without_initial(doc: Value) -> Self {
        let source = Self::new(doc);
        *source.initial.lock().unwrap() = None;
        source
    }

    pub fn set_current(&self, doc: Value) {
        *self.current.lock().unwrap() = Ok(doc);
    }

    pub fn fail_transform(&self, message: &str) {
        *self.current.lock().unwrap() = Err(TrackerError::Transform(message.to_owned()));
    }

    /// Make the current document the persisted one.
    pub fn save(&self) {
        let current = self.current.lock().unwrap().clone().expect("current document");
        *self.initial.lock().unwrap() = Some(current);
    }

    pub fn move_to_folder(&self, uid: &str) {
        *self.current_folder.lock().unwrap() = Some(uid.to_owned());
    }

    /// Number of live-state transforms performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SaveModelSource for MemorySource {
    fn initial_save_model(&self) -> Option<Value> {
        self.initial.lock().unwrap().clone()
    }

    fn current_save_model(&self) -> Result<Value, TrackerError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.current.lock().unwrap().clone()
    }

    fn initial_folder_uid(&self) -> Option<String> {
        self.initial_folder.clone()
    }

    fn current_folder_uid(&self) -> Option<String> {
        self.current_folder.lock().unwrap().clone()
    }
}
