//! Boundary to the live editing session.
//!
//! The observable object graph that holds editor state and the transform from
//! that graph to a plain save model both live outside this crate. The engine
//! sees them only through [`SaveModelSource`] and [`StateChange`]
//! notifications.

use serde_json::Value;

use crate::error::TrackerError;

/// Supplies the two documents a live change report compares, plus the folder
/// placement that is stored next to (not inside) the document.
pub trait SaveModelSource: Send + Sync {
    /// The last persisted document, if the dashboard has been loaded or saved.
    fn initial_save_model(&self) -> Option<Value>;

    /// Transform the current live state into a document.
    fn current_save_model(&self) -> Result<Value, TrackerError>;

    fn initial_folder_uid(&self) -> Option<String>;

    fn current_folder_uid(&self) -> Option<String>;
}

/// A state-change notification from the live object graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Kind of object whose state changed, e.g. `panel` or `dashboard`.
    pub object: String,
    /// State keys that changed. Empty when unknown.
    pub keys: Vec<String>,
}

impl StateChange {
    pub fn new<K>(object: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<String>,
    {
        Self {
            object: object.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}
