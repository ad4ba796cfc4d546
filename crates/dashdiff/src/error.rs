use thiserror::Error;

/// Failures reading a live editing session.
///
/// The diff engine itself is infallible; only obtaining the documents to
/// compare can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("no persisted save model to compare against")]
    MissingInitial,
    #[error("failed to transform live state into a save model: {0}")]
    Transform(String),
}
