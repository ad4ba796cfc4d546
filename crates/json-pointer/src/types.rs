//! Type definitions for document paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A step in a document path.
///
/// Object members are addressed by key, array elements by index. On the wire
/// a step is either a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

/// A path from the document root.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// The step as an array index, if it is one or if a key spells one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(k) if crate::is_valid_index(k) => k.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    /// The step as an object key. Indices render in decimal.
    pub fn as_key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            PathStep::Index(i) => std::borrow::Cow::Owned(i.to_string()),
            PathStep::Key(k) => std::borrow::Cow::Borrowed(k.as_str()),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(i) => write!(f, "{i}"),
            PathStep::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_owned())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}
