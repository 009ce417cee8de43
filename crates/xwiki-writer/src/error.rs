//! Error handling for document tree construction.
//!
//! Translation itself never fails; malformed but well-formed trees are
//! reported through diagnostics instead. Only building a tree can fail.

use std::error::Error;
use std::fmt::{self, Display};

use ecow::EcoString;

/// Errors that can occur while building a document tree.
#[derive(Debug)]
pub enum TreeError {
    /// The JSON input could not be decoded.
    Json(serde_json::Error),
    /// Elements were still open when the tree was finished.
    UnclosedNodes(Vec<EcoString>),
    /// More elements were closed than opened.
    UnbalancedClose,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Json(err) => write!(f, "invalid document tree: {err}"),
            TreeError::UnclosedNodes(tags) => {
                let tags: Vec<&str> = tags.iter().map(EcoString::as_str).collect();
                write!(f, "unclosed elements at end of tree: {}", tags.join(", "))
            }
            TreeError::UnbalancedClose => write!(f, "closed more elements than were opened"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TreeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Json(err)
    }
}

/// Result type alias for tree construction.
pub type TreeResult<T> = Result<T, TreeError>;
