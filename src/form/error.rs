//! Structural errors from form operations.

use thiserror::Error;

/// Errors that can occur when mutating the form tree.
///
/// Validation failures are never errors here; they are data on the controls.
/// These variants cover the only structural failure modes: a `set_all` value
/// tree that does not match the model's shape, and an unknown path.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("value shape does not match form at '{path}': {reason}")]
    ShapeMismatch { path: String, reason: String },

    #[error("no control at path '{path}'")]
    UnknownPath { path: String },
}

impl FormError {
    pub(crate) fn shape(path: &str, reason: impl Into<String>) -> Self {
        FormError::ShapeMismatch {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(path: &str) -> Self {
        FormError::UnknownPath {
            path: path.to_string(),
        }
    }
}
