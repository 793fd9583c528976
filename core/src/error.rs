//! Common error types for the language model.

use thiserror::Error;

/// Errors raised while building language-model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The binary class name is malformed.
    #[error("Invalid class name '{name}': {reason}")]
    InvalidClassName { name: String, reason: &'static str },
}

impl CoreError {
    pub fn invalid_class_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidClassName {
            name: name.into(),
            reason,
        }
    }
}

/// Result type for language-model operations.
pub type CoreResult<T> = Result<T, CoreError>;
