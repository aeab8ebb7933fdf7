//! Error handling for Manforge rendering
//!
//! This module provides a unified error type and result type for all
//! rendering operations.

use std::fmt;

/// Rendering error type
#[derive(Debug, Clone)]
pub enum RenderError {
    /// A required document attribute is missing or empty
    MissingAttribute { name: String },
    /// The input document tree is malformed
    InvalidTree { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingAttribute { name } => {
                write!(f, "Missing required document attribute: {}", name)
            }
            RenderError::InvalidTree { message } => {
                write!(f, "Invalid document tree: {}", message)
            }
            RenderError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

// Convenience constructors for errors
impl RenderError {
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        RenderError::MissingAttribute { name: name.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        RenderError::InvalidTree {
            message: message.into(),
        }
    }
}
