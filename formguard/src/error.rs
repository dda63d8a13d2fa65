//! Error types

use std::path::PathBuf;

/// Errors raised while loading or compiling a [`FormSchema`](crate::FormSchema).
///
/// Validation failures are never errors; they are reported as messages in
/// [`FormErrors`](crate::FormErrors).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("failed to read schema '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema is not valid JSON or has unknown keys.
    #[error("invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    /// A field's `pattern` is not a valid regular expression.
    #[error("field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A field's `minLength` is greater than its `maxLength`.
    #[error("field '{field}' has minLength {min} greater than maxLength {max}")]
    InvalidLengthBounds { field: String, min: usize, max: usize },

    /// A field's `min` is greater than its `max`.
    #[error("field '{field}' has an invalid numeric range ({min} to {max})")]
    InvalidRange { field: String, min: f64, max: f64 },
}

impl SchemaError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern { field, .. }
            | Self::InvalidLengthBounds { field, .. }
            | Self::InvalidRange { field, .. } => Some(field),
            Self::Io { .. } | Self::Json(_) => None,
        }
    }
}
