//! CLI error type.

use std::path::PathBuf;

use formguard::SchemaError;
use thiserror::Error;

/// Errors that stop a command. Validation failures are not errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command line; holds clap's rendered message.
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        Self::Usage(err.render().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_output_error_mentions_write() {
        let err = CliError::Output(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let display = err.to_string();
        assert!(display.starts_with("failed to write output"));
        assert!(display.contains("pipe closed"));
        assert!(!display.contains("read"));
    }
}
