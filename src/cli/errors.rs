//! CLI error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// The store rejected an operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Config file could not be read
    #[error("LOG_CLI_CONFIG_ERROR: Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid JSON for a store config
    #[error("LOG_CLI_CONFIG_ERROR: Invalid config JSON in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Store file does not exist
    #[error("LOG_CLI_FILE_NOT_FOUND: Store file not found: {0}")]
    FileNotFound(PathBuf),

    /// stdin/stdout failure
    #[error("LOG_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Response could not be serialized
    #[error("LOG_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Store(e) => e.code().code(),
            CliError::ConfigRead { .. } | CliError::ConfigParse { .. } => "LOG_CLI_CONFIG_ERROR",
            CliError::FileNotFound(_) => "LOG_CLI_FILE_NOT_FOUND",
            CliError::Io(_) | CliError::Json(_) => "LOG_CLI_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_passes_code_through() {
        let err = CliError::from(StoreError::out_of_range(40, 8, 21));
        assert_eq!(err.code(), "LOG_STORE_OUT_OF_RANGE");
        assert!(err.to_string().starts_with("LOG_STORE_OUT_OF_RANGE"));
    }

    #[test]
    fn test_display_starts_with_code() {
        let err = CliError::FileNotFound(PathBuf::from("/missing.log"));
        assert!(err.to_string().starts_with(err.code()));

        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(err.to_string().starts_with(err.code()));
    }
}
