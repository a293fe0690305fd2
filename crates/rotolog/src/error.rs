//! Error types for the log writer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing or reconfiguring a log writer.
#[derive(Debug, Error)]
pub enum LogError {
    /// The target log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    DirectoryCreate {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The log file could not be opened for writing.
    #[error("failed to open log file {path}: {source}")]
    FileOpen {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of a log record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for log writer operations.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = LogError::DirectoryCreate {
            path: PathBuf::from("/no/such/dir"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/no/such/dir"));
        assert!(err.to_string().starts_with("failed to create log directory"));

        let err = LogError::FileOpen {
            path: PathBuf::from("app.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("app.json"));
    }

    #[test]
    fn error_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LogError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogError>();
    }

    #[test]
    fn error_debug_format() {
        let err = LogError::FileOpen {
            path: PathBuf::from("x.txt"),
            source: std::io::Error::other("boom"),
        };
        let debug = format!("{err:?}");
        assert!(debug.contains("FileOpen"));
    }
}
