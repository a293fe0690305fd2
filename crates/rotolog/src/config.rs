//! Writer configuration.

use std::path::PathBuf;

use crate::types::LogFormat;

const DEFAULT_MAX_SIZE_MB: u64 = 10;

/// Configuration for a [`LogWriter`](crate::writer::LogWriter).
#[derive(Debug, Clone)]
pub struct LogWriterConfig {
    /// File stem for the log file (extension is derived from the format).
    pub base_name: String,
    /// On-disk serialization format.
    pub format: LogFormat,
    /// Rotation threshold in bytes. Defaults to 10 MB.
    pub max_bytes: u64,
    /// Mirror every record to the echo sink as a human-readable line.
    pub debug_echo: bool,
    /// Target directory, created recursively if absent.
    pub directory: PathBuf,
}

impl Default for LogWriterConfig {
    fn default() -> Self {
        Self {
            base_name: "app".to_string(),
            format: LogFormat::Txt,
            max_bytes: DEFAULT_MAX_SIZE_MB * 1024 * 1024,
            debug_echo: false,
            directory: PathBuf::from("../logs"),
        }
    }
}

impl LogWriterConfig {
    /// Creates a config with the given file stem and format.
    #[must_use]
    pub fn new(base_name: impl Into<String>, format: LogFormat) -> Self {
        Self {
            base_name: base_name.into(),
            format,
            ..Default::default()
        }
    }

    /// Sets the rotation threshold in megabytes.
    #[must_use]
    pub const fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_bytes = max_size_mb * 1024 * 1024;
        self
    }

    /// Sets the rotation threshold in bytes.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Enables or disables the debug echo.
    #[must_use]
    pub const fn with_debug_echo(mut self, debug_echo: bool) -> Self {
        self.debug_echo = debug_echo;
        self
    }

    /// Sets the target directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }
}
