//! Core types for the log writer.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels for log records
//! - [`LogFormat`] — On-disk serialization formats

use serde::{Deserialize, Serialize};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// General information
    Info,
    /// Debugging information
    Debug,
    /// Warning conditions
    Warning,
    /// Error conditions
    Error,
    /// Critical failures
    Critical,
    /// Unclassified records
    Unknown,
}

impl LogLevel {
    /// Returns the display string written into log records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk serialization format for log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One plain-text line per record.
    Txt,
    /// One comma-separated line per record, message quote-wrapped.
    Csv,
    /// A single top-level JSON array, maintained across appends and restarts.
    Json,
    /// Repeated standalone `<log>` fragments.
    Xml,
}

impl LogFormat {
    /// Returns the file extension for this format, without the leading dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Returns true if this format needs cross-call array state.
    ///
    /// Only JSON does: the other formats are self-delimiting per line.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(LogLevel::Info, "Info")]
    #[test_case(LogLevel::Debug, "Debug")]
    #[test_case(LogLevel::Warning, "Warning")]
    #[test_case(LogLevel::Error, "Error")]
    #[test_case(LogLevel::Critical, "Critical")]
    #[test_case(LogLevel::Unknown, "Unknown")]
    fn level_display_strings(level: LogLevel, expected: &str) {
        assert_eq!(level.as_str(), expected);
        assert_eq!(level.to_string(), expected);
    }

    #[test_case(LogFormat::Txt, "txt")]
    #[test_case(LogFormat::Csv, "csv")]
    #[test_case(LogFormat::Json, "json")]
    #[test_case(LogFormat::Xml, "xml")]
    fn format_extensions(format: LogFormat, expected: &str) {
        assert_eq!(format.extension(), expected);
    }

    #[test]
    fn only_json_carries_array_state() {
        assert!(LogFormat::Json.is_json());
        assert!(!LogFormat::Txt.is_json());
        assert!(!LogFormat::Csv.is_json());
        assert!(!LogFormat::Xml.is_json());
    }
}
