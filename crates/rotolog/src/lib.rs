//! # rotolog
//!
//! A rotating, multi-format file logger with restart-safe JSON arrays.
//!
//! This crate provides:
//!
//! - [`LogWriter`] — One file handle, one lock, synchronous flush-per-record
//! - [`LogWriterConfig`] — Builder-style configuration
//! - [`LogLevel`] / [`LogFormat`] — Severity levels and on-disk formats
//! - [`EchoSink`] — Pluggable debug mirror (console, tracing, noop)
//! - Size-based rotation with timestamp-suffixed renames
//! - JSON array reconciliation: a `.json` log keeps parsing as one valid
//!   array across appends, rotations, and process restarts
//!
//! ## Example
//!
//! ```no_run
//! use rotolog::{LogFormat, LogLevel, LogWriter, LogWriterConfig};
//!
//! # fn main() -> rotolog::Result<()> {
//! let writer = LogWriter::new(
//!     LogWriterConfig::new("app", LogFormat::Json)
//!         .with_directory("logs")
//!         .with_max_size_mb(10),
//! )?;
//!
//! writer.log("service started", LogLevel::Info);
//! writer.log("cache miss", LogLevel::Debug);
//!
//! // Dropping the writer terminates the JSON array; close() surfaces errors.
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod echo;
pub mod error;
pub mod format;
pub mod types;
pub mod writer;

// Re-export main types
pub use config::LogWriterConfig;
pub use echo::{BoxedEchoSink, ConsoleEcho, EchoSink, NoopEcho, TracingEcho};
pub use error::{LogError, Result};
pub use format::{JsonRecord, TIMESTAMP_FORMAT, serialize, txt_line};
pub use types::{LogFormat, LogLevel};
pub use writer::LogWriter;
