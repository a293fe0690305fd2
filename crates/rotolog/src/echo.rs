//! Echo sinks for the debug mirror.
//!
//! When debug echo is enabled, the writer sends each record to an
//! [`EchoSink`] as a human-readable line, alongside the file write.

use std::io::Write;

use crate::types::LogLevel;

/// A console-like destination for echoed log lines.
///
/// Implement this trait to redirect the debug mirror (e.g. to a test
/// capture buffer or an in-process UI pane).
pub trait EchoSink: Send + Sync {
    /// Receives one formatted log line.
    fn echo(&self, level: LogLevel, line: &str);
}

/// Echoes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEcho;

impl ConsoleEcho {
    /// Creates a new console echo sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EchoSink for ConsoleEcho {
    fn echo(&self, _level: LogLevel, line: &str) {
        // A failed echo write must never disturb the caller.
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
    }
}

/// Echoes lines through the `tracing` infrastructure.
///
/// Levels map onto tracing events:
/// - Info, Unknown → `tracing::info!`
/// - Debug → `tracing::debug!`
/// - Warning → `tracing::warn!`
/// - Error, Critical → `tracing::error!`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEcho;

impl TracingEcho {
    /// Creates a new tracing-backed echo sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EchoSink for TracingEcho {
    fn echo(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Info | LogLevel::Unknown => {
                tracing::info!(target: "rotolog", "{line}");
            }
            LogLevel::Debug => tracing::debug!(target: "rotolog", "{line}"),
            LogLevel::Warning => tracing::warn!(target: "rotolog", "{line}"),
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(target: "rotolog", "{line}");
            }
        }
    }
}

/// A sink that discards everything, for tests or disabled scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEcho;

impl EchoSink for NoopEcho {
    fn echo(&self, _level: LogLevel, _line: &str) {
        // Intentionally does nothing
    }
}

/// A boxed echo sink for dynamic dispatch.
pub type BoxedEchoSink = Box<dyn EchoSink>;

impl EchoSink for BoxedEchoSink {
    fn echo(&self, level: LogLevel, line: &str) {
        (**self).echo(level, line);
    }
}
