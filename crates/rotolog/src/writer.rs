//! The log writer: file lifecycle, rotation, and the JSON array policy.
//!
//! This module provides:
//! - [`LogWriter`] — One open file handle, one lock, one format
//! - Size-based rotation with timestamp-suffixed renames
//! - JSON array reconciliation so a log file survives process restarts
//!   and still parses as a single valid array

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use crate::config::LogWriterConfig;
use crate::echo::{ConsoleEcho, EchoSink};
use crate::error::{LogError, Result};
use crate::format::{self, TIMESTAMP_FORMAT};
use crate::types::{LogFormat, LogLevel};

const ARRAY_OPEN: &[u8] = b"[\n";
const ARRAY_CLOSE: &[u8] = b"\n]";

/// Mutable writer state, guarded by a single lock.
struct WriterState {
    /// Current target directory.
    directory: PathBuf,
    /// The one open handle, absent while the writer is degraded or closed.
    file: Option<File>,
    /// A JSON array is open on disk and still needs its `]`.
    array_open: bool,
    /// The next JSON entry takes no leading comma.
    first_entry: bool,
    /// Mirror records to the echo sink.
    debug_echo: bool,
}

/// A leveled, timestamped log writer over one rotating file.
///
/// The writer owns a single file handle and serializes all access through an
/// internal lock, so it can be shared across threads behind an `Arc`. There
/// is no hidden global instance; construct one at startup and pass it to call
/// sites. For a process-wide writer, park it in a `std::sync::OnceLock`:
///
/// ```no_run
/// use std::sync::OnceLock;
/// use rotolog::{LogFormat, LogWriter, LogWriterConfig};
///
/// static LOG: OnceLock<LogWriter> = OnceLock::new();
///
/// fn writer() -> &'static LogWriter {
///     LOG.get_or_init(|| {
///         LogWriter::new(LogWriterConfig::new("app", LogFormat::Json)).expect("log writer")
///     })
/// }
/// ```
pub struct LogWriter {
    base_name: String,
    format: LogFormat,
    max_bytes: u64,
    echo: Arc<dyn EchoSink>,
    state: Mutex<WriterState>,
}

impl LogWriter {
    /// Creates a writer, echoing to stdout when debug echo is enabled.
    ///
    /// Creates the target directory recursively if it is absent, then opens
    /// (or continues) the log file.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::DirectoryCreate`] if the directory cannot be
    /// created and [`LogError::FileOpen`] if the file cannot be opened.
    pub fn new(config: LogWriterConfig) -> Result<Self> {
        Self::with_echo(config, Arc::new(ConsoleEcho::new()))
    }

    /// Creates a writer with a custom echo sink.
    ///
    /// # Errors
    ///
    /// Same as [`LogWriter::new`].
    pub fn with_echo(config: LogWriterConfig, echo: Arc<dyn EchoSink>) -> Result<Self> {
        let existed = config.directory.exists();
        fs::create_dir_all(&config.directory).map_err(|source| LogError::DirectoryCreate {
            path: config.directory.clone(),
            source,
        })?;
        if !existed {
            tracing::info!(path = %config.directory.display(), "created log directory");
        }

        let writer = Self {
            base_name: config.base_name,
            format: config.format,
            max_bytes: config.max_bytes,
            echo,
            state: Mutex::new(WriterState {
                directory: config.directory,
                file: None,
                array_open: false,
                first_entry: true,
                debug_echo: config.debug_echo,
            }),
        };

        {
            let mut state = writer.state.lock();
            writer.open_locked(&mut state)?;
        }
        tracing::debug!(
            file = %writer.state.lock().directory.join(writer.file_name()).display(),
            format = ?writer.format,
            "log writer initialized"
        );
        Ok(writer)
    }

    /// Writes one record.
    ///
    /// Thread-safe and infallible from the caller's perspective: rotation and
    /// write failures degrade to a dropped record plus a `tracing` warning,
    /// never an error or panic. Each record is flushed before this returns.
    pub fn log(&self, message: &str, level: LogLevel) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let entry = match format::serialize(self.format, message, level, &timestamp) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "dropping unserializable record");
                return;
            }
        };

        let mut state = self.state.lock();

        if let Err(err) = self.rotate_if_needed(&mut state) {
            // Keep writing to the current file rather than lose the record.
            tracing::warn!(error = %err, "log rotation failed");
        }
        if state.file.is_none() {
            if let Err(err) = self.open_locked(&mut state) {
                tracing::warn!(error = %err, "log file unavailable, dropping record");
                return;
            }
        }
        if let Err(err) = self.write_entry(&mut state, &entry) {
            tracing::warn!(error = %err, "log write failed, dropping record");
        }

        if state.debug_echo {
            self.echo
                .echo(level, &format::txt_line(message, level, &timestamp));
        }
    }

    /// Enables or disables the debug echo at runtime.
    pub fn set_debug_echo(&self, enabled: bool) {
        self.state.lock().debug_echo = enabled;
    }

    /// Moves the writer to a new directory.
    ///
    /// The current file is closed cleanly (a JSON array gets its terminator),
    /// the new directory is created if absent, and the file at the new
    /// location is opened or continued under the usual opening policy.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::DirectoryCreate`] or [`LogError::FileOpen`] if the
    /// new location is unusable; the old file is closed either way.
    pub fn set_log_directory(&self, directory: impl Into<PathBuf>) -> Result<()> {
        let directory = directory.into();
        let mut state = self.state.lock();

        self.close_locked(&mut state)?;
        fs::create_dir_all(&directory).map_err(|source| LogError::DirectoryCreate {
            path: directory.clone(),
            source,
        })?;
        state.directory = directory;
        self.open_locked(&mut state)?;
        tracing::debug!(path = %state.directory.display(), "log directory changed");
        Ok(())
    }

    /// Closes the writer, writing the JSON array terminator if one is open.
    ///
    /// Dropping the writer does the same; this variant surfaces the error.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminator or final flush cannot be written.
    pub fn close(self) -> Result<()> {
        let mut state = self.state.lock();
        self.close_locked(&mut state)
    }

    /// Returns the path of the active log file.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.state.lock().directory.join(self.file_name())
    }

    /// Returns the configured format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }

    // ========== Internal Methods ==========

    fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.format.extension())
    }

    /// Opens the file at the current directory per the opening policy.
    ///
    /// Non-JSON formats open for append. JSON inspects the existing file's
    /// last byte: a `]` means a cleanly closed array to splice into; anything
    /// else means a truncated or corrupt tail, so the array is restarted.
    fn open_locked(&self, state: &mut WriterState) -> Result<()> {
        let path = state.directory.join(self.file_name());

        if !self.format.is_json() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LogError::FileOpen {
                    path: path.clone(),
                    source,
                })?;
            state.file = Some(file);
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|source| LogError::FileOpen {
                path: path.clone(),
                source,
            })?;
        let len = file.metadata()?.len();

        if len == 0 {
            file.write_all(ARRAY_OPEN)?;
            file.flush()?;
            state.first_entry = true;
        } else {
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            if last[0] == b']' {
                // Cleanly closed by a prior run: drop the `]` and splice this
                // session's entries into the existing array. Walk back over
                // trailing whitespace to the last content byte; a `[` means
                // the array is empty and the next entry takes no comma.
                let mut prev = b'[';
                let mut pos = len - 1;
                while pos > 0 {
                    pos -= 1;
                    file.seek(SeekFrom::Start(pos))?;
                    let mut byte = [0u8; 1];
                    file.read_exact(&mut byte)?;
                    if !byte[0].is_ascii_whitespace() {
                        prev = byte[0];
                        break;
                    }
                }
                file.set_len(len - 1)?;
                file.seek(SeekFrom::End(0))?;
                if len == 1 {
                    // Nothing left but the bracket we removed; restart.
                    file.write_all(ARRAY_OPEN)?;
                    file.flush()?;
                }
                state.first_entry = prev == b'[';
                tracing::debug!(path = %path.display(), "continuing existing JSON array");
            } else {
                tracing::warn!(
                    path = %path.display(),
                    "JSON log not cleanly closed, restarting array"
                );
                file.set_len(0)?;
                file.seek(SeekFrom::Start(0))?;
                file.write_all(ARRAY_OPEN)?;
                file.flush()?;
                state.first_entry = true;
            }
        }
        state.array_open = true;
        state.file = Some(file);
        Ok(())
    }

    /// Closes the current handle, terminating an open JSON array first.
    fn close_locked(&self, state: &mut WriterState) -> Result<()> {
        let Some(mut file) = state.file.take() else {
            return Ok(());
        };
        if state.array_open {
            state.array_open = false;
            file.write_all(ARRAY_CLOSE)?;
        }
        file.flush()?;
        Ok(())
    }

    /// Rotates the current file aside once it has reached the size threshold.
    ///
    /// A missing file means nothing to rotate. The file is closed cleanly
    /// before the rename, so a rotated JSON file parses standalone.
    fn rotate_if_needed(&self, state: &mut WriterState) -> Result<()> {
        let Some(file) = state.file.as_mut() else {
            return Ok(());
        };
        file.flush()?;

        let path = state.directory.join(self.file_name());
        let Ok(meta) = fs::metadata(&path) else {
            return Ok(());
        };
        if meta.len() < self.max_bytes {
            return Ok(());
        }

        self.close_locked(state)?;
        let rotated = rotated_path(&path);
        fs::rename(&path, &rotated)?;
        tracing::debug!(
            from = %path.display(),
            to = %rotated.display(),
            "rotated log file"
        );
        self.open_locked(state)
    }

    fn write_entry(&self, state: &mut WriterState, entry: &str) -> Result<()> {
        let Some(file) = state.file.as_mut() else {
            return Ok(());
        };
        if self.format.is_json() {
            // Separator and entry go out as one write: a failed write must
            // not leave an orphaned comma ahead of the next entry.
            file.write_all(frame_json_entry(state.first_entry, entry).as_bytes())?;
            file.flush()?;
            state.first_entry = false;
        } else {
            file.write_all(entry.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if let Err(err) = self.close_locked(&mut state) {
            tracing::warn!(error = %err, "failed to close log file cleanly");
        }
    }
}

/// Frames one JSON entry for appending: a `,\n` separator joined to the
/// entry in a single buffer, or the bare entry for the first element.
fn frame_json_entry(first_entry: bool, entry: &str) -> String {
    if first_entry {
        entry.to_string()
    } else {
        format!(",\n{entry}")
    }
}

/// Picks a rotated name: `<filename>.<timestamp>` with `:` and space
/// replaced by `-`, probing a numeric suffix on same-second collisions.
fn rotated_path(path: &Path) -> PathBuf {
    let stamp = Local::now()
        .format(TIMESTAMP_FORMAT)
        .to_string()
        .replace([':', ' '], "-");
    let candidate = PathBuf::from(format!("{}.{stamp}", path.display()));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1u32;
    loop {
        let probe = PathBuf::from(format!("{}.{stamp}-{n}", path.display()));
        if !probe.exists() {
            return probe;
        }
        n += 1;
    }
}
