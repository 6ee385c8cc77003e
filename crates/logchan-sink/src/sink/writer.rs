use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::LineSink;
use crate::line_mode::LineMode;

/// Line sink backed by an [`io::Write`] implementor.
///
/// The writer lives behind a [`Mutex`] so a single sink can be shared by
/// every thread that logs through the same gate; each line and its
/// terminator are written while the lock is held, keeping concurrent lines
/// from interleaving.
///
/// # Examples
///
/// ```
/// use logchan_sink::{LineMode, LineSink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write_line("[warn] disk almost full");
/// sink.write_line("already terminated\n");
/// assert_eq!(
///     sink.into_inner(),
///     b"[warn] disk almost full\nalready terminated\n".to_vec()
/// );
///
/// let raw = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// raw.write_line("no terminator");
/// assert_eq!(raw.into_inner(), b"no terminator".to_vec());
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates every line with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Runs `f` with exclusive access to the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // A panic while holding the lock leaves at worst a partial line behind.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Writes `line` plus the terminator selected by the [`LineMode`].
    pub fn try_write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(self.line_mode.terminator_for(line).as_bytes())
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W> LineSink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_line(&self, line: &str) {
        if let Err(error) = self.try_write_line(line) {
            tracing::warn!(%error, "dropping log line after write failure");
        }
    }
}

impl<W> Default for WriterSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &*self.lock())
            .field("line_mode", &self.line_mode)
            .finish()
    }
}

/// Line sink that writes to the process's standard error stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StderrSink {
    line_mode: LineMode,
}

impl StderrSink {
    /// Creates a stderr sink that terminates every line.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_line_mode(LineMode::WithNewline)
    }

    /// Creates a stderr sink with the provided [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(line_mode: LineMode) -> Self {
        Self { line_mode }
    }
}

impl LineSink for StderrSink {
    fn write_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        let result = stderr
            .write_all(line.as_bytes())
            .and_then(|()| stderr.write_all(self.line_mode.terminator_for(line).as_bytes()));
        if let Err(error) = result {
            tracing::warn!(%error, "dropping log line after stderr write failure");
        }
    }
}
