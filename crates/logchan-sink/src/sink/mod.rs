use std::sync::Arc;

mod capture;
mod writer;

pub use capture::CaptureSink;
pub use writer::{StderrSink, WriterSink};

/// Destination for fully formatted log lines.
///
/// The level gate hands every line that passes its mask test to a
/// `LineSink` exactly once. Implementations own their concurrency: the gate
/// may call [`write_line`](Self::write_line) from many threads at once and
/// never buffers or batches on their behalf. Lines arrive without a trailing
/// newline unless the caller's payload carried one; terminating them is the
/// sink's decision.
///
/// Write failures are not reported back to the caller. A log call that
/// cannot reach its destination is dropped, mirroring how conventional
/// line loggers treat their output stream.
pub trait LineSink: Send + Sync {
    /// Writes a single line.
    fn write_line(&self, line: &str);
}

impl<S> LineSink for Arc<S>
where
    S: LineSink + ?Sized,
{
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}

impl<S> LineSink for Box<S>
where
    S: LineSink + ?Sized,
{
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}

impl<S> LineSink for &S
where
    S: LineSink + ?Sized,
{
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}
