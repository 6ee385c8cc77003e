//! Integration tests for the global tracing subscriber.
//!
//! A global subscriber can be installed once per process, so this file holds
//! a single test and runs as its own binary.

#![cfg(feature = "tracing")]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use logchan::{Level, Logger, Registry, init_tracing};
use logchan_sink::WriterSink;

/// A writer whose every write fails, counting the attempts.
struct ClosedPipe(Arc<AtomicUsize>);

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_under_global_subscriber_does_not_recurse() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let sink = Arc::new(WriterSink::new(ClosedPipe(Arc::clone(&attempts))));
    let logger = Arc::new(Logger::with_parts(Registry::defaults(), Level::ALL, sink));
    init_tracing(Arc::clone(&logger));

    tracing::warn!(target: "app", "one line");
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    tracing::error!(target: "app", "another line");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);

    // Events from the sink crate itself never reach the gate.
    tracing::warn!(target: "logchan_sink::sink::writer", "write failed");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
