//! crates/logchan/src/macros.rs
//! Formatting macros over the gated emission calls.

/// Emit a formatted line through a [`Logger`](crate::Logger) when the level
/// passes its gate. Evaluates to `true` when the line was emitted.
///
/// # Example
/// ```
/// use logchan::{Level, Logger, logf};
/// use logchan_sink::CaptureSink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(CaptureSink::new());
/// let logger = Logger::with_sink([], Level::WARN, Arc::clone(&sink));
/// logf!(logger, Level::WARN, "retrying in {}s", 5);
/// logf!(logger, Level::DEBUG, "not shown");
/// assert_eq!(sink.drain(), vec!["[warn] retrying in 5s".to_string()]);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.printf($level, ::std::format_args!($($arg)+))
    };
}

/// Emit a formatted line through the global logger.
///
/// # Example
/// ```ignore
/// glogf!(Level::ERROR, "lost connection to {}", peer);
/// ```
#[macro_export]
macro_rules! glogf {
    ($level:expr, $($arg:tt)+) => {
        $crate::global::printf($level, ::std::format_args!($($arg)+))
    };
}
