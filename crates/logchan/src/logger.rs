//! crates/logchan/src/logger.rs
//! The level gate: active mask, channel selection and gated emission.

use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use logchan_sink::{LineSink, StderrSink};

use crate::channel::Channel;
use crate::error::ChannelError;
use crate::level::Level;
use crate::registry::{Decomposition, Registry};

/// Gates log lines against a runtime-configurable set of enabled channels.
///
/// A logger owns an immutable [`Registry`], the active mask, and the
/// [`LineSink`] that receives every line passing the gate. The active mask
/// is a single atomic word, so one logger can be shared across threads
/// while callers reconfigure it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logchan::{Level, Logger};
/// use logchan_sink::CaptureSink;
///
/// let sink = Arc::new(CaptureSink::new());
/// let logger = Logger::with_sink([], Level::ALL, Arc::clone(&sink));
///
/// assert_eq!(logger.set_channels("WE"), Ok("warn,error".to_string()));
/// assert!(logger.at_level(Level::ERROR));
/// assert!(!logger.at_level(Level::DEBUG));
///
/// logger.println(Level::WARN, &[&"disk", &"almost", &"full"]);
/// logger.println(Level::DEBUG, &[&"dropped"]);
/// assert_eq!(sink.drain(), vec!["[warn] disk almost full".to_string()]);
/// ```
pub struct Logger {
    registry: Registry,
    level: AtomicU64,
    sink: Arc<dyn LineSink>,
}

impl Logger {
    /// Creates a logger writing to standard error.
    pub fn new<I>(custom: I, default_level: Level) -> Self
    where
        I: IntoIterator<Item = Channel>,
    {
        Self::with_sink(custom, default_level, StderrSink::new())
    }

    /// Creates a logger writing to `sink`.
    pub fn with_sink<I, S>(custom: I, default_level: Level, sink: S) -> Self
    where
        I: IntoIterator<Item = Channel>,
        S: LineSink + 'static,
    {
        Self::with_parts(Registry::new(custom), default_level, Arc::new(sink))
    }

    /// Creates a logger from an already built registry and a shared sink.
    #[must_use]
    pub fn with_parts(registry: Registry, default_level: Level, sink: Arc<dyn LineSink>) -> Self {
        Self {
            registry,
            level: AtomicU64::new(default_level.bits()),
            sink,
        }
    }

    /// The logger's channel table.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The sink receiving gated lines.
    #[must_use]
    pub const fn sink(&self) -> &Arc<dyn LineSink> {
        &self.sink
    }

    /// The active mask.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Replaces the active mask.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.bits(), Ordering::Relaxed);
    }

    /// `true` when `level` shares at least one bit with the active mask.
    ///
    /// An empty mask never passes, [`Level::NONE`] included.
    #[must_use]
    pub fn at_level(&self, level: Level) -> bool {
        level.intersects(self.level())
    }

    /// Splits `level` into the registered channels describing it.
    #[must_use]
    pub fn decompose(&self, level: Level) -> Decomposition<'_> {
        self.registry.decompose(level)
    }

    /// Channel descriptions for `level`, joined with `,`.
    #[must_use]
    pub fn level_to_string(&self, level: Level) -> String {
        self.decompose(level).label()
    }

    /// `"[descriptions] "` for `level`, or `""` when nothing describes it.
    #[must_use]
    pub fn level_to_prefix(&self, level: Level) -> String {
        self.decompose(level).prefix()
    }

    /// Channel keys for `level`; feeding them back to
    /// [`set_channels`](Self::set_channels) reproduces the mask.
    #[must_use]
    pub fn level_to_keys(&self, level: Level) -> String {
        self.decompose(level).keys()
    }

    /// Replaces the active mask with the channels named by `keys`.
    ///
    /// Every character must be a registered key. On the first unknown
    /// character the call fails and the active mask is left untouched. On
    /// success the description of the new mask is returned.
    pub fn set_channels(&self, keys: &str) -> Result<String, ChannelError> {
        let mask = self.registry.parse_keys(keys)?;
        let label = self.level_to_string(mask);
        self.set_level(mask);
        tracing::debug!(channels = keys, %mask, %label, "active channels updated");
        Ok(label)
    }

    /// Applies `keys` when non-empty (or when `set_if_empty` is set) and
    /// reports the outcome to the sink under the `which` label.
    ///
    /// Returns `false` only when an attempted update failed; skipping the
    /// update counts as success.
    pub fn set_channels_ez(&self, which: &str, keys: &str, set_if_empty: bool) -> bool {
        if keys.is_empty() && !set_if_empty {
            return true;
        }

        match self.set_channels(keys) {
            Ok(label) => {
                self.sink
                    .write_line(&format!("Setting {which} logging to '{label}'"));
                true
            }
            Err(error) => {
                tracing::warn!(which, channels = keys, %error, "channel update rejected");
                self.sink
                    .write_line(&format!("Failed to set {which} logging: {error}"));
                false
            }
        }
    }

    /// Emits a formatted line when `level` passes the gate.
    ///
    /// Usually invoked through [`logf!`](crate::logf). Returns whether the
    /// line was emitted.
    pub fn printf(&self, level: Level, args: fmt::Arguments<'_>) -> bool {
        self.emit(level, |line| line.write_fmt(args))
    }

    /// Emits the operands concatenated without separators when `level`
    /// passes the gate.
    pub fn print(&self, level: Level, operands: &[&dyn fmt::Display]) -> bool {
        self.emit(level, |line| {
            operands
                .iter()
                .try_for_each(|operand| write!(line, "{operand}"))
        })
    }

    /// Emits the operands separated by single spaces when `level` passes
    /// the gate.
    pub fn println(&self, level: Level, operands: &[&dyn fmt::Display]) -> bool {
        self.emit(level, |line| {
            operands.iter().enumerate().try_for_each(|(i, operand)| {
                if i > 0 {
                    line.push(' ');
                }
                write!(line, "{operand}")
            })
        })
    }

    fn emit<F>(&self, level: Level, payload: F) -> bool
    where
        F: FnOnce(&mut String) -> fmt::Result,
    {
        if !self.at_level(level) {
            return false;
        }

        let mut line = self.level_to_prefix(level);
        // A failing Display impl keeps whatever it wrote before failing.
        let _ = payload(&mut line);
        self.sink.write_line(&line);
        true
    }
}

impl Default for Logger {
    /// Built-in channels only, every channel enabled, writing to stderr.
    fn default() -> Self {
        Self::with_parts(Registry::defaults(), Level::ALL, Arc::new(StderrSink::new()))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
