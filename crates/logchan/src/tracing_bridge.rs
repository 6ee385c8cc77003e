//! crates/logchan/src/tracing_bridge.rs
//! Bridge between the tracing crate and the channel gate.
//!
//! [`ChannelLayer`] is a tracing-subscriber layer that maps each event's
//! severity onto a built-in channel, consults a [`Logger`] and, when the
//! channel is enabled, writes the prefixed message to the logger's sink.
//! Code instrumented with `tracing::warn!` and friends then obeys the same
//! channel keys as code calling the logger directly.
//!
//! | tracing level | channel |
//! |---------------|---------|
//! | `ERROR`       | `error` |
//! | `WARN`        | `warn`  |
//! | `INFO`        | `info`  |
//! | `DEBUG`       | `debug` |
//! | `TRACE`       | `debug` |
//!
//! Events emitted by this crate or by `logchan-sink` are skipped so that
//! channel updates and sink write failures do not loop back through the
//! gate. Events raised on a thread while the layer is already writing a line
//! are dropped as well, whatever their target.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logchan::{Logger, init_tracing};
//!
//! let logger = Arc::new(Logger::default());
//! logger.set_channels("WEF")?;
//! init_tracing(Arc::clone(&logger));
//!
//! tracing::warn!("disk almost full"); // "[warn] disk almost full"
//! tracing::info!("not shown");
//! ```

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::level::Level;
use crate::logger::Logger;

const OWN_TARGETS: [&str; 2] = [env!("CARGO_CRATE_NAME"), "logchan_sink"];

thread_local! {
    static EMITTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as writing through the layer until dropped.
struct EmitGuard;

impl EmitGuard {
    /// `None` when this thread is already inside the layer.
    fn enter() -> Option<Self> {
        EMITTING.with(|emitting| (!emitting.replace(true)).then_some(Self))
    }
}

impl Drop for EmitGuard {
    fn drop(&mut self) {
        EMITTING.with(|emitting| emitting.set(false));
    }
}

/// A tracing layer that routes events through a [`Logger`]'s channel gate.
pub struct ChannelLayer {
    logger: Arc<Logger>,
}

impl ChannelLayer {
    /// Creates a layer gating events through `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// The logger events are routed through.
    #[must_use]
    pub const fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Map a tracing level to the built-in channel carrying it.
    const fn channel_for(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::ERROR,
            tracing::Level::WARN => Level::WARN,
            tracing::Level::INFO => Level::INFO,
            tracing::Level::DEBUG | tracing::Level::TRACE => Level::DEBUG,
        }
    }

    fn is_own_event(target: &str) -> bool {
        OWN_TARGETS.iter().any(|own| {
            target
                .strip_prefix(own)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl fmt::Debug for ChannelLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelLayer")
            .field("logger", &self.logger)
            .finish()
    }
}

impl<S> Layer<S> for ChannelLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_own_event(metadata.target()) {
            return;
        }

        let channel = Self::channel_for(metadata.level());
        if !self.logger.at_level(channel) {
            return;
        }

        let Some(_guard) = EmitGuard::enter() else {
            return;
        };
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.logger.printf(channel, format_args!("{message}"));
        }
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global tracing subscriber that routes events through `logger`.
///
/// Panics if a global subscriber was already set, like
/// [`SubscriberInitExt::init`](tracing_subscriber::util::SubscriberInitExt::init).
pub fn init_tracing(logger: Arc<Logger>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(ChannelLayer::new(logger))
        .init();
}

/// Install a global tracing subscriber combining `filter` with the channel
/// gate.
///
/// # Example
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(logger, EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(logger: Arc<Logger>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(ChannelLayer::new(logger))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use logchan_sink::{CaptureSink, WriterSink};
    use tracing_subscriber::layer::SubscriberExt;

    use crate::registry::Registry;

    fn gated(keys: &str) -> (Arc<Logger>, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::new());
        let logger = Arc::new(Logger::with_sink([], Level::NONE, Arc::clone(&sink)));
        logger.set_channels(keys).expect("built-in keys");
        (logger, sink)
    }

    #[test]
    fn tracing_levels_map_onto_severity_channels() {
        assert_eq!(ChannelLayer::channel_for(&tracing::Level::ERROR), Level::ERROR);
        assert_eq!(ChannelLayer::channel_for(&tracing::Level::WARN), Level::WARN);
        assert_eq!(ChannelLayer::channel_for(&tracing::Level::INFO), Level::INFO);
        assert_eq!(ChannelLayer::channel_for(&tracing::Level::DEBUG), Level::DEBUG);
        assert_eq!(ChannelLayer::channel_for(&tracing::Level::TRACE), Level::DEBUG);
    }

    #[test]
    fn own_targets_are_recognised() {
        assert!(ChannelLayer::is_own_event("logchan"));
        assert!(ChannelLayer::is_own_event("logchan::logger"));
        assert!(ChannelLayer::is_own_event("logchan_sink::sink::writer"));
        assert!(!ChannelLayer::is_own_event("logchan_cli"));
        assert!(!ChannelLayer::is_own_event("logchan_sinks"));
        assert!(!ChannelLayer::is_own_event("app::net"));
    }

    #[test]
    fn enabled_events_reach_the_sink_with_prefix() {
        let (logger, sink) = gated("WE");
        let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app", "disk {} full", "almost");
            tracing::error!(target: "app", "write failed");
            tracing::info!(target: "app", "dropped");
            tracing::debug!(target: "app", "dropped too");
        });

        assert_eq!(
            sink.drain(),
            vec![
                "[warn] disk almost full".to_string(),
                "[error] write failed".to_string(),
            ]
        );
    }

    #[test]
    fn trace_events_follow_the_debug_channel() {
        let (logger, sink) = gated("D");
        let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!(target: "app", "fine grained");
        });

        assert_eq!(sink.drain(), vec!["[debug] fine grained".to_string()]);
    }

    #[test]
    fn channel_updates_do_not_feed_back_into_the_sink() {
        let (logger, sink) = gated("A");
        let subscriber =
            tracing_subscriber::registry().with(ChannelLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            logger.set_channels("D").expect("built-in key");
        });

        assert!(sink.is_empty());
        assert_eq!(logger.level(), Level::DEBUG);
    }

    #[test]
    fn emit_guard_is_not_reentrant() {
        let outer = EmitGuard::enter();
        assert!(outer.is_some());
        assert!(EmitGuard::enter().is_none());
        drop(outer);
        assert!(EmitGuard::enter().is_some());
    }

    struct RefusingWriter(Arc<AtomicUsize>);

    impl io::Write for RefusingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_sink_writes_each_event_once() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(WriterSink::new(RefusingWriter(Arc::clone(&attempts))));
        let logger = Arc::new(Logger::with_parts(
            Registry::defaults(),
            Level::ALL,
            sink,
        ));
        let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app", "one line");
        });

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
