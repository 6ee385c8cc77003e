#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logchan/src/lib.rs
//!
//! # Overview
//!
//! `logchan` is a channel-based level gate for log output. Every log line is
//! tagged with a 64-bit [`Level`] mask; each bit is a *channel* with a
//! one-character key and a short description. A [`Logger`] holds the mask of
//! enabled channels and emits a line only when its level shares a bit with
//! that mask. Emitted lines carry a prefix naming the channels that describe
//! the level, such as `[warn] ` or `[debug,audit] `.
//!
//! # Design
//!
//! - [`Level`] is a transparent `u64` newtype with bitwise operators. The
//!   five severities live in the top bits; the low bits are free for
//!   application channels.
//! - [`Registry`] is the immutable, ordered table of channels: the
//!   built-ins of [`DEFAULT_CHANNELS`] followed by custom channels. Its order
//!   drives [`Registry::decompose`].
//! - [`Logger`] owns a registry, an atomic active mask, and a
//!   [`LineSink`](logchan_sink::LineSink) receiving every emitted line.
//! - [`LoggerConfig`] builds a logger declaratively and, with the `serde`
//!   feature, from configuration files.
//! - The [`global`] module offers a lazily created process-wide logger with
//!   free-function wrappers; [`logf!`] and [`glogf!`] format lines for a
//!   logger or for the global one.
//! - With the `tracing` feature, `ChannelLayer` routes `tracing` events
//!   through the same gate.
//!
//! # Invariants
//!
//! - [`Level::NONE`] never passes the gate, whatever the active mask.
//! - [`Logger::set_channels`] is all-or-nothing: an unknown key leaves the
//!   active mask untouched.
//! - For masks built from single-bit built-in channels,
//!   `set_channels(&level_to_keys(mask))` restores `mask`.
//! - The registry never changes after construction; only the active mask is
//!   mutable, and it is a single atomic word.
//!
//! # Errors
//!
//! [`ChannelError`] reports unknown channel keys. [`RegistryError`] is
//! returned by [`Registry::strict`] for colliding or multi-bit custom
//! channels. [`ConfigError`] wraps both for [`LoggerConfig::build`].
//! Emission never fails: sinks swallow their own I/O errors.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logchan::{Channel, Level, Logger, logf};
//! use logchan_sink::CaptureSink;
//!
//! const AUDIT: Level = Level::from_bits(0x1);
//!
//! let sink = Arc::new(CaptureSink::new());
//! let logger = Logger::with_sink(
//!     [Channel::new(AUDIT, b'X', "audit")],
//!     Level::NONE,
//!     Arc::clone(&sink),
//! );
//!
//! assert_eq!(logger.set_channels("XE").as_deref(), Ok("error,audit"));
//! logf!(logger, AUDIT, "user {} logged in", "ada");
//! logf!(logger, Level::INFO, "suppressed");
//! logger.println(Level::ERROR | AUDIT, &[&"denied", &42]);
//!
//! assert_eq!(
//!     sink.drain(),
//!     vec![
//!         "[audit] user ada logged in".to_string(),
//!         "[error,audit] denied 42".to_string(),
//!     ]
//! );
//! ```
//!
//! # See also
//!
//! - `logchan-sink` for the sink implementations.

mod channel;
mod config;
mod error;
pub mod global;
mod level;
mod logger;
mod macros;
mod registry;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use channel::{
    Channel, DEFAULT_CHANNELS, KEY_ALL, KEY_DEBUG, KEY_ERROR, KEY_FATAL, KEY_INFO, KEY_NONE,
    KEY_WARN,
};
pub use config::LoggerConfig;
pub use error::{ChannelError, ConfigError, LevelParseError, RegistryError};
pub use level::Level;
pub use logger::Logger;
pub use registry::{Decomposition, Registry};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ChannelLayer, init_tracing, init_tracing_with_filter};
