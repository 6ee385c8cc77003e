//! crates/logchan/src/config.rs
//! Declarative logger configuration.

use std::sync::Arc;

use logchan_sink::LineSink;

use crate::channel::Channel;
use crate::error::ConfigError;
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::Registry;

/// Everything needed to build a [`Logger`] apart from its sink.
///
/// With the `serde` feature the configuration can be loaded from any serde
/// format; every field is optional there.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Custom channels appended after the built-ins.
    pub channels: Vec<Channel>,
    /// Mask enabled at construction.
    pub default_level: Level,
    /// Channel keys applied after construction, overriding `default_level`.
    pub enabled: Option<String>,
    /// Reject colliding or multi-bit custom channels.
    pub strict: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            default_level: Level::ALL,
            enabled: None,
            strict: false,
        }
    }
}

impl LoggerConfig {
    /// Create a configuration whose default mask follows a `-v` count.
    ///
    /// `0` enables error and fatal, `1` adds warn, `2` adds info and `3` or
    /// more adds debug.
    pub fn from_verbose_level(level: u8) -> Self {
        Self {
            default_level: verbose_mask(level),
            ..Self::default()
        }
    }

    /// Builds the logger, applying `enabled` when present.
    pub fn build(self, sink: Arc<dyn LineSink>) -> Result<Logger, ConfigError> {
        let registry = if self.strict {
            Registry::strict(self.channels)?
        } else {
            Registry::new(self.channels)
        };

        let logger = Logger::with_parts(registry, self.default_level, sink);
        if let Some(keys) = self.enabled.as_deref() {
            logger.set_channels(keys)?;
        }
        Ok(logger)
    }
}

fn verbose_mask(level: u8) -> Level {
    let mut mask = Level::ERROR | Level::FATAL;
    if level >= 1 {
        mask |= Level::WARN;
    }
    if level >= 2 {
        mask |= Level::INFO;
    }
    if level >= 3 {
        mask |= Level::DEBUG;
    }
    mask
}
