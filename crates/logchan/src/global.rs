//! crates/logchan/src/global.rs
//! Process-wide default logger and free-function facade.
//!
//! The global logger is created on first use with the built-in channels,
//! every channel enabled, and a stderr sink. Applications that want a
//! different configuration call [`install`] from their composition root
//! before anything logs. The active mask is atomic, so the facade is safe
//! to use from any thread; reconfiguration from several threads at once is
//! last-writer-wins.

use std::fmt;
use std::sync::OnceLock;

use crate::error::ChannelError;
use crate::level::Level;
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Installs `logger` as the process-wide logger.
///
/// Fails, handing the logger back, when the global logger was already
/// installed or already used.
pub fn install(logger: Logger) -> Result<(), Logger> {
    GLOBAL.set(logger)
}

/// The process-wide logger.
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// The active mask of the global logger.
pub fn level() -> Level {
    logger().level()
}

/// See [`Logger::at_level`].
pub fn at_level(level: Level) -> bool {
    logger().at_level(level)
}

/// See [`Logger::level_to_string`].
pub fn level_to_string(level: Level) -> String {
    logger().level_to_string(level)
}

/// See [`Logger::level_to_prefix`].
pub fn level_to_prefix(level: Level) -> String {
    logger().level_to_prefix(level)
}

/// See [`Logger::level_to_keys`].
pub fn level_to_keys(level: Level) -> String {
    logger().level_to_keys(level)
}

/// See [`Logger::set_channels`].
pub fn set_channels(keys: &str) -> Result<String, ChannelError> {
    logger().set_channels(keys)
}

/// See [`Logger::set_channels_ez`].
pub fn set_channels_ez(which: &str, keys: &str, set_if_empty: bool) -> bool {
    logger().set_channels_ez(which, keys, set_if_empty)
}

/// See [`Logger::printf`]; usually invoked through [`glogf!`](crate::glogf).
pub fn printf(level: Level, args: fmt::Arguments<'_>) -> bool {
    logger().printf(level, args)
}

/// See [`Logger::print`].
pub fn print(level: Level, operands: &[&dyn fmt::Display]) -> bool {
    logger().print(level, operands)
}

/// See [`Logger::println`].
pub fn println(level: Level, operands: &[&dyn fmt::Display]) -> bool {
    logger().println(level, operands)
}
