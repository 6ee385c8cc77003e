//! crates/logchan-cli/src/error.rs
//! Failures reported by the front-end.

use std::io;

use logchan::{ChannelError, ConfigError, LevelParseError};

/// Error produced while executing a parsed command line.
///
/// Every variant is rendered as a single `logchan: <message>` line and maps
/// to exit status `1`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The command line itself was rejected; holds the first line of the
    /// parser's diagnostic.
    #[error("{0}")]
    Usage(String),
    /// A `--custom` value did not have the `KEY:BIT:DESC` shape.
    #[error("invalid custom channel '{spec}': {reason}")]
    InvalidCustom {
        /// The rejected argument.
        spec: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A `--describe` value was not a number.
    #[error(transparent)]
    Mask(#[from] LevelParseError),
    /// The logger could not be built from the command line.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The `--level` letters did not decode.
    #[error("invalid message level: {0}")]
    MessageLevel(#[from] ChannelError),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}
