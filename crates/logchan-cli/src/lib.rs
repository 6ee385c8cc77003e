#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logchan-cli/src/lib.rs
//!
//! # Overview
//!
//! `logchan_cli` implements the command-line front-end for the logchan
//! workspace. It builds a [`Logger`] from command-line flags, applies a
//! channel selection, and then lists channels, describes masks, or logs a
//! message through the gate. The binary is a thin wrapper around [`run`].
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error. A [`clap`](https://docs.rs/clap/) builder
//! definition parses the flags; custom channels and the logger configuration
//! are assembled into a [`LoggerConfig`]. The logger writes into a
//! [`CaptureSink`] whose lines are copied to the error handle once the
//! command finishes, so gated output and configuration reports share one
//! stream in emission order. While the command runs, `tracing` events from
//! this crate are routed through the same logger by a [`ChannelLayer`].
//!
//! When `--channels` is absent the selection is read from the
//! `LOGCHAN_CHANNELS` environment variable.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit status `1` together with
//!   a single `logchan: <message>` line on the error handle.
//! - Listing and mask descriptions go to the output handle; everything that
//!   passes through the logger goes to the error handle.
//!
//! # Errors
//!
//! Argument errors, malformed `--custom` or `--describe` values, strict
//! registry violations, and unknown `--level` letters are reported as
//! [`CliError`]. A rejected channel selection is reported by the logger
//! itself (`Failed to set cli logging: ...`) and also exits with status `1`.
//!
//! # Examples
//!
//! ```
//! use logchan_cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(
//!     ["logchan", "-c", "WE", "-l", "W", "disk", "almost", "full"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert!(stdout.is_empty());
//! assert_eq!(
//!     String::from_utf8(stderr).unwrap(),
//!     "Setting cli logging to 'warn,error'\n[warn] disk almost full\n"
//! );
//! ```

mod arguments;
mod custom;
mod error;

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use logchan::{ChannelLayer, Level, Logger, LoggerConfig};
use logchan_sink::CaptureSink;
use tracing_subscriber::layer::SubscriberExt;

use arguments::{PROGRAM_NAME, ParsedArgs, parse_args};
use custom::parse_custom_channel;
pub use error::CliError;

/// Environment variable consulted when `--channels` is not given.
pub const CHANNELS_ENV: &str = "LOGCHAN_CHANNELS";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Channel letters used for `MESSAGE` when `--level` is not given.
const DEFAULT_MESSAGE_KEYS: &str = "I";

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "logchan ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: logchan [-h] [-V] [--list] [-c LETTERS] [--force] [--custom KEY:BIT:DESC]...\n",
    "               [--strict] [-v]... [--describe MASK]... [-l LETTERS] [MESSAGE...]\n",
    "\n",
    "Built-in channel letters: 0=none D=debug I=info W=warn E=error F=fatal A=all\n",
    "\n",
    "Options:\n",
    "  -h, --help                 Show this help message and exit.\n",
    "  -V, --version              Output version information and exit.\n",
    "      --list                 List every registered channel.\n",
    "  -c, --channels LETTERS     Enable the channels named by LETTERS\n",
    "                             (default: $LOGCHAN_CHANNELS).\n",
    "      --force                Apply an empty channel selection instead of ignoring it.\n",
    "      --custom KEY:BIT:DESC  Register a custom channel on bit BIT (0-58).\n",
    "      --strict               Reject custom channels that reuse a key or bit.\n",
    "  -v, --verbose              Start from error and fatal, widening with each repetition.\n",
    "      --describe MASK        Print the channels describing MASK (decimal or 0x hex).\n",
    "  -l, --level LETTERS        Channels the MESSAGE is logged on (default: I).\n",
);

/// Runs the front-end with the supplied arguments and output handles.
///
/// Returns the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let rendered = error.to_string();
            let summary = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            report(stderr, &CliError::Usage(summary.to_owned()))
        }
    }
}

/// Converts a status returned by [`run`] into an [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(clamped as u8)
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => 0,
            Err(error) => report(stderr, &CliError::from(error)),
        };
    }
    if parsed.show_version {
        return match writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")) {
            Ok(()) => 0,
            Err(error) => report(stderr, &CliError::from(error)),
        };
    }

    let sink = Arc::new(CaptureSink::new());
    let logger = match build_logger(&parsed, Arc::clone(&sink)) {
        Ok(logger) => Arc::new(logger),
        Err(error) => return report(stderr, &error),
    };

    let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(Arc::clone(&logger)));
    let outcome = tracing::subscriber::with_default(subscriber, || {
        execute_with_logger(&parsed, &logger, stdout)
    });

    for line in sink.drain() {
        let _ = writeln!(stderr, "{line}");
    }

    match outcome {
        Ok(status) => status,
        Err(error) => report(stderr, &error),
    }
}

fn build_logger(parsed: &ParsedArgs, sink: Arc<CaptureSink>) -> Result<Logger, CliError> {
    let channels = parsed
        .customs
        .iter()
        .map(|spec| parse_custom_channel(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = if parsed.verbose > 0 {
        LoggerConfig::from_verbose_level(parsed.verbose - 1)
    } else {
        LoggerConfig::default()
    };
    config.channels = channels;
    config.strict = parsed.strict;

    Ok(config.build(sink)?)
}

fn execute_with_logger<Out: Write>(
    parsed: &ParsedArgs,
    logger: &Logger,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let from_env = parsed.channels.is_none();
    let keys = parsed
        .channels
        .clone()
        .or_else(|| env::var(CHANNELS_ENV).ok())
        .unwrap_or_default();

    if !logger.set_channels_ez("cli", &keys, parsed.force) {
        return Ok(1);
    }
    if from_env && !keys.is_empty() {
        tracing::debug!("channels taken from {CHANNELS_ENV}");
    }

    if parsed.list {
        for channel in logger.registry() {
            writeln!(
                stdout,
                "{}  {}  {}",
                channel.key_char(),
                channel.level(),
                channel.description()
            )?;
        }
    }

    for mask in &parsed.describe {
        let level: Level = mask.parse()?;
        let decomposition = logger.decompose(level);
        write!(
            stdout,
            "{level}  label='{}'  keys='{}'",
            decomposition.label(),
            decomposition.keys()
        )?;
        if !decomposition.remainder().is_empty() {
            write!(stdout, "  unlabelled={}", decomposition.remainder())?;
        }
        writeln!(stdout)?;
    }

    if !parsed.message.is_empty() {
        let keys = parsed.level.as_deref().unwrap_or(DEFAULT_MESSAGE_KEYS);
        let level = logger.registry().parse_keys(keys)?;
        let words: Vec<&dyn fmt::Display> = parsed
            .message
            .iter()
            .map(|word| word as &dyn fmt::Display)
            .collect();
        if !logger.println(level, &words) {
            tracing::trace!("message suppressed by the active channels");
        }
    }

    Ok(0)
}

fn report<Err: Write>(stderr: &mut Err, error: &CliError) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
    error.exit_code()
}
