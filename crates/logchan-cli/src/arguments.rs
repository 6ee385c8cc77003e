//! crates/logchan-cli/src/arguments.rs
//! Command-line definition and parsing.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};

/// Program name used when the argument vector is empty.
pub(crate) const PROGRAM_NAME: &str = "logchan";

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) list: bool,
    pub(crate) force: bool,
    pub(crate) strict: bool,
    pub(crate) verbose: u8,
    pub(crate) channels: Option<String>,
    pub(crate) customs: Vec<String>,
    pub(crate) describe: Vec<String>,
    pub(crate) level: Option<String>,
    pub(crate) message: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List every registered channel.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("channels")
                .long("channels")
                .short('c')
                .value_name("LETTERS")
                .help("Enable the channels named by LETTERS.")
                .num_args(1)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Apply an empty channel selection instead of ignoring it.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("custom")
                .long("custom")
                .value_name("KEY:BIT:DESC")
                .help("Register a custom channel on bit BIT (0-58).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject custom channels that reuse a key or bit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Start from error and fatal, widening with each repetition.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("describe")
                .long("describe")
                .value_name("MASK")
                .help("Print the channels describing MASK.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LETTERS")
                .help("Channels the MESSAGE is logged on (default: I).")
                .num_args(1)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("message")
                .action(ArgAction::Append)
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let strings = |values: Option<clap::parser::Values<String>>| -> Vec<String> {
        values.map(Iterator::collect).unwrap_or_default()
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        list: matches.get_flag("list"),
        force: matches.get_flag("force"),
        strict: matches.get_flag("strict"),
        verbose: matches.get_count("verbose"),
        channels: matches.remove_one::<String>("channels"),
        customs: strings(matches.remove_many::<String>("custom")),
        describe: strings(matches.remove_many::<String>("describe")),
        level: matches.remove_one::<String>("level"),
        message: strings(matches.remove_many::<String>("message")),
    })
}
