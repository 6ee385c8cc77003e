use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn logchan() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_logchan"));
    command.env_remove("LOGCHAN_CHANNELS");
    command
}

#[test]
fn help_lists_usage() {
    logchan()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage: logchan"));
}

#[test]
fn version_is_printed() {
    logchan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logchan "));
}

#[test]
fn unknown_flag_fails() {
    logchan()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("logchan: "));
}

#[test]
fn message_is_emitted_with_prefix() {
    logchan()
        .args(["-c", "WE", "-l", "E", "disk", "failed"])
        .assert()
        .success()
        .stderr("Setting cli logging to 'warn,error'\n[error] disk failed\n");
}

#[test]
fn environment_supplies_channels() {
    logchan()
        .env("LOGCHAN_CHANNELS", "W")
        .args(["-l", "W", "low", "space"])
        .assert()
        .success()
        .stderr("Setting cli logging to 'warn'\n[warn] low space\n");
}

#[test]
fn environment_debug_channel_traces_its_source() {
    logchan()
        .env("LOGCHAN_CHANNELS", "DI")
        .arg("ready")
        .assert()
        .success()
        .stderr(
            "Setting cli logging to 'debug,info'\n\
             [debug] channels taken from LOGCHAN_CHANNELS\n\
             [info] ready\n",
        );
}

#[test]
fn command_line_overrides_environment() {
    logchan()
        .env("LOGCHAN_CHANNELS", "Q")
        .args(["-c", "I", "ok"])
        .assert()
        .success()
        .stderr("Setting cli logging to 'info'\n[info] ok\n");
}

#[test]
fn bad_environment_channels_fail() {
    logchan()
        .env("LOGCHAN_CHANNELS", "Q")
        .arg("ignored")
        .assert()
        .code(1)
        .stderr("Failed to set cli logging: bad logger channel found: 'Q'\n");
}

#[test]
fn default_run_enables_everything() {
    logchan()
        .args(["-l", "D", "verbose", "detail"])
        .assert()
        .success()
        .stderr("[debug] verbose detail\n");
}

#[test]
fn verbose_flag_narrows_default_channels() {
    logchan()
        .args(["-vv", "-l", "I", "hidden"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    logchan()
        .args(["-vv", "-l", "W", "shown"])
        .assert()
        .success()
        .stderr("[warn] shown\n");
}

#[test]
fn list_writes_channel_table() {
    logchan()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("E  0x4000000000000000  error"))
        .stdout(predicate::str::contains("A  0xffffffffffffffff  all"));
}
