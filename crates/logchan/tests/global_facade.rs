//! Integration tests for the process-wide logger.
//!
//! The global logger can be installed once per process, so every test here
//! shares one capture sink and runs serially.

use std::sync::{Arc, OnceLock};

use logchan::{ChannelError, Level, Logger, global, glogf};
use logchan_sink::CaptureSink;
use serial_test::serial;

fn shared_sink() -> &'static Arc<CaptureSink> {
    static SINK: OnceLock<Arc<CaptureSink>> = OnceLock::new();
    SINK.get_or_init(|| {
        let sink = Arc::new(CaptureSink::new());
        let logger = Logger::with_sink([], Level::ALL, Arc::clone(&sink));
        assert!(global::install(logger).is_ok(), "first install succeeds");
        sink
    })
}

fn reset() -> &'static Arc<CaptureSink> {
    let sink = shared_sink();
    global::logger().set_level(Level::ALL);
    sink.drain();
    sink
}

#[test]
#[serial]
fn second_install_is_rejected() {
    reset();
    let rejected = global::install(Logger::default());
    assert!(rejected.is_err());
}

#[test]
#[serial]
fn free_functions_drive_the_global_logger() {
    let sink = reset();

    assert_eq!(global::set_channels("WE"), Ok("warn,error".to_string()));
    assert_eq!(global::level(), Level::WARN | Level::ERROR);
    assert!(global::at_level(Level::WARN));
    assert!(!global::at_level(Level::INFO));

    assert!(global::println(Level::WARN, &[&"low", &"space"]));
    assert!(!global::print(Level::INFO, &[&"dropped"]));
    assert!(global::print(Level::ERROR, &[&"code=", &7]));
    assert!(glogf!(Level::ERROR, "failed after {} tries", 3));

    assert_eq!(
        sink.drain(),
        vec![
            "[warn] low space".to_string(),
            "[error] code=7".to_string(),
            "[error] failed after 3 tries".to_string(),
        ]
    );
}

#[test]
#[serial]
fn global_labels_use_builtin_channels() {
    reset();
    assert_eq!(global::level_to_string(Level::INFO | Level::FATAL), "info,fatal");
    assert_eq!(global::level_to_prefix(Level::DEBUG), "[debug] ");
    assert_eq!(global::level_to_keys(Level::INFO | Level::FATAL), "IF");
}

#[test]
#[serial]
fn global_rejects_unknown_keys() {
    let sink = reset();
    assert_eq!(
        global::set_channels("Z"),
        Err(ChannelError::UnknownKey { key: 'Z' })
    );
    assert_eq!(global::level(), Level::ALL);

    assert!(!global::set_channels_ez("global", "Z", false));
    assert_eq!(
        sink.drain(),
        vec!["Failed to set global logging: bad logger channel found: 'Z'".to_string()]
    );
}

#[test]
#[serial]
fn global_printf_formats_arguments() {
    let sink = reset();
    global::set_channels("D").expect("built-in key");
    assert!(global::printf(Level::DEBUG, format_args!("{:>4}|", 12)));
    assert_eq!(sink.drain(), vec!["[debug]   12|".to_string()]);
}
