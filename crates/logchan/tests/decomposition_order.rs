//! Integration tests for mask decomposition and prefixes.

use logchan::{Channel, Level, Logger, Registry};

const AUDIT: Level = Level::from_bits(0x1);
const QUEUE: Level = Level::from_bits(0x2);

fn registry() -> Registry {
    Registry::new([
        Channel::new(AUDIT, b'X', "audit"),
        Channel::new(QUEUE, b'Q', "queue"),
    ])
}

/// Labels follow registry order, not bit order.
#[test]
fn labels_follow_registry_order() {
    let registry = registry();
    let mask = QUEUE | Level::FATAL | AUDIT | Level::DEBUG;
    let decomposition = registry.decompose(mask);
    assert_eq!(decomposition.label(), "debug,fatal,audit,queue");
    assert_eq!(decomposition.keys(), "DFXQ");
    assert_eq!(decomposition.consumed(), mask);
    assert_eq!(decomposition.remainder(), Level::NONE);
}

/// Custom channels registered in reverse bit order keep their order.
#[test]
fn custom_order_is_registration_order() {
    let registry = Registry::new([
        Channel::new(QUEUE, b'Q', "queue"),
        Channel::new(AUDIT, b'X', "audit"),
    ]);
    assert_eq!(registry.decompose(AUDIT | QUEUE).label(), "queue,audit");
}

/// The zero mask has no label and no prefix.
#[test]
fn zero_mask_has_no_prefix() {
    let logger = Logger::default();
    assert_eq!(logger.level_to_string(Level::NONE), "");
    assert_eq!(logger.level_to_prefix(Level::NONE), "");
    assert_eq!(logger.level_to_keys(Level::NONE), "");
}

/// The full mask is described by the sentinel only.
#[test]
fn full_mask_is_all() {
    let logger = Logger::default();
    assert_eq!(logger.level_to_string(Level::ALL), "all");
    assert_eq!(logger.level_to_prefix(Level::ALL), "[all] ");
    assert_eq!(logger.level_to_keys(Level::ALL), "A");
}

/// Without the debug bit the full mask falls back to the walk.
#[test]
fn full_mask_minus_debug_lists_remaining_severities() {
    let registry = Registry::defaults();
    let decomposition = registry.decompose(Level::ALL.without(Level::DEBUG));
    assert_eq!(decomposition.label(), "info,warn,error,fatal");
    assert_eq!(decomposition.remainder(), Level::CUSTOM_MASK);
}

/// Shadowing changes the index but both channels stay in the table.
#[test]
fn shadowed_bit_keeps_both_channels() {
    let registry = Registry::new([Channel::new(Level::DEBUG, b'd', "trace")]);
    let descriptions: Vec<&str> = registry.iter().map(Channel::description).collect();
    assert!(descriptions.contains(&"debug"));
    assert!(descriptions.contains(&"trace"));
    assert_eq!(
        registry.lookup_by_level(Level::DEBUG).map(Channel::description),
        Some("trace")
    );
    assert_eq!(
        registry.lookup_by_key(b'D').map(Channel::description),
        Some("debug")
    );
}

/// Prefixes wrap the label in brackets followed by one space.
#[test]
fn prefix_format() {
    let logger = Logger::with_parts(
        registry(),
        Level::ALL,
        std::sync::Arc::new(logchan_sink::CaptureSink::new()),
    );
    assert_eq!(logger.level_to_prefix(Level::WARN | AUDIT), "[warn,audit] ");
}
