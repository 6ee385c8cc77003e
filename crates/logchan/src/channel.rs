//! crates/logchan/src/channel.rs
//! Channel definitions and the built-in channel table.

use std::borrow::Cow;
use std::fmt;

use crate::level::Level;

/// Key selecting [`Level::NONE`].
pub const KEY_NONE: u8 = b'0';
/// Key selecting [`Level::DEBUG`].
pub const KEY_DEBUG: u8 = b'D';
/// Key selecting [`Level::INFO`].
pub const KEY_INFO: u8 = b'I';
/// Key selecting [`Level::WARN`].
pub const KEY_WARN: u8 = b'W';
/// Key selecting [`Level::ERROR`].
pub const KEY_ERROR: u8 = b'E';
/// Key selecting [`Level::FATAL`].
pub const KEY_FATAL: u8 = b'F';
/// Key selecting [`Level::ALL`].
pub const KEY_ALL: u8 = b'A';

/// A named logging category addressed by one bit and one key byte.
///
/// # Examples
///
/// ```
/// use logchan::{Channel, Level};
///
/// let audit = Channel::new(Level::from_bits(0x1), b'X', "audit");
/// assert_eq!(audit.key_char(), 'X');
/// assert_eq!(audit.to_string(), "X 0x0000000000000001 audit");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    level: Level,
    #[cfg_attr(feature = "serde", serde(with = "key_as_char"))]
    key: u8,
    description: Cow<'static, str>,
}

impl Channel {
    /// Creates a channel.
    ///
    /// Key strings are decoded one character at a time and only ASCII
    /// characters resolve, so a channel with a non-ASCII `key` can be
    /// registered but never selected. [`Registry::strict`](crate::Registry::strict)
    /// rejects such keys.
    #[must_use]
    pub fn new(level: Level, key: u8, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            level,
            key,
            description: description.into(),
        }
    }

    const fn builtin(level: Level, key: u8, description: &'static str) -> Self {
        Self {
            level,
            key,
            description: Cow::Borrowed(description),
        }
    }

    /// The channel's bit (or sentinel mask).
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The selector byte used in channel-key strings.
    #[must_use]
    pub const fn key(&self) -> u8 {
        self.key
    }

    /// The selector byte as a character.
    #[must_use]
    pub const fn key_char(&self) -> char {
        self.key as char
    }

    /// The label used when the channel appears in a decomposed mask.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key_char(), self.level, self.description)
    }
}

/// The built-in channels in registry order.
///
/// The order is part of the decomposition contract: severities are reported
/// before `all`, and `none` never matches because it owns no bits.
pub const DEFAULT_CHANNELS: [Channel; 7] = [
    Channel::builtin(Level::NONE, KEY_NONE, "none"),
    Channel::builtin(Level::DEBUG, KEY_DEBUG, "debug"),
    Channel::builtin(Level::INFO, KEY_INFO, "info"),
    Channel::builtin(Level::WARN, KEY_WARN, "warn"),
    Channel::builtin(Level::ERROR, KEY_ERROR, "error"),
    Channel::builtin(Level::FATAL, KEY_FATAL, "fatal"),
    Channel::builtin(Level::ALL, KEY_ALL, "all"),
];

#[cfg(feature = "serde")]
mod key_as_char {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(key: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(char::from(*key))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let key = char::deserialize(deserializer)?;
        u8::try_from(key)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| D::Error::custom(format!("channel key '{key}' is not ASCII")))
    }
}
