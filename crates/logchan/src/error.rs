//! crates/logchan/src/error.rs
//! Error types surfaced by channel parsing and registry construction.

use crate::level::Level;

/// Error returned when a channel-key string cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// A character in the input has no registered channel.
    #[error("bad logger channel found: '{key}'")]
    UnknownKey {
        /// The offending character.
        key: char,
    },
}

impl ChannelError {
    /// The character that failed to resolve.
    #[must_use]
    pub const fn key(&self) -> char {
        match self {
            Self::UnknownKey { key } => *key,
        }
    }
}

/// Error returned by [`Registry::strict`](crate::Registry::strict) when a
/// custom channel would collide with, or malform, the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The channel's level does not have exactly one bit set.
    #[error("channel '{}' must own exactly one bit, got {level}", char::from(*.key))]
    NotSingleBit {
        /// Key of the rejected channel.
        key: u8,
        /// Level of the rejected channel.
        level: Level,
    },
    /// Another channel already uses this key.
    #[error("channel key '{}' is already registered", char::from(*.key))]
    DuplicateKey {
        /// Key of the rejected channel.
        key: u8,
        /// Level of the rejected channel.
        level: Level,
    },
    /// Another channel already owns this bit.
    #[error("channel '{}' reuses level {level}", char::from(*.key))]
    DuplicateLevel {
        /// Key of the rejected channel.
        key: u8,
        /// Level of the rejected channel.
        level: Level,
    },
    /// The key is outside ASCII, so no key string can select the channel.
    #[error("channel key 0x{key:02x} is not ASCII")]
    NonAsciiKey {
        /// Key of the rejected channel.
        key: u8,
        /// Level of the rejected channel.
        level: Level,
    },
}

/// Error returned when a mask cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid level mask: '{input}'")]
pub struct LevelParseError {
    /// The rejected input, trimmed.
    pub input: String,
}

/// Error returned by [`LoggerConfig::build`](crate::LoggerConfig::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Strict registry validation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The configured enabled-channel string did not decode.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_message_names_the_character() {
        let error = ChannelError::UnknownKey { key: 'X' };
        assert_eq!(error.to_string(), "bad logger channel found: 'X'");
        assert_eq!(error.key(), 'X');
    }

    #[test]
    fn registry_errors_render_keys_as_characters() {
        let error = RegistryError::DuplicateKey {
            key: b'D',
            level: Level::from_bits(1),
        };
        assert_eq!(error.to_string(), "channel key 'D' is already registered");

        let error = RegistryError::NotSingleBit {
            key: b'x',
            level: Level::from_bits(3),
        };
        assert_eq!(
            error.to_string(),
            "channel 'x' must own exactly one bit, got 0x0000000000000003"
        );

        let error = RegistryError::DuplicateLevel {
            key: b'q',
            level: Level::INFO,
        };
        assert_eq!(
            error.to_string(),
            "channel 'q' reuses level 0x1000000000000000"
        );

        let error = RegistryError::NonAsciiKey {
            key: 0xE9,
            level: Level::from_bits(1),
        };
        assert_eq!(error.to_string(), "channel key 0xe9 is not ASCII");
    }

    #[test]
    fn config_error_is_transparent() {
        let error = ConfigError::from(ChannelError::UnknownKey { key: '?' });
        assert_eq!(error.to_string(), "bad logger channel found: '?'");
    }
}
