//! crates/logchan/src/registry.rs
//! The ordered channel table and its key/level indices.

use std::collections::HashMap;
use std::slice;

use crate::channel::{Channel, DEFAULT_CHANNELS};
use crate::error::{ChannelError, RegistryError};
use crate::level::Level;

/// Immutable table of every channel a logger knows about.
///
/// The table keeps channels in registration order: the built-in channels of
/// [`DEFAULT_CHANNELS`] first, then the caller's custom channels in the order
/// supplied. That order drives [`decompose`](Self::decompose). Two indices
/// resolve a key byte or an exact level to a channel; when a custom channel
/// reuses a key or level, the custom entry wins the index while both entries
/// stay in the ordered table.
///
/// # Examples
///
/// ```
/// use logchan::{Channel, Level, Registry};
///
/// let registry = Registry::new([Channel::new(Level::from_bits(0x1), b'X', "custom")]);
/// assert_eq!(registry.lookup_by_key(b'X').map(Channel::description), Some("custom"));
/// assert_eq!(registry.parse_keys("XE"), Ok(Level::from_bits(0x1) | Level::ERROR));
/// assert_eq!(registry.decompose(Level::DEBUG | Level::from_bits(0x1)).label(), "debug,custom");
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    channels: Vec<Channel>,
    by_key: HashMap<u8, usize>,
    by_level: HashMap<Level, usize>,
}

impl Registry {
    /// Builds a registry from the built-in channels followed by `custom`.
    ///
    /// Collisions with earlier channels are accepted: the later channel takes
    /// over the key or level index entry. Use [`strict`](Self::strict) to
    /// reject them instead.
    pub fn new<I>(custom: I) -> Self
    where
        I: IntoIterator<Item = Channel>,
    {
        let mut registry = Self::seeded();
        for channel in custom {
            registry.push(channel);
        }
        registry
    }

    /// Builds a registry holding only the built-in channels.
    #[must_use]
    pub fn defaults() -> Self {
        Self::seeded()
    }

    /// Builds a registry, rejecting custom channels that do not own exactly
    /// one previously unused bit and one previously unused ASCII key.
    pub fn strict<I>(custom: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Channel>,
    {
        let mut registry = Self::seeded();
        for channel in custom {
            let key = channel.key();
            let level = channel.level();
            if !key.is_ascii() {
                return Err(RegistryError::NonAsciiKey { key, level });
            }
            if !level.is_single_bit() {
                return Err(RegistryError::NotSingleBit { key, level });
            }
            if registry.by_key.contains_key(&key) {
                return Err(RegistryError::DuplicateKey { key, level });
            }
            if registry.by_level.contains_key(&level) {
                return Err(RegistryError::DuplicateLevel { key, level });
            }
            registry.push(channel);
        }
        Ok(registry)
    }

    fn seeded() -> Self {
        let mut registry = Self {
            channels: Vec::with_capacity(DEFAULT_CHANNELS.len()),
            by_key: HashMap::with_capacity(DEFAULT_CHANNELS.len()),
            by_level: HashMap::with_capacity(DEFAULT_CHANNELS.len()),
        };
        for channel in DEFAULT_CHANNELS {
            registry.push(channel);
        }
        registry
    }

    fn push(&mut self, channel: Channel) {
        let position = self.channels.len();
        let key = channel.key();
        let level = channel.level();
        self.channels.push(channel);

        if let Some(previous) = self.by_key.insert(key, position) {
            tracing::debug!(
                key = %char::from(key),
                shadowed = self.channels[previous].description(),
                by = self.channels[position].description(),
                "channel key shadowed"
            );
        }
        if let Some(previous) = self.by_level.insert(level, position) {
            tracing::debug!(
                %level,
                shadowed = self.channels[previous].description(),
                by = self.channels[position].description(),
                "channel level shadowed"
            );
        }
    }

    /// Resolves a key byte to its channel.
    #[must_use]
    pub fn lookup_by_key(&self, key: u8) -> Option<&Channel> {
        self.by_key.get(&key).map(|&index| &self.channels[index])
    }

    /// Resolves an exact level (single bit or sentinel) to its channel.
    #[must_use]
    pub fn lookup_by_level(&self, level: Level) -> Option<&Channel> {
        self.by_level.get(&level).map(|&index| &self.channels[index])
    }

    /// Returns the first channel, in registry order, with the given description.
    #[must_use]
    pub fn lookup_by_description(&self, description: &str) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|channel| channel.description() == description)
    }

    /// The ordered channel table.
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// The caller-supplied channels, in registration order.
    #[must_use]
    pub fn custom_channels(&self) -> &[Channel] {
        &self.channels[DEFAULT_CHANNELS.len()..]
    }

    /// Iterates the ordered channel table.
    pub fn iter(&self) -> slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Number of channels, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`: the built-in channels are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Decodes a string of channel keys into the union of their levels.
    ///
    /// Each character must be an ASCII key registered in the table. The
    /// first character that is not aborts the decode. The empty string
    /// decodes to [`Level::NONE`].
    pub fn parse_keys(&self, keys: &str) -> Result<Level, ChannelError> {
        keys.chars().try_fold(Level::NONE, |mask, key| {
            u8::try_from(key)
                .ok()
                .filter(u8::is_ascii)
                .and_then(|byte| self.lookup_by_key(byte))
                .map(|channel| mask | channel.level())
                .ok_or(ChannelError::UnknownKey { key })
        })
    }

    /// Splits `level` into the channels that describe it.
    ///
    /// A mask equal to a registered level is described by the first channel,
    /// in registry order, owning exactly that level. Shadowing in the level
    /// index does not change labels. Any other non-empty mask is walked in
    /// registry order: each channel whose bits all lie within the bits not
    /// yet described is reported and its bits are removed from the
    /// remainder, so no bit is reported twice. The walk stops once the
    /// remainder is empty; bits no channel covers stay in
    /// [`Decomposition::remainder`].
    #[must_use]
    pub fn decompose(&self, level: Level) -> Decomposition<'_> {
        if level.is_empty() {
            return Decomposition::empty();
        }

        if let Some(channel) = self.channels.iter().find(|channel| channel.level() == level) {
            return Decomposition {
                channels: vec![channel],
                consumed: level,
                remainder: Level::NONE,
            };
        }

        let mut channels = Vec::new();
        let mut remainder = level;
        for channel in &self.channels {
            if remainder.is_empty() {
                break;
            }
            let bits = channel.level();
            if !bits.is_empty() && remainder.contains(bits) {
                channels.push(channel);
                remainder = remainder.without(bits);
            }
        }

        Decomposition {
            channels,
            consumed: level.without(remainder),
            remainder,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Channel;
    type IntoIter = slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of [`Registry::decompose`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition<'a> {
    channels: Vec<&'a Channel>,
    consumed: Level,
    remainder: Level,
}

impl<'a> Decomposition<'a> {
    const fn empty() -> Self {
        Self {
            channels: Vec::new(),
            consumed: Level::NONE,
            remainder: Level::NONE,
        }
    }

    /// Matched channels in registry order.
    #[must_use]
    pub fn channels(&self) -> &[&'a Channel] {
        &self.channels
    }

    /// Bits of the input described by the matched channels.
    #[must_use]
    pub const fn consumed(&self) -> Level {
        self.consumed
    }

    /// Bits of the input no registered channel describes.
    #[must_use]
    pub const fn remainder(&self) -> Level {
        self.remainder
    }

    /// `true` when no channel matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Descriptions of the matched channels.
    pub fn labels(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.channels.iter().map(|&channel| channel.description())
    }

    /// Descriptions joined with `,`; empty when nothing matched.
    #[must_use]
    pub fn label(&self) -> String {
        self.labels().collect::<Vec<_>>().join(",")
    }

    /// `"[label] "`, or the empty string when nothing matched.
    #[must_use]
    pub fn prefix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.label())
        }
    }

    /// Keys of the matched channels, in the same order as [`label`](Self::label).
    #[must_use]
    pub fn keys(&self) -> String {
        self.channels.iter().map(|channel| channel.key_char()).collect()
    }
}
