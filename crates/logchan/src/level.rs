//! crates/logchan/src/level.rs
//! The 64-bit channel mask.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use std::str::FromStr;

use crate::error::LevelParseError;

/// A 64-bit mask in which every set bit enables one channel.
///
/// Ordinary channels own exactly one bit; masks combine channels with `|`.
/// The four highest bits plus bit 59 are reserved for the built-in
/// severities; bits 0 through 58 are free for custom channels.
///
/// # Examples
///
/// ```
/// use logchan::Level;
///
/// let mask = Level::DEBUG | Level::ERROR;
/// assert!(mask.contains(Level::ERROR));
/// assert!(!mask.intersects(Level::INFO));
/// assert_eq!(mask.count(), 2);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Level(u64);

impl Level {
    /// The empty mask.
    pub const NONE: Self = Self(0x0);
    /// Debug channel (bit 59).
    pub const DEBUG: Self = Self(0x0800_0000_0000_0000);
    /// Info channel (bit 60).
    pub const INFO: Self = Self(0x1000_0000_0000_0000);
    /// Warn channel (bit 61).
    pub const WARN: Self = Self(0x2000_0000_0000_0000);
    /// Error channel (bit 62).
    pub const ERROR: Self = Self(0x4000_0000_0000_0000);
    /// Fatal channel (bit 63).
    pub const FATAL: Self = Self(0x8000_0000_0000_0000);
    /// Every bit set.
    pub const ALL: Self = Self(u64::MAX);

    /// Union of the five built-in severity bits.
    pub const SEVERITY_MASK: Self =
        Self(Self::DEBUG.0 | Self::INFO.0 | Self::WARN.0 | Self::ERROR.0 | Self::FATAL.0);
    /// Bits left free for custom channels.
    pub const CUSTOM_MASK: Self = Self(!Self::SEVERITY_MASK.0);

    /// Wraps raw mask bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw mask bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns the mask with only bit `index` set, or `None` past bit 63.
    #[must_use]
    pub const fn bit(index: u32) -> Option<Self> {
        if index < u64::BITS {
            Some(Self(1 << index))
        } else {
            None
        }
    }

    /// `true` when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` when `self` and `other` share at least one bit.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `true` when every bit of `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` when exactly one bit is set.
    #[must_use]
    pub const fn is_single_bit(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Number of set bits.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// `self` with every bit of `other` cleared.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl From<u64> for Level {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Level> for u64 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl BitOr for Level {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Level {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Level {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Level {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Level {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({:#018x})", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl fmt::LowerHex for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    /// Parses a decimal mask or a `0x`-prefixed hexadecimal mask.
    /// Underscores are accepted as digit separators.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let cleaned: String = trimmed.chars().filter(|&c| c != '_').collect();
        let parsed = match cleaned
            .strip_prefix("0x")
            .or_else(|| cleaned.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => cleaned.parse::<u64>(),
        };
        parsed.map(Self).map_err(|_| LevelParseError {
            input: trimmed.to_owned(),
        })
    }
}
