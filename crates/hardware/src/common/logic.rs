//! Resolvable and unresolvable pin values.
//!
//! A pin that has not been driven since power-up reads `X`. The model keeps
//! that distinction all the way to the pins so a harness can tell "low" from
//! "not yet defined", the same way an HDL simulator reports it:
//! 1. **Logic:** a single bit that is `0`, `1` or `X`.
//! 2. **Bits:** a fixed-width vector (up to 16 bits) with a per-bit unknown mask.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single resolved-or-unknown logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Logic {
    /// Driven low.
    #[serde(rename = "0")]
    Zero,
    /// Driven high.
    #[serde(rename = "1")]
    One,
    /// Undefined (not yet driven or not resolvable).
    #[serde(rename = "X", alias = "x")]
    X,
}

impl Logic {
    /// Converts a boolean into a driven level.
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::One } else { Self::Zero }
    }

    /// Returns the boolean level, or `None` for `X`.
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::X => None,
        }
    }

    /// Returns `true` when the level is `0` or `1`.
    pub const fn is_resolvable(self) -> bool {
        !matches!(self, Self::X)
    }

    const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::X => 'X',
        }
    }
}

impl From<bool> for Logic {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when parsing a [`Bits`] literal fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBitsError {
    /// The literal had no digits or more than [`Bits::MAX_WIDTH`].
    #[error("bit literal width {0} is outside 1..=16")]
    Width(usize),
    /// The literal contained something other than `0`, `1`, `X`, `x`, `Z`, `z`.
    #[error("invalid bit character {0:?}")]
    Char(char),
}

/// A fixed-width bit vector where each bit may be unknown.
///
/// Bits set in `unknown` read as `X`; the corresponding bits of `value` are
/// always kept at zero so two vectors with the same visible pattern compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits {
    width: u32,
    value: u16,
    unknown: u16,
}

impl Bits {
    /// Widest vector the model ever drives (the indicator bus is 15 bits).
    pub const MAX_WIDTH: u32 = 16;

    const fn mask(width: u32) -> u16 {
        if width >= Self::MAX_WIDTH {
            u16::MAX
        } else {
            (1u16 << width) - 1
        }
    }

    /// Creates a fully resolved vector; `value` is truncated to `width`.
    pub const fn known(width: u32, value: u16) -> Self {
        Self {
            width,
            value: value & Self::mask(width),
            unknown: 0,
        }
    }

    /// Creates a vector whose bits are all `X`.
    pub const fn unknown(width: u32) -> Self {
        Self {
            width,
            value: 0,
            unknown: Self::mask(width),
        }
    }

    /// Number of bits in the vector.
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Returns bit `index`; bits beyond the width read `X`.
    pub const fn bit(self, index: u32) -> Logic {
        if index >= self.width || (self.unknown >> index) & 1 == 1 {
            Logic::X
        } else if (self.value >> index) & 1 == 1 {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns a copy with bit `index` replaced. Out-of-range indices are ignored.
    #[must_use]
    pub const fn with_bit(self, index: u32, level: Logic) -> Self {
        if index >= self.width {
            return self;
        }
        let bit = 1u16 << index;
        let (value, unknown) = match level {
            Logic::Zero => (self.value & !bit, self.unknown & !bit),
            Logic::One => (self.value | bit, self.unknown & !bit),
            Logic::X => (self.value & !bit, self.unknown | bit),
        };
        Self {
            width: self.width,
            value,
            unknown,
        }
    }

    /// `true` when no bit is `X`.
    pub const fn is_resolvable(self) -> bool {
        self.unknown == 0
    }

    /// Integer value, available only when every bit is resolved.
    pub const fn to_u16(self) -> Option<u16> {
        if self.is_resolvable() {
            Some(self.value)
        } else {
            None
        }
    }

    /// Resolved bits with every `X` read as zero.
    pub const fn value_bits(self) -> u16 {
        self.value
    }

    /// Mask of the bits that are `X`.
    pub const fn unknown_mask(self) -> u16 {
        self.unknown
    }
}

impl fmt::Display for Bits {
    /// Formats MSB first, one character per bit (e.g. `1X`, `0000XXXX`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..self.width).rev() {
            write!(f, "{}", self.bit(index))?;
        }
        Ok(())
    }
}

impl FromStr for Bits {
    type Err = ParseBitsError;

    /// Parses an MSB-first literal such as `"1X"` or `"00000001"`.
    ///
    /// High-impedance `Z` reads back as unknown; `_` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<char> = s.chars().filter(|c| *c != '_').collect();
        if digits.is_empty() || digits.len() > Self::MAX_WIDTH as usize {
            return Err(ParseBitsError::Width(digits.len()));
        }
        let width = digits.len() as u32;
        let mut bits = Self::known(width, 0);
        for (pos, c) in digits.iter().enumerate() {
            let level = match c {
                '0' => Logic::Zero,
                '1' => Logic::One,
                'x' | 'X' | 'z' | 'Z' => Logic::X,
                other => return Err(ParseBitsError::Char(*other)),
            };
            bits = bits.with_bit(width - 1 - pos as u32, level);
        }
        Ok(bits)
    }
}

impl Serialize for Bits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}
