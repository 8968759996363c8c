//! Placeholder encoding flags and their single-digit wire form.
//!
//! Bit 0 selects percent-encoding of the substituted query, bit 1 selects
//! space-to-plus. The digit is only produced or parsed at the table boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::encode::encode;

/// How a query is encoded before it replaces `{query}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BangFormat {
    pub encode_placeholder: bool,
    pub space_to_plus: bool,
}

/// A format code outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFormat(pub u8);

impl fmt::Display for InvalidFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bang format code {} (expected 0-3)", self.0)
    }
}

impl std::error::Error for InvalidFormat {}

impl BangFormat {
    /// Query inserted verbatim.
    pub const RAW: Self = Self::new(false, false);
    /// Percent-encoded with spaces as `+`.
    pub const FULL: Self = Self::new(true, true);

    pub const fn new(encode_placeholder: bool, space_to_plus: bool) -> Self {
        Self {
            encode_placeholder,
            space_to_plus,
        }
    }

    pub const fn code(self) -> u8 {
        (self.encode_placeholder as u8) | ((self.space_to_plus as u8) << 1)
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        if code > 3 {
            return None;
        }
        Some(Self::new(code & 1 != 0, code & 2 != 0))
    }

    /// The ASCII digit stored in front of a `_b_` template.
    pub fn digit(self) -> char {
        char::from(b'0' + self.code())
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        let code = digit.to_digit(10)?;
        Self::from_code(u8::try_from(code).ok()?)
    }

    /// Encode `text` according to these flags.
    pub fn apply(self, text: &str) -> String {
        encode(text, self.encode_placeholder, self.space_to_plus)
    }
}

impl TryFrom<u8> for BangFormat {
    type Error = InvalidFormat;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(InvalidFormat(code))
    }
}

impl From<BangFormat> for u8 {
    fn from(format: BangFormat) -> Self {
        format.code()
    }
}
