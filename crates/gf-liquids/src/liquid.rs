//! Liquid identity.

use crate::error::{LiquidError, LiquidResult};
use core::fmt;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// A liquid, identified by its display color.
///
/// The authoring layer configures vessel contents as hex color strings, so
/// color doubles as identity: two liquids are the same exactly when their
/// colors match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Liquid {
    rgb: [u8; 3],
}

/// Standard palette used by built-in parts.
pub const COLD_WATER: Liquid = Liquid::from_rgb(0x4A, 0xA0, 0xEF);
pub const HOT_WATER: Liquid = Liquid::from_rgb(0xDB, 0x00, 0x23);
pub const BEER: Liquid = Liquid::from_rgb(0xE1, 0xAC, 0x00);
pub const WORT: Liquid = Liquid::from_rgb(0xC7, 0x8A, 0x49);

impl Liquid {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Parse a `"#RRGGBB"` color; the leading `#` is optional, matching
    /// how the authoring layer stores colors.
    pub fn parse(s: &str) -> LiquidResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LiquidError::InvalidColor { got: s.to_string() });
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb(r, g, b)),
            _ => Err(LiquidError::InvalidColor { got: s.to_string() }),
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        self.rgb
    }

    /// Canonical `"#RRGGBB"` form.
    pub fn hex(self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.rgb[0], self.rgb[1], self.rgb[2]
        )
    }
}

impl fmt::Display for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            self.rgb[0], self.rgb[1], self.rgb[2]
        )
    }
}

impl fmt::Debug for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Liquid({self})")
    }
}

impl Serialize for Liquid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Liquid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Liquid::parse(&s).map_err(de::Error::custom)
    }
}
