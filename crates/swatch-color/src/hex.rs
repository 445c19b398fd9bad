// SPDX-License-Identifier: MIT
//
// Hex color values, the wire format at the edge of the color math.
//
// A `HexColor` is three 8-bit sRGB channels. Input is `#RRGGBB` with an
// optional `#`, case-insensitive; output is canonical uppercase. Parsing
// is strict by default. The lenient variant reproduces the old "malformed
// means black" behaviour for callers that need it, and says so in the log.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{Oklch, Srgb, hex_to_oklch};
use crate::error::ColorError;

/// An opaque 24-bit sRGB color, displayed as `#RRGGBB`.
///
/// ```
/// use swatch_color::HexColor;
///
/// let indigo: HexColor = "#2f27ce".parse().unwrap();
/// assert_eq!(indigo.to_string(), "#2F27CE");
/// assert_eq!(format!("{indigo:x}"), "#2f27ce");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// Pure black, `#000000`. Also the lenient parser's fallback.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white, `#FFFFFF`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`, any letter case.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] when the input is not
    /// exactly six hex digits after an optional `#`.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        parse_rrggbb(s).ok_or_else(|| ColorError::InvalidColorFormat {
            input: s.to_owned(),
        })
    }

    /// Parse like [`parse`](Self::parse), but fall back to black on
    /// malformed input instead of failing.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        parse_rrggbb(s).unwrap_or_else(|| {
            warn!(input = s, "malformed hex color, falling back to black");
            Self::BLACK
        })
    }

    /// The three channels as `(r, g, b)`.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Normalize the channels to gamma-encoded sRGB in `[0, 1]`.
    #[must_use]
    pub fn to_srgb(self) -> Srgb {
        Srgb::new(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Quantize gamma-encoded sRGB to 8-bit channels, clamping first and
    /// rounding half up.
    #[must_use]
    pub fn from_srgb(rgb: Srgb) -> Self {
        Self::new(to_u8(rgb.r), to_u8(rgb.g), to_u8(rgb.b))
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        hex_to_oklch(self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn parse_rrggbb(s: &str) -> Option<HexColor> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(HexColor::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a channel in `[0, 1]` to `0..=255`, rounding half up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.clamp(0.0, 1.0).mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}
