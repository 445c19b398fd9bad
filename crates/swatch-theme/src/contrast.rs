// SPDX-License-Identifier: MIT

//! WCAG contrast ratio and accessibility classification.
//!
//! - Body text: AA at 4.5:1, AAA at 7:1
//! - Large text and graphical objects: 3:1
//!
//! Readability is judged in sRGB relative luminance (the WCAG definition),
//! not OKLCH lightness. The two disagree most for saturated blues and
//! yellows, which is why the generator re-checks after sampling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::HexColor;

use crate::error::ThemeError;
use crate::palette::{Palette, Role};

/// Minimum ratio for large text and non-text UI components.
pub const LARGE_TEXT_MIN: f64 = 3.0;

/// Minimum ratio for body text at level AA.
pub const AA_MIN: f64 = 4.5;

/// Minimum ratio for body text at level AAA.
pub const AAA_MIN: f64 = 7.0;

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: HexColor) -> f64 {
    let lin = color.to_srgb().to_linear();
    0.2126f64.mul_add(lin.r, 0.7152f64.mul_add(lin.g, 0.0722 * lin.b))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is the same for either argument order and exactly 1.0 for
/// identical colors.
#[must_use]
pub fn contrast_ratio(a: HexColor, b: HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `fg` on `bg` meets `level` for body text.
#[must_use]
pub fn is_accessible(fg: HexColor, bg: HexColor, level: WcagLevel) -> bool {
    level.is_met_by(contrast_ratio(fg, bg))
}

// ---------------------------------------------------------------------------
// WcagLevel
// ---------------------------------------------------------------------------

/// WCAG conformance level for body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    /// Minimum contrast ratio for this level.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Aa => AA_MIN,
            Self::Aaa => AAA_MIN,
        }
    }

    /// Whether `ratio` meets this level. The boundary itself passes.
    #[must_use]
    pub fn is_met_by(self, ratio: f64) -> bool {
        ratio >= self.threshold()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WcagLevel {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AA" => Ok(Self::Aa),
            "AAA" => Ok(Self::Aaa),
            _ => Err(ThemeError::UnknownLevel {
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Badge shown next to a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    Fail,
}

impl Rating {
    /// ≥ 7 is AAA, ≥ 4.5 is AA, anything lower fails.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if WcagLevel::Aaa.is_met_by(ratio) {
            Self::Aaa
        } else if WcagLevel::Aa.is_met_by(ratio) {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Palette checks
// ---------------------------------------------------------------------------

/// Contrast of one foreground role against the palette background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairCheck {
    pub role: Role,
    pub ratio: f64,
    pub rating: Rating,
}

/// Check text, primary and accent against the background.
#[must_use]
pub fn check_palette(palette: &Palette) -> [PairCheck; 3] {
    [Role::Text, Role::Primary, Role::Accent].map(|role| {
        let ratio = contrast_ratio(palette.get(role), palette.background);
        PairCheck {
            role,
            ratio,
            rating: Rating::from_ratio(ratio),
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
