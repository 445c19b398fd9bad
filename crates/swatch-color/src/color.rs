// SPDX-License-Identifier: MIT
//
// swatch-color conversions — sRGB, linear RGB, Oklab and OKLCH.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   HexColor ↔ sRGB ↔ Linear sRGB ↔ LMS ↔ Oklab ↔ OKLCH
//
// Everything runs in f64: the palette engine compares contrast ratios
// against hard thresholds, and hex round-trips must land on the same byte.
// OKLCH values outside the sRGB gamut are clamped per channel on the way
// out; `oklch_to_rgb_checked` reports when that happened.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hex::HexColor;
use crate::matrix::{LMS_TO_OKLAB, LMS_TO_RGB, OKLAB_TO_LMS, RGB_TO_LMS, transform};

/// Below this chroma a color is treated as achromatic and reports hue 0.
///
/// Grays come out of the matrices with chroma around 1e-8 and a hue that
/// is pure rounding noise.
const ACHROMATIC_CHROMA: f64 = 1e-6;

// ─── Value types ─────────────────────────────────────────────────────────────

/// Gamma-encoded sRGB, channels nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Remove the sRGB transfer curve from each channel.
    #[must_use]
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// Clamp each channel into `[0, 1]`.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Whether every channel already lies in `[0, 1]`.
    #[must_use]
    pub fn in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

/// Linear-light sRGB (gamma removed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Apply the sRGB transfer curve to each channel. No clamping.
    #[must_use]
    pub fn to_srgb(self) -> Srgb {
        Srgb::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }

    /// Linear sRGB → LMS → cube root → Oklab.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let [l, m, s] = transform(&RGB_TO_LMS, [self.r, self.g, self.b]);
        // f64::cbrt keeps the sign, so slightly negative LMS from
        // out-of-gamut input stays on the right side of zero.
        let [l_ok, a, b] = transform(&LMS_TO_OKLAB, [l.cbrt(), m.cbrt(), s.cbrt()]);
        Oklab::new(l_ok, a, b)
    }
}

/// Perceptually uniform Cartesian coordinates.
///
/// `l` runs from 0 (black) to 1 (white); `a` is green–red and `b` is
/// blue–yellow, both small in practice (|a|, |b| < 0.4 inside sRGB).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Oklab → cube-rooted LMS → cube → linear sRGB. Not clamped.
    #[must_use]
    pub fn to_linear_rgb(self) -> LinearRgb {
        let [l_, m_, s_] = transform(&OKLAB_TO_LMS, [self.l, self.a, self.b]);
        let [r, g, b] = transform(&LMS_TO_RGB, [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_]);
        LinearRgb::new(r, g, b)
    }

    /// Cartesian → polar.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let h = if c < ACHROMATIC_CHROMA {
            0.0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch::new(self.l, c, h)
    }
}

/// A color in OKLCH: lightness, chroma, hue.
///
/// OKLCH is the cylindrical form of Oklab. Equal numeric steps in `l`
/// look like equal steps in brightness, and moving `l` leaves the
/// perceived hue alone, which is what the palette engine relies on when
/// it flips a palette between light and dark.
///
/// ```
/// use swatch_color::{HexColor, Oklch};
///
/// let indigo = Oklch::new(0.43, 0.24, 272.0);
/// let hex = indigo.to_hex();
/// let back = hex.to_oklch();
/// assert!((back.l - 0.43).abs() < 0.01);
/// assert_eq!(Oklch::new(1.0, 0.0, 0.0).to_hex(), HexColor::WHITE);
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma: 0.0 (gray) upward. Unbounded in theory, sRGB tops out
    /// around 0.37.
    pub c: f64,

    /// Hue angle in degrees, `[0, 360)`.
    pub h: f64,
}

impl Oklch {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Polar → Cartesian.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h.to_radians();
        Oklab::new(self.l, self.c * h_rad.cos(), self.c * h_rad.sin())
    }

    /// Same lightness and chroma at a different hue (normalized).
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Same hue and chroma at a different lightness.
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Whether the color is effectively gray.
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_CHROMA
    }

    /// Whether this color converts to sRGB without clamping.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        !oklch_to_rgb_checked(self).was_clamped
    }

    #[must_use]
    pub fn to_hex(self) -> HexColor {
        oklch_to_hex(self)
    }
}

impl fmt::Debug for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.2})", self.l, self.c, self.h)
    }
}

/// Result of an OKLCH → sRGB conversion with the clamping made visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutMapped {
    /// Displayable sRGB, every channel in `[0, 1]`.
    pub rgb: Srgb,
    /// Whether any channel had to be clamped to get there.
    pub was_clamped: bool,
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range `[0, 360)`.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-14 % 360 + 360 rounds to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// Absolute hue difference along the shorter arc, in `[0, 180]`.
#[inline]
#[must_use]
pub fn hue_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// sRGB uses a piecewise transfer function: a short linear segment near
// black and a 2.4 power curve above it.

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert gamma-encoded sRGB → OKLCH.
#[must_use]
pub fn rgb_to_oklch(rgb: Srgb) -> Oklch {
    rgb.to_linear().to_oklab().to_oklch()
}

/// Convert OKLCH → sRGB, reporting whether the result had to be clamped.
#[must_use]
pub fn oklch_to_rgb_checked(color: Oklch) -> GamutMapped {
    let raw = color.to_oklab().to_linear_rgb().to_srgb();
    // NaN (from a NaN input) fails in_gamut and clamps to NaN; from_srgb
    // later maps it to 0.
    GamutMapped {
        rgb: raw.clamped(),
        was_clamped: !raw.in_gamut(),
    }
}

/// Convert OKLCH → displayable sRGB, clamping out-of-gamut channels.
#[must_use]
pub fn oklch_to_rgb(color: Oklch) -> Srgb {
    oklch_to_rgb_checked(color).rgb
}

/// Convert a hex color to OKLCH.
#[must_use]
pub fn hex_to_oklch(hex: HexColor) -> Oklch {
    rgb_to_oklch(hex.to_srgb())
}

/// Convert OKLCH to the nearest hex color (clamped, channels rounded).
#[must_use]
pub fn oklch_to_hex(color: Oklch) -> HexColor {
    HexColor::from_srgb(oklch_to_rgb(color))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // Helper: assert hex channels are within ±1 of each other.
    fn assert_hex_close(actual: HexColor, expected: HexColor) {
        let close = |a: u8, e: u8| (i16::from(a) - i16::from(e)).unsigned_abs() <= 1;
        assert!(
            close(actual.r, expected.r) && close(actual.g, expected.g) && close(actual.b, expected.b),
            "hex mismatch: got {actual}, expected {expected}"
        );
    }

    // ── Transfer curve ───────────────────────────────────────────────────

    #[test]
    fn transfer_curve_endpoints() {
        assert!(approx_eq(srgb_to_linear(0.0), 0.0, 1e-12));
        assert!(approx_eq(srgb_to_linear(1.0), 1.0, 1e-12));
        assert!(approx_eq(linear_to_srgb(0.0), 0.0, 1e-12));
        assert!(approx_eq(linear_to_srgb(1.0), 1.0, 1e-12));
    }

    #[test]
    fn transfer_curve_linear_segment() {
        assert!(approx_eq(srgb_to_linear(0.04), 0.04 / 12.92, 1e-15));
        assert!(approx_eq(linear_to_srgb(0.003), 0.003 * 12.92, 1e-15));
    }

    #[test]
    fn transfer_curve_is_invertible() {
        for i in 0..=100 {
            let c = f64::from(i) / 100.0;
            let back = linear_to_srgb(srgb_to_linear(c));
            assert!(approx_eq(back, c, 1e-9), "{c} came back as {back}");
        }
    }

    #[test]
    fn mid_gray_linearizes_near_0_214() {
        assert!(approx_eq(srgb_to_linear(0.5), 0.214, 0.001));
    }

    // ── Known values ─────────────────────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let black = hex_to_oklch(HexColor::BLACK);
        assert!(approx_eq(black.l, 0.0, 1e-9));
        assert!(approx_eq(black.c, 0.0, 1e-9));
    }

    #[test]
    fn white_is_full_lightness() {
        let white = hex_to_oklch(HexColor::WHITE);
        assert!(approx_eq(white.l, 1.0, 1e-6));
        assert!(white.is_achromatic(), "white chroma was {}", white.c);
        assert!(approx_eq(white.h, 0.0, f64::EPSILON));
    }

    #[test]
    fn gray_has_no_chroma() {
        let gray = hex_to_oklch(HexColor::new(128, 128, 128));
        assert!(gray.is_achromatic(), "gray chroma was {}", gray.c);
    }

    #[test]
    fn pure_red_reference_values() {
        // Ottosson's published value for sRGB red: oklch(0.6280 0.2577 29.23).
        let red = hex_to_oklch(HexColor::new(255, 0, 0));
        assert!(approx_eq(red.l, 0.628, 0.001), "L = {}", red.l);
        assert!(approx_eq(red.c, 0.2577, 0.001), "C = {}", red.c);
        assert!(approx_eq(red.h, 29.23, 0.1), "H = {}", red.h);
    }

    #[test]
    fn pure_blue_hue_is_in_blue_range() {
        let blue = hex_to_oklch(HexColor::new(0, 0, 255));
        assert!(blue.h > 260.0 && blue.h < 270.0, "blue hue was {}", blue.h);
    }

    #[test]
    fn hue_is_never_negative() {
        // Magenta-to-blue colors have b < 0 in Oklab, so atan2 goes negative.
        for hex in ["#FF00FF", "#8000FF", "#FF0080", "#2F27CE"] {
            let h = hex_to_oklch(HexColor::parse(hex).unwrap()).h;
            assert!((0.0..360.0).contains(&h), "{hex} hue {h}");
        }
    }

    // ── Roundtrips ───────────────────────────────────────────────────────

    #[test]
    fn hex_roundtrip_primaries_and_grays() {
        for hex in [
            "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#00FFFF",
            "#FF00FF", "#808080", "#050315", "#FBFBFE", "#2F27CE", "#DEDCFF", "#433BFF",
        ] {
            let color = HexColor::parse(hex).unwrap();
            assert_hex_close(oklch_to_hex(hex_to_oklch(color)), color);
        }
    }

    #[test]
    fn hex_roundtrip_channel_sweep() {
        // Walk a coarse lattice through the whole cube, including the
        // darkest values where the linear segment of the curve applies.
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in [0u8, 1, 2, 3, 64, 127, 200, 254, 255] {
                    let color = HexColor::new(r, g, b);
                    assert_hex_close(oklch_to_hex(hex_to_oklch(color)), color);
                }
            }
        }
    }

    #[test]
    fn oklch_identity_roundtrip() {
        // Moderate chroma stays well inside the gamut.
        let original = Oklch::new(0.7, 0.10, 90.0);
        let recovered = rgb_to_oklch(oklch_to_rgb(original));
        assert!(approx_eq(original.l, recovered.l, 1e-6));
        assert!(approx_eq(original.c, recovered.c, 1e-6));
        assert!(hue_difference(original.h, recovered.h) < 1e-4);
    }

    #[test]
    fn oklab_linear_roundtrip() {
        let lin = LinearRgb::new(0.2, 0.5, 0.8);
        let back = lin.to_oklab().to_linear_rgb();
        assert!(approx_eq(back.r, lin.r, 1e-5));
        assert!(approx_eq(back.g, lin.g, 1e-5));
        assert!(approx_eq(back.b, lin.b, 1e-5));
    }

    #[test]
    fn negative_lms_keeps_sign_through_cube_root() {
        // Far outside the gamut: negative linear channels must not produce NaN.
        let lab = LinearRgb::new(-1.0, 0.1, -0.5).to_oklab();
        assert!(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite());
        assert!(lab.l < 0.0, "L = {}", lab.l);
        let back = lab.to_linear_rgb();
        assert!(approx_eq(back.r, -1.0, 1e-5), "r = {}", back.r);
        assert!(approx_eq(back.b, -0.5, 1e-5), "b = {}", back.b);
    }

    // ── Gamut clamping ───────────────────────────────────────────────────

    #[test]
    fn in_gamut_color_is_not_clamped() {
        let mapped = oklch_to_rgb_checked(Oklch::new(0.6, 0.05, 200.0));
        assert!(!mapped.was_clamped);
        assert!(mapped.rgb.in_gamut());
    }

    #[test]
    fn out_of_gamut_color_is_clamped_and_reported() {
        let vivid = Oklch::new(0.5, 0.4, 180.0);
        let mapped = oklch_to_rgb_checked(vivid);
        assert!(mapped.was_clamped);
        assert!(mapped.rgb.in_gamut());
        assert!(!vivid.in_srgb_gamut());
        assert_eq!(oklch_to_rgb(vivid), mapped.rgb);
    }

    #[test]
    fn lightness_past_one_clamps_to_white() {
        assert_eq!(oklch_to_hex(Oklch::new(1.2, 0.0, 0.0)), HexColor::WHITE);
        assert_eq!(oklch_to_hex(Oklch::new(-0.1, 0.0, 0.0)), HexColor::BLACK);
    }

    // ── Hue helpers ──────────────────────────────────────────────────────

    #[test]
    fn normalize_hue_wraps() {
        assert!(approx_eq(normalize_hue(370.0), 10.0, 1e-9));
        assert!(approx_eq(normalize_hue(-30.0), 330.0, 1e-9));
        assert!(approx_eq(normalize_hue(720.0), 0.0, 1e-9));
        assert!(normalize_hue(-1e-14) < 360.0);
    }

    #[test]
    fn hue_difference_takes_short_arc() {
        assert!(approx_eq(hue_difference(10.0, 350.0), 20.0, 1e-9));
        assert!(approx_eq(hue_difference(350.0, 10.0), 20.0, 1e-9));
        assert!(approx_eq(hue_difference(0.0, 180.0), 180.0, 1e-9));
    }

    #[test]
    fn with_hue_normalizes() {
        let shifted = Oklch::new(0.5, 0.1, 350.0).with_hue(350.0 + 30.0);
        assert!(approx_eq(shifted.h, 20.0, 1e-9));
    }

    // ── Display / Debug ──────────────────────────────────────────────────

    #[test]
    fn oklch_display_css_form() {
        let text = Oklch::new(0.5, 0.1, 90.0).to_string();
        assert_eq!(text, "oklch(0.5000 0.1000 90.00)");
    }

    #[test]
    fn oklch_debug_format() {
        let dbg = format!("{:?}", Oklch::new(0.5, 0.1, 90.0));
        assert!(dbg.starts_with("Oklch("));
    }
}
