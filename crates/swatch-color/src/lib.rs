// SPDX-License-Identifier: MIT
//
// swatch-color — color math for swatchbook.
//
// Everything that turns a `#RRGGBB` string into perceptual coordinates
// and back lives here. The crate is a leaf: no palette knowledge, no
// randomness, no I/O. The accessibility engine in swatch-theme and the
// CLI both call into it as pure functions.
//
//   HexColor ↔ Srgb ↔ LinearRgb ↔ (LMS) ↔ Oklab ↔ Oklch

pub mod color;
pub mod error;
pub mod hex;
pub mod matrix;

pub use color::{
    GamutMapped, LinearRgb, Oklab, Oklch, Srgb, hex_to_oklch, hue_difference, linear_to_srgb,
    normalize_hue, oklch_to_hex, oklch_to_rgb, oklch_to_rgb_checked, rgb_to_oklch, srgb_to_linear,
};
pub use error::ColorError;
pub use hex::HexColor;
