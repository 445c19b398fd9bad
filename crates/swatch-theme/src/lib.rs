// SPDX-License-Identifier: MIT

//! # swatch-theme — accessible five-role palettes
//!
//! Builds and checks palettes of five semantic colors (text, background,
//! primary, secondary, accent) so that the roles a reader depends on stay
//! legible under WCAG 2.x contrast rules.
//!
//! # Architecture
//!
//! ```text
//! Theme (light/dark) + GeneratorConfig + Rng
//!     │
//!     ▼
//! generate.rs: draw hue, then lightness/chroma per role from config.rs bands
//!     │         (or keep hue/chroma of an existing palette and remap lightness)
//!     ▼
//! contrast.rs: WCAG luminance + contrast ratio against the background
//!     │
//!     ▼
//! generate.rs: one repair pass for text / primary / accent
//!     │
//!     ▼
//! palette.rs:  Palette of five HexColor values
//! ```
//!
//! # Color Space
//!
//! Sampling happens in OKLCH (perceptually uniform); contrast is judged in
//! sRGB relative luminance, which is what WCAG defines. The math lives in
//! `swatch-color`.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod config;
pub mod contrast;
pub mod error;
pub mod generate;
pub mod palette;

pub use config::GeneratorConfig;
pub use contrast::{Rating, WcagLevel, contrast_ratio, is_accessible, relative_luminance};
pub use error::ThemeError;
pub use generate::{
    Generated, Repairs, adapt_colors_to_theme, adapt_colors_to_theme_with,
    generate_accessible_palette, generate_accessible_palette_with,
};
pub use palette::{Palette, Role, Theme, ThemeMode};
