// SPDX-License-Identifier: MIT

//! Error types for palette configuration and tag parsing.

use std::io;
use std::path::PathBuf;

use swatch_color::ColorError;
use thiserror::Error;

/// Primary error type for the palette engine.
///
/// Generation and adaptation never fail; these errors come from parsing
/// user-facing tags and from loading a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Theme tag was not `light`, `dark` (or `system` for a mode).
    #[error("unknown theme `{value}`: expected light, dark or system")]
    UnknownTheme {
        /// Tag provided by the caller.
        value: String,
    },
    /// WCAG level tag was not `AA` or `AAA`.
    #[error("unknown WCAG level `{value}`: expected AA or AAA")]
    UnknownLevel {
        /// Tag provided by the caller.
        value: String,
    },
    /// A palette color failed to parse.
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Configuration file could not be read.
    #[error("failed to read generator config {}", path.display())]
    ConfigRead {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Configuration file was not valid TOML for the expected shape.
    #[error("failed to parse generator config")]
    ConfigParse(#[from] toml::de::Error),
    /// A sampling band had `min > max` or left its allowed range.
    #[error("invalid band `{field}`: [{min}, {max}]")]
    InvalidBand {
        /// Dotted path of the band, e.g. `light.text.lightness`.
        field: String,
        /// Lower bound as configured.
        min: f64,
        /// Upper bound as configured.
        max: f64,
    },
    /// A contrast threshold was below 1:1 (unreachable) or not finite.
    #[error("invalid contrast threshold `{field}`: {value}")]
    InvalidThreshold {
        /// Name of the threshold.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}
