// SPDX-License-Identifier: MIT

//! Error types for color parsing.

use thiserror::Error;

/// Errors produced at the string boundary of the color math.
///
/// The conversions themselves are total; only turning user text into a
/// [`HexColor`](crate::HexColor) can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input did not match `#RRGGBB` (the leading `#` is optional).
    #[error("invalid color format `{input}`: expected #RRGGBB")]
    InvalidColorFormat {
        /// The rejected input, as given.
        input: String,
    },
}
