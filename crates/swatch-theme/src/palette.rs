// SPDX-License-Identifier: MIT

//! The five-role palette and the light/dark theme tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::HexColor;

use crate::error::ThemeError;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A concrete luminance structure: light background with dark text, or
/// the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::UnknownTheme {
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeMode
// ---------------------------------------------------------------------------

/// The user's theme preference, which may defer to the system setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the platform's `prefers-color-scheme`.
    #[default]
    System,
}

impl ThemeMode {
    /// Resolve to a concrete theme given the platform preference.
    #[must_use]
    pub const fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
            Self::System if system_prefers_dark => Theme::Dark,
            Self::System => Theme::Light,
        }
    }
}

impl From<Theme> for ThemeMode {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("system") {
            return Ok(Self::System);
        }
        s.parse::<Theme>().map(Self::from)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The semantic slot a color fills in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Text,
    Background,
    Primary,
    Secondary,
    Accent,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Background,
        Self::Primary,
        Self::Secondary,
        Self::Accent,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Background => "background",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Five colors, one per [`Role`].
///
/// There is no ordering between the roles. The generator only guarantees
/// contrast of text, primary and accent against the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    pub text: HexColor,
    pub background: HexColor,
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
}

impl Palette {
    #[must_use]
    pub const fn get(&self, role: Role) -> HexColor {
        match role {
            Role::Text => self.text,
            Role::Background => self.background,
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
        }
    }

    pub const fn set(&mut self, role: Role, color: HexColor) {
        match role {
            Role::Text => self.text = color,
            Role::Background => self.background = color,
            Role::Primary => self.primary = color,
            Role::Secondary => self.secondary = color,
            Role::Accent => self.accent = color,
        }
    }

    /// A copy with one role replaced.
    #[must_use]
    pub const fn with(mut self, role: Role, color: HexColor) -> Self {
        self.set(role, color);
        self
    }

    /// Iterate `(role, color)` pairs in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, HexColor)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

impl Default for Palette {
    /// The starter palette: near-black ink on a cool off-white, indigo
    /// primary and accent, lavender secondary.
    fn default() -> Self {
        Self {
            text: HexColor::new(0x05, 0x03, 0x15),
            background: HexColor::new(0xFB, 0xFB, 0xFE),
            primary: HexColor::new(0x2F, 0x27, 0xCE),
            secondary: HexColor::new(0xDE, 0xDC, 0xFF),
            accent: HexColor::new(0x43, 0x3B, 0xFF),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
