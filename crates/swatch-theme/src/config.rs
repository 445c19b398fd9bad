// SPDX-License-Identifier: MIT

//! Generator configuration: sampling bands, repair targets and thresholds.
//!
//! The defaults reproduce the tuned bands the palette previewer ships
//! with. Every field is `#[serde(default)]`, so a TOML file only has to
//! name the values it changes:
//!
//! ```toml
//! [dark.primary]
//! lightness = { min = 0.65, max = 0.80 }
//!
//! [thresholds]
//! text = 7.5
//! ```

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contrast::{AAA_MIN, LARGE_TEXT_MIN};
use crate::error::ThemeError;
use crate::palette::{Role, Theme};

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]` that a value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from the band.
    ///
    /// A zero-width band returns `min`, and so does a band that
    /// [`GeneratorConfig::validate`] would reject (inverted, NaN or
    /// unbounded); drawing never panics.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        if self.min < self.max && (self.max - self.min).is_finite() {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(self, field: String, lo: f64, hi: f64) -> Result<(), ThemeError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && self.min >= lo
            && self.max <= hi;
        if ok {
            Ok(())
        } else {
            Err(ThemeError::InvalidBand {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Role / theme bands
// ---------------------------------------------------------------------------

/// Lightness and chroma bands for one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleBand {
    pub lightness: Band,
    pub chroma: Band,
}

impl RoleBand {
    const fn new(lightness: (f64, f64), chroma: (f64, f64)) -> Self {
        Self {
            lightness: Band::new(lightness.0, lightness.1),
            chroma: Band::new(chroma.0, chroma.1),
        }
    }
}

/// Fixed (lightness, chroma) a failing role is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepairTarget {
    pub lightness: f64,
    pub chroma: f64,
}

impl RepairTarget {
    #[must_use]
    pub const fn new(lightness: f64, chroma: f64) -> Self {
        Self { lightness, chroma }
    }
}

/// Repair targets for the three contrast-checked roles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepairTargets {
    pub text: RepairTarget,
    pub primary: RepairTarget,
    pub accent: RepairTarget,
}

/// All bands and repair targets for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeBands {
    pub text: RoleBand,
    pub background: RoleBand,
    pub primary: RoleBand,
    pub secondary: RoleBand,
    pub accent: RoleBand,
    pub repair: RepairTargets,
}

impl ThemeBands {
    /// Light background, dark text.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            background: RoleBand::new((0.95, 1.00), (0.01, 0.03)),
            text: RoleBand::new((0.15, 0.30), (0.02, 0.05)),
            primary: RoleBand::new((0.35, 0.50), (0.15, 0.25)),
            secondary: RoleBand::new((0.85, 0.95), (0.04, 0.08)),
            accent: RoleBand::new((0.45, 0.60), (0.15, 0.25)),
            repair: RepairTargets {
                text: RepairTarget::new(0.20, 0.02),
                primary: RepairTarget::new(0.35, 0.15),
                accent: RepairTarget::new(0.45, 0.15),
            },
        }
    }

    /// Dark background, light text.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: RoleBand::new((0.15, 0.25), (0.01, 0.03)),
            text: RoleBand::new((0.85, 0.95), (0.02, 0.05)),
            primary: RoleBand::new((0.60, 0.75), (0.15, 0.25)),
            secondary: RoleBand::new((0.25, 0.40), (0.04, 0.08)),
            accent: RoleBand::new((0.55, 0.70), (0.15, 0.25)),
            repair: RepairTargets {
                text: RepairTarget::new(0.90, 0.02),
                primary: RepairTarget::new(0.65, 0.15),
                accent: RepairTarget::new(0.60, 0.15),
            },
        }
    }

    #[must_use]
    pub const fn role(&self, role: Role) -> RoleBand {
        match role {
            Role::Text => self.text,
            Role::Background => self.background,
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
        }
    }
}

// ---------------------------------------------------------------------------
// Hue offsets and thresholds
// ---------------------------------------------------------------------------

/// Degrees added to the base hue for the roles that do not sit on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueOffsets {
    pub secondary: Band,
    pub accent: Band,
}

impl Default for HueOffsets {
    fn default() -> Self {
        Self {
            secondary: Band::new(20.0, 40.0),
            accent: Band::new(30.0, 90.0),
        }
    }
}

/// Minimum contrast against the background before a role is repaired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Body text; defaults to AAA.
    pub text: f64,
    /// Primary as large text / graphical object.
    pub primary: f64,
    pub accent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            text: AAA_MIN,
            primary: LARGE_TEXT_MIN,
            accent: LARGE_TEXT_MIN,
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Everything the generator and the theme adapter read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    #[serde(deserialize_with = "bands::light")]
    pub light: ThemeBands,
    #[serde(deserialize_with = "bands::dark")]
    pub dark: ThemeBands,
    pub hue_offsets: HueOffsets,
    pub thresholds: Thresholds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            light: ThemeBands::light(),
            dark: ThemeBands::dark(),
            hue_offsets: HueOffsets::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Bands for `theme`.
    #[must_use]
    pub const fn bands(&self, theme: Theme) -> &ThemeBands {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    /// Parse a (possibly partial) TOML document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ConfigParse`] for malformed TOML and the
    /// validation errors of [`validate`](Self::validate).
    pub fn from_toml_str(s: &str) -> Result<Self, ThemeError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ConfigRead`] if the file cannot be read,
    /// otherwise the errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text = fs::read_to_string(path).map_err(|source| ThemeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Check every band and threshold.
    ///
    /// Lightness bands and targets must lie in `[0, 1]`, chroma must be
    /// non-negative, hue offsets must lie in `[0, 360]`, and thresholds
    /// must be finite and at least 1.
    ///
    /// # Errors
    ///
    /// Returns the first [`ThemeError::InvalidBand`] or
    /// [`ThemeError::InvalidThreshold`] found.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for theme in [Theme::Light, Theme::Dark] {
            let bands = self.bands(theme);
            for role in Role::ALL {
                let band = bands.role(role);
                let field = format!("{theme}.{role}");
                band.lightness.check(format!("{field}.lightness"), 0.0, 1.0)?;
                band.chroma.check(format!("{field}.chroma"), 0.0, f64::MAX)?;
            }
            let repair = bands.repair;
            for (name, target) in [
                ("text", repair.text),
                ("primary", repair.primary),
                ("accent", repair.accent),
            ] {
                Band::new(target.lightness, target.lightness)
                    .check(format!("{theme}.repair.{name}.lightness"), 0.0, 1.0)?;
                Band::new(target.chroma, target.chroma)
                    .check(format!("{theme}.repair.{name}.chroma"), 0.0, f64::MAX)?;
            }
        }
        self.hue_offsets
            .secondary
            .check("hue_offsets.secondary".to_owned(), 0.0, 360.0)?;
        self.hue_offsets
            .accent
            .check("hue_offsets.accent".to_owned(), 0.0, 360.0)?;
        for (field, value) in [
            ("thresholds.text", self.thresholds.text),
            ("thresholds.primary", self.thresholds.primary),
            ("thresholds.accent", self.thresholds.accent),
        ] {
            if !value.is_finite() || value < 1.0 {
                return Err(ThemeError::InvalidThreshold { field, value });
            }
        }
        Ok(())
    }
}

/// Partial deserialization of [`ThemeBands`] on top of a theme's defaults.
///
/// `#[serde(default)]` on `ThemeBands` itself cannot know whether it is the
/// light or the dark table, so each table is merged field by field here.
mod bands {
    use serde::{Deserialize, Deserializer};

    use super::{Band, RepairTarget, RepairTargets, RoleBand, ThemeBands};

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RoleBandPatch {
        lightness: Option<Band>,
        chroma: Option<Band>,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RepairPatch {
        text: Option<RepairTarget>,
        primary: Option<RepairTarget>,
        accent: Option<RepairTarget>,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ThemeBandsPatch {
        text: Option<RoleBandPatch>,
        background: Option<RoleBandPatch>,
        primary: Option<RoleBandPatch>,
        secondary: Option<RoleBandPatch>,
        accent: Option<RoleBandPatch>,
        repair: Option<RepairPatch>,
    }

    fn merge_role(base: RoleBand, patch: Option<RoleBandPatch>) -> RoleBand {
        let Some(patch) = patch else { return base };
        RoleBand {
            lightness: patch.lightness.unwrap_or(base.lightness),
            chroma: patch.chroma.unwrap_or(base.chroma),
        }
    }

    fn merge_repair(base: RepairTargets, patch: Option<RepairPatch>) -> RepairTargets {
        let Some(patch) = patch else { return base };
        RepairTargets {
            text: patch.text.unwrap_or(base.text),
            primary: patch.primary.unwrap_or(base.primary),
            accent: patch.accent.unwrap_or(base.accent),
        }
    }

    fn merge(base: ThemeBands, patch: ThemeBandsPatch) -> ThemeBands {
        ThemeBands {
            text: merge_role(base.text, patch.text),
            background: merge_role(base.background, patch.background),
            primary: merge_role(base.primary, patch.primary),
            secondary: merge_role(base.secondary, patch.secondary),
            accent: merge_role(base.accent, patch.accent),
            repair: merge_repair(base.repair, patch.repair),
        }
    }

    pub fn light<'de, D: Deserializer<'de>>(d: D) -> Result<ThemeBands, D::Error> {
        ThemeBandsPatch::deserialize(d).map(|patch| merge(ThemeBands::light(), patch))
    }

    pub fn dark<'de, D: Deserializer<'de>>(d: D) -> Result<ThemeBands, D::Error> {
        ThemeBandsPatch::deserialize(d).map(|patch| merge(ThemeBands::dark(), patch))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
