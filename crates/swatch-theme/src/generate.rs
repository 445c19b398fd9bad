// SPDX-License-Identifier: MIT

//! Palette generation and light/dark adaptation.
//!
//! Both entry points work the same way: pick an OKLCH seed for every role,
//! quantize to hex, then give text, primary and accent exactly one chance
//! to be replaced by the theme's repair target if they miss their contrast
//! threshold against the background. There is no retry loop; a repair that
//! still misses is returned as is and reported in [`Repairs`].

use rand::Rng;
use serde::Serialize;
use swatch_color::{HexColor, Oklch, hex_to_oklch, normalize_hue};
use tracing::debug;

use crate::config::{GeneratorConfig, RepairTarget, RoleBand};
use crate::contrast::contrast_ratio;
use crate::error::ThemeError;
use crate::palette::{Palette, Role, Theme};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Which roles the repair pass replaced.
///
/// Secondary and background are never checked, so they have no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Repairs {
    pub text: bool,
    pub primary: bool,
    pub accent: bool,
}

impl Repairs {
    #[must_use]
    pub const fn any(self) -> bool {
        self.text || self.primary || self.accent
    }

    #[must_use]
    pub fn count(self) -> usize {
        [self.text, self.primary, self.accent]
            .into_iter()
            .filter(|&r| r)
            .count()
    }

    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        match role {
            Role::Text => self.text,
            Role::Primary => self.primary,
            Role::Accent => self.accent,
            Role::Background | Role::Secondary => false,
        }
    }
}

/// A palette together with the repairs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub palette: Palette,
    pub repairs: Repairs,
}

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

/// The OKLCH each role was built from, before hex quantization.
///
/// Repairs reuse the seed's hue (and, when adapting, its chroma) rather
/// than re-reading the quantized hex.
#[derive(Debug, Clone, Copy)]
struct Seeds {
    text: Oklch,
    background: Oklch,
    primary: Oklch,
    secondary: Oklch,
    accent: Oklch,
}

impl Seeds {
    const fn get(&self, role: Role) -> Oklch {
        match role {
            Role::Text => self.text,
            Role::Background => self.background,
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
        }
    }

    fn to_palette(self) -> Palette {
        Palette {
            text: self.text.to_hex(),
            background: self.background.to_hex(),
            primary: self.primary.to_hex(),
            secondary: self.secondary.to_hex(),
            accent: self.accent.to_hex(),
        }
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, band: RoleBand, hue: f64) -> Oklch {
    let l = band.lightness.sample(rng);
    let c = band.chroma.sample(rng);
    Oklch::new(l, c, hue)
}

fn remap<R: Rng + ?Sized>(rng: &mut R, color: HexColor, band: RoleBand) -> Oklch {
    hex_to_oklch(color).with_lightness(band.lightness.sample(rng))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a fresh accessible palette for `theme` with the default bands
/// and the thread-local RNG.
#[must_use]
pub fn generate_accessible_palette(theme: Theme) -> Palette {
    generate(&mut rand::rng(), theme, &GeneratorConfig::default()).palette
}

/// Generate a palette from an explicit RNG and configuration.
///
/// One base hue is drawn; text, background and primary sit on it,
/// secondary and accent are offset by the configured hue bands. With the
/// default configuration the result always has text at 7:1 or better and
/// primary and accent at 3:1 or better against the background.
///
/// # Errors
///
/// Returns the [`GeneratorConfig::validate`] error if `config` is invalid;
/// nothing is drawn from `rng` in that case.
pub fn generate_accessible_palette_with<R: Rng + ?Sized>(
    rng: &mut R,
    theme: Theme,
    config: &GeneratorConfig,
) -> Result<Generated, ThemeError> {
    config.validate()?;
    Ok(generate(rng, theme, config))
}

fn generate<R: Rng + ?Sized>(rng: &mut R, theme: Theme, config: &GeneratorConfig) -> Generated {
    let bands = config.bands(theme);
    let base_hue = rng.random_range(0.0..360.0);

    let background = draw(rng, bands.background, base_hue);
    let text = draw(rng, bands.text, base_hue);
    let primary = draw(rng, bands.primary, base_hue);
    let secondary_hue = normalize_hue(base_hue + config.hue_offsets.secondary.sample(rng));
    let secondary = draw(rng, bands.secondary, secondary_hue);
    let accent_hue = normalize_hue(base_hue + config.hue_offsets.accent.sample(rng));
    let accent = draw(rng, bands.accent, accent_hue);

    let seeds = Seeds {
        text,
        background,
        primary,
        secondary,
        accent,
    };
    finish(seeds, theme, config, |_, target| target.chroma)
}

// ---------------------------------------------------------------------------
// Adaptation
// ---------------------------------------------------------------------------

/// Move `palette` into `theme` with the default bands and the thread-local
/// RNG, keeping every role's hue and chroma.
#[must_use]
pub fn adapt_colors_to_theme(palette: &Palette, theme: Theme) -> Palette {
    adapt(&mut rand::rng(), palette, theme, &GeneratorConfig::default()).palette
}

/// Move `palette` into `theme` from an explicit RNG and configuration.
///
/// Only lightness is redrawn, from the target theme's band for each role.
/// A repaired role keeps its hue and never gains chroma: it takes the
/// smaller of its own chroma and the repair target's. Calling this again
/// with the same theme draws new lightness values from the same bands, so
/// the palette does not drift.
///
/// # Errors
///
/// Returns the [`GeneratorConfig::validate`] error if `config` is invalid.
pub fn adapt_colors_to_theme_with<R: Rng + ?Sized>(
    rng: &mut R,
    palette: &Palette,
    theme: Theme,
    config: &GeneratorConfig,
) -> Result<Generated, ThemeError> {
    config.validate()?;
    Ok(adapt(rng, palette, theme, config))
}

fn adapt<R: Rng + ?Sized>(
    rng: &mut R,
    palette: &Palette,
    theme: Theme,
    config: &GeneratorConfig,
) -> Generated {
    let bands = config.bands(theme);
    let seeds = Seeds {
        background: remap(rng, palette.background, bands.background),
        text: remap(rng, palette.text, bands.text),
        primary: remap(rng, palette.primary, bands.primary),
        secondary: remap(rng, palette.secondary, bands.secondary),
        accent: remap(rng, palette.accent, bands.accent),
    };
    finish(seeds, theme, config, |seed, target| seed.c.min(target.chroma))
}

// ---------------------------------------------------------------------------
// Repair
// ---------------------------------------------------------------------------

fn finish(
    seeds: Seeds,
    theme: Theme,
    config: &GeneratorConfig,
    repair_chroma: impl Fn(Oklch, RepairTarget) -> f64,
) -> Generated {
    let bands = config.bands(theme);
    let thresholds = config.thresholds;
    let mut palette = seeds.to_palette();
    let mut repairs = Repairs::default();

    for (role, threshold, target, flag) in [
        (Role::Text, thresholds.text, bands.repair.text, &mut repairs.text),
        (Role::Primary, thresholds.primary, bands.repair.primary, &mut repairs.primary),
        (Role::Accent, thresholds.accent, bands.repair.accent, &mut repairs.accent),
    ] {
        let current = palette.get(role);
        let ratio = contrast_ratio(current, palette.background);
        if ratio >= threshold {
            continue;
        }

        let seed = seeds.get(role);
        let fixed = Oklch::new(target.lightness, repair_chroma(seed, target), seed.h).to_hex();
        debug!(
            %theme,
            %role,
            ratio,
            threshold,
            from = %current,
            to = %fixed,
            "repaired low-contrast role"
        );
        palette.set(role, fixed);
        *flag = true;
    }

    Generated { palette, repairs }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
