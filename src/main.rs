// SPDX-License-Identifier: MIT
//
// swatchbook — accessible five-role color palettes in OKLCH.
//
// Thin command-line front end over the two library crates:
//
//   swatch-color → hex / sRGB / linear / OKLab / OKLCH conversions
//   swatch-theme → WCAG contrast, palette generation, theme adaptation
//
// Every subcommand is a pure function of its arguments (plus an RNG for
// generate/adapt, seedable with --seed), rendered either as aligned text
// or as JSON:
//
//   generate → fresh palette for a theme
//   adapt    → move an existing palette to the other theme
//   contrast → ratio and WCAG rating for one pair
//   convert  → one color in every representation

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use swatch_color::{HexColor, Oklch, oklch_to_rgb_checked};
use swatch_theme::contrast::{PairCheck, check_palette};
use swatch_theme::{
    Generated, GeneratorConfig, Palette, Rating, Role, Theme, ThemeMode, WcagLevel,
    adapt_colors_to_theme_with, contrast_ratio, generate_accessible_palette_with,
    relative_luminance,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "swatchbook",
    version,
    about = "Generate and check accessible color palettes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a fresh palette for a theme.
    Generate(GenerateArgs),
    /// Move an existing palette to a theme, keeping hue and chroma.
    Adapt(AdaptArgs),
    /// Contrast ratio and WCAG rating of a foreground/background pair.
    Contrast(ContrastArgs),
    /// Show one color in every supported representation.
    Convert(ConvertArgs),
}

/// Options shared by the commands that produce a palette.
#[derive(Debug, Args)]
struct PaletteOpts {
    /// light, dark or system.
    #[arg(long, default_value = "system")]
    theme: ThemeMode,

    /// Resolve `--theme system` to dark.
    #[arg(long, env = "SWATCHBOOK_PREFERS_DARK")]
    prefers_dark: bool,

    /// Seed for a reproducible palette.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the generator bands.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    opts: PaletteOpts,
}

/// Roles not given fall back to the starter palette.
#[derive(Debug, Args)]
struct AdaptArgs {
    #[command(flatten)]
    opts: PaletteOpts,

    #[arg(long, value_name = "HEX")]
    text: Option<HexColor>,
    #[arg(long, value_name = "HEX")]
    background: Option<HexColor>,
    #[arg(long, value_name = "HEX")]
    primary: Option<HexColor>,
    #[arg(long, value_name = "HEX")]
    secondary: Option<HexColor>,
    #[arg(long, value_name = "HEX")]
    accent: Option<HexColor>,
}

impl AdaptArgs {
    fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        for (role, color) in [
            (Role::Text, self.text),
            (Role::Background, self.background),
            (Role::Primary, self.primary),
            (Role::Secondary, self.secondary),
            (Role::Accent, self.accent),
        ] {
            if let Some(color) = color {
                palette.set(role, color);
            }
        }
        palette
    }
}

#[derive(Debug, Args)]
struct ContrastArgs {
    /// Foreground color, `#RRGGBB`.
    foreground: HexColor,
    /// Background color, `#RRGGBB`.
    background: HexColor,
    /// AA or AAA.
    #[arg(long, default_value = "AA")]
    level: WcagLevel,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Color as `#RRGGBB`.
    #[arg(conflicts_with = "oklch")]
    hex: Option<HexColor>,
    /// Color as OKLCH lightness, chroma and hue.
    #[arg(long, num_args = 3, value_names = ["L", "C", "H"], allow_negative_numbers = true)]
    oklch: Option<Vec<f64>>,
    #[arg(long)]
    json: bool,
}

// ─── Reports ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PaletteReport {
    theme: Theme,
    #[serde(flatten)]
    generated: Generated,
    checks: [PairCheck; 3],
}

impl PaletteReport {
    fn new(theme: Theme, generated: Generated) -> Self {
        Self {
            theme,
            generated,
            checks: check_palette(&generated.palette),
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "theme: {}", self.theme)?;
        for (role, color) in self.generated.palette.iter() {
            let mark = if self.generated.repairs.contains(role) {
                "  (repaired)"
            } else {
                ""
            };
            writeln!(out, "  {role:<10} {color}  {}{mark}", color.to_oklch())?;
        }
        writeln!(out, "contrast against background:")?;
        for check in &self.checks {
            writeln!(
                out,
                "  {:<10} {:>6.2}:1  {}",
                check.role, check.ratio, check.rating
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ContrastReport {
    foreground: HexColor,
    background: HexColor,
    ratio: f64,
    rating: Rating,
    level: WcagLevel,
    passes: bool,
}

impl ContrastReport {
    fn new(foreground: HexColor, background: HexColor, level: WcagLevel) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            rating: Rating::from_ratio(ratio),
            level,
            passes: level.is_met_by(ratio),
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let verdict = if self.passes { "pass" } else { "fail" };
        writeln!(
            out,
            "{} on {}: {:.2}:1 ({}), {} {verdict}",
            self.foreground, self.background, self.ratio, self.rating, self.level
        )
    }
}

#[derive(Debug, Serialize)]
struct ColorReport {
    hex: HexColor,
    oklch: Oklch,
    luminance: f64,
    clamped: bool,
}

impl ColorReport {
    fn from_hex(hex: HexColor) -> Self {
        Self {
            hex,
            oklch: hex.to_oklch(),
            luminance: relative_luminance(hex),
            clamped: false,
        }
    }

    fn from_oklch(color: Oklch) -> Self {
        let mapped = oklch_to_rgb_checked(color);
        if mapped.was_clamped {
            warn!(%color, "color is outside the sRGB gamut; clamped");
        }
        let hex = HexColor::from_srgb(mapped.rgb);
        Self {
            hex,
            oklch: color,
            luminance: relative_luminance(hex),
            clamped: mapped.was_clamped,
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let srgb = self.hex.to_srgb();
        let oklab = self.oklch.to_oklab();
        writeln!(out, "hex        {}", self.hex)?;
        writeln!(out, "srgb       {:.4} {:.4} {:.4}", srgb.r, srgb.g, srgb.b)?;
        writeln!(out, "oklab      {:.4} {:.4} {:.4}", oklab.l, oklab.a, oklab.b)?;
        writeln!(out, "oklch      {}", self.oklch)?;
        writeln!(out, "luminance  {:.4}", self.luminance)?;
        if self.clamped {
            writeln!(out, "note       clamped to the sRGB gamut")?;
        }
        Ok(())
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    GeneratorConfig::load(path)
        .with_context(|| format!("loading generator config {}", path.display()))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

fn emit<T: Serialize>(
    out: &mut impl Write,
    json: bool,
    report: &T,
    text: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        text(out)?;
    }
    Ok(())
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => {
            let opts = &args.opts;
            let config = load_config(opts.config.as_deref())?;
            let theme = opts.theme.resolve(opts.prefers_dark);
            debug!(%theme, seed = ?opts.seed, "generating palette");
            let generated =
                generate_accessible_palette_with(&mut make_rng(opts.seed), theme, &config)?;
            let report = PaletteReport::new(theme, generated);
            emit(out, opts.json, &report, |w| report.write_text(w))
        }
        Command::Adapt(args) => {
            let opts = &args.opts;
            let config = load_config(opts.config.as_deref())?;
            let theme = opts.theme.resolve(opts.prefers_dark);
            let palette = args.palette();
            debug!(%theme, seed = ?opts.seed, "adapting palette");
            let generated =
                adapt_colors_to_theme_with(&mut make_rng(opts.seed), &palette, theme, &config)?;
            let report = PaletteReport::new(theme, generated);
            emit(out, opts.json, &report, |w| report.write_text(w))
        }
        Command::Contrast(args) => {
            let report = ContrastReport::new(args.foreground, args.background, args.level);
            emit(out, args.json, &report, |w| report.write_text(w))
        }
        Command::Convert(args) => {
            let report = match (args.hex, args.oklch.as_deref()) {
                (Some(hex), _) => ColorReport::from_hex(hex),
                (None, Some(&[l, c, h])) => ColorReport::from_oklch(Oklch::new(l, c, h)),
                (None, Some(_)) => bail!("--oklch takes exactly three values: L C H"),
                (None, None) => bail!("give a #RRGGBB color or --oklch L C H"),
            };
            emit(out, args.json, &report, |w| report.write_text(w))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    if let Err(e) = run(cli, &mut stdout.lock()) {
        eprintln!("swatchbook: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("swatchbook").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_is_reproducible_with_seed() {
        let a = run_args(&["generate", "--theme", "dark", "--seed", "7"]).unwrap();
        let b = run_args(&["generate", "--theme", "dark", "--seed", "7"]).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("theme: dark\n"), "{a}");
        for role in Role::ALL {
            assert!(a.contains(role.as_str()), "{a}");
        }
    }

    #[test]
    fn system_theme_follows_preference_flag() {
        let out = run_args(&["generate", "--seed", "1", "--prefers-dark"]).unwrap();
        assert!(out.starts_with("theme: dark\n"), "{out}");
        let out = run_args(&["generate", "--seed", "1", "--theme", "system"]).unwrap();
        assert!(out.starts_with("theme: light\n"), "{out}");
    }

    #[test]
    fn generate_json_shape() {
        let out = run_args(&["generate", "--theme", "light", "--seed", "3", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["theme"], "light");
        assert!(value["palette"]["background"].as_str().unwrap().starts_with('#'));
        assert!(value["repairs"]["text"].is_boolean());
        assert_eq!(value["checks"].as_array().unwrap().len(), 3);
        let palette: Palette = serde_json::from_value(value["palette"].clone()).unwrap();
        assert!(contrast_ratio(palette.text, palette.background) >= 7.0);
    }

    #[test]
    fn adapt_overrides_given_roles_only() {
        let cli = Cli::try_parse_from([
            "swatchbook",
            "adapt",
            "--theme",
            "dark",
            "--background",
            "#ffffff",
        ])
        .unwrap();
        let Command::Adapt(args) = cli.command else {
            panic!("expected adapt");
        };
        let palette = args.palette();
        assert_eq!(palette.background, HexColor::WHITE);
        assert_eq!(palette.text, Palette::default().text);
    }

    #[test]
    fn adapt_rejects_malformed_hex() {
        assert!(run_args(&["adapt", "--text", "#12345"]).is_err());
    }

    #[test]
    fn contrast_reports_rating() {
        let out = run_args(&["contrast", "#000000", "#FFFFFF"]).unwrap();
        assert_eq!(out, "#000000 on #FFFFFF: 21.00:1 (AAA), AA pass\n");

        let out = run_args(&["contrast", "#777777", "#ffffff", "--level", "aa"]).unwrap();
        assert!(out.ends_with("(Fail), AA fail\n"), "{out}");
    }

    #[test]
    fn convert_hex() {
        let out = run_args(&["convert", "#FF0000"]).unwrap();
        assert!(out.starts_with("hex        #FF0000\n"), "{out}");
        assert!(out.contains("luminance  0.2126"), "{out}");
        assert!(!out.contains("clamped"), "{out}");
    }

    #[test]
    fn convert_oklch_reports_clamping() {
        let out = run_args(&["convert", "--oklch", "0.7", "0.4", "150", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["clamped"], true);

        let out = run_args(&["convert", "--oklch", "1", "0", "0"]).unwrap();
        assert!(out.starts_with("hex        #FFFFFF\n"), "{out}");
    }

    #[test]
    fn convert_needs_a_color() {
        assert!(run_args(&["convert"]).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = run_args(&["generate", "--config", "/no/such/swatchbook.toml"]).unwrap_err();
        assert!(format!("{err:#}").contains("loading generator config"), "{err:#}");
    }
}
