//! Brand palette generation.
//!
//! Each generator derives a complete UI palette from one base hex colour by
//! rotating its hue (or shifting its lightness) at fixed offsets, plus an
//! 11-step shade ramp. Palettes are constructed fresh per call and never
//! mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::space::hex_to_hsl;
use crate::error::{PortalError, Result};

/// Default brand base colour (portal purple).
pub const DEFAULT_BASE: &str = "#6366f1";

// Semantic colours shared by every scheme; these are portal-wide constants,
// not derived from the base colour.
const BACKGROUND: &str = "#ffffff";
const SURFACE: &str = "#f9fafb";
const TEXT: &str = "#111827";
const TEXT_SECONDARY: &str = "#6b7280";
const SUCCESS: &str = "#10b981";
const WARNING: &str = "#f59e0b";
const ERROR: &str = "#ef4444";
const INFO: &str = "#3b82f6";

/// Lightness for the tint half of the ramp (steps 50–400).
const TINT_STEPS: [(u16, i32); 5] = [(50, 97), (100, 94), (200, 86), (300, 73), (400, 64)];

/// (key, lightness delta below base, floor) for the shade half (600–950).
/// The floors keep deep shades from degenerating to near-black.
const SHADE_STEPS: [(u16, i32, i32); 5] =
    [(600, 10, 20), (700, 20, 15), (800, 30, 10), (900, 40, 8), (950, 50, 5)];

/// A complete set of UI-ready colours derived from one base colour.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
    /// 11-step shade ramp keyed 50 (lightest) to 950 (darkest).
    pub shades: BTreeMap<u16, String>,
}

/// A palette generation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Complementary,
    Analogous,
    Triadic,
    Monochromatic,
    SplitComplementary,
}

impl Scheme {
    /// All schemes in their fixed generation order.
    pub const ALL: [Scheme; 5] = [
        Scheme::Complementary,
        Scheme::Analogous,
        Scheme::Triadic,
        Scheme::Monochromatic,
        Scheme::SplitComplementary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Complementary => "complementary",
            Scheme::Analogous => "analogous",
            Scheme::Triadic => "triadic",
            Scheme::Monochromatic => "monochromatic",
            Scheme::SplitComplementary => "split-complementary",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "complementary" => Ok(Scheme::Complementary),
            "analogous" => Ok(Scheme::Analogous),
            "triadic" => Ok(Scheme::Triadic),
            "monochromatic" => Ok(Scheme::Monochromatic),
            "split-complementary" => Ok(Scheme::SplitComplementary),
            _ => Err(PortalError::Parse {
                message: format!("Unknown scheme: {}", s),
                help: Some(
                    "Available schemes: complementary, analogous, triadic, monochromatic, split-complementary"
                        .to_string(),
                ),
            }),
        }
    }
}

/// Generate the 11-step shade ramp for a base colour.
///
/// Step 500 holds the base input string verbatim; tints fix lightness at
/// preset values and shades subtract from the base lightness with per-step
/// floors. Hue and saturation are held constant across the ramp.
pub fn generate_shades(base: &str) -> Result<BTreeMap<u16, String>> {
    let hsl = hex_to_hsl(base)?;
    let mut shades = BTreeMap::new();

    for (key, lightness) in TINT_STEPS {
        shades.insert(key, hsl.with_lightness(lightness).to_hex());
    }

    shades.insert(500, base.to_string());

    for (key, delta, floor) in SHADE_STEPS {
        let lightness = (i32::from(hsl.l) - delta).max(floor);
        shades.insert(key, hsl.with_lightness(lightness).to_hex());
    }

    Ok(shades)
}

/// Generate a palette from a base colour using the given scheme.
pub fn generate(scheme: Scheme, base: &str) -> Result<Palette> {
    let hsl = hex_to_hsl(base)?;

    let (secondary, accent) = match scheme {
        Scheme::Complementary => (hsl.rotate(180), hsl.rotate(-180)),
        Scheme::Analogous => (hsl.rotate(30), hsl.rotate(-30)),
        Scheme::Triadic => (hsl.rotate(120), hsl.rotate(240)),
        Scheme::Monochromatic => (
            hsl.with_lightness((i32::from(hsl.l) - 20).clamp(20, 80)),
            hsl.with_lightness((i32::from(hsl.l) + 20).clamp(20, 80)),
        ),
        Scheme::SplitComplementary => (hsl.rotate(150), hsl.rotate(210)),
    };

    Ok(Palette {
        name: scheme.name().to_string(),
        primary: base.to_string(),
        secondary: secondary.to_hex(),
        accent: accent.to_hex(),
        background: BACKGROUND.to_string(),
        surface: SURFACE.to_string(),
        text: TEXT.to_string(),
        text_secondary: TEXT_SECONDARY.to_string(),
        success: SUCCESS.to_string(),
        warning: WARNING.to_string(),
        error: ERROR.to_string(),
        info: INFO.to_string(),
        shades: generate_shades(base)?,
    })
}

/// Generate all five palettes in their fixed order.
pub fn generate_all(base: &str) -> Result<Vec<Palette>> {
    Scheme::ALL.iter().map(|&s| generate(s, base)).collect()
}
