//! Colour value types and colour-space conversion.
//!
//! `Rgb` and `Hsl` are immutable value types convertible in both directions.
//! Conversion is lossy only through integer rounding: a parse → HSL → hex
//! round trip reproduces each channel within a couple of points.

use std::fmt;
use std::str::FromStr;

use crate::error::{PortalError, Result};

/// An RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An HSL colour: hue in degrees (0–360), saturation and lightness in
/// percent (0–100), all rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Rgb {
    /// Create a new colour from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Parse a 6-digit hex colour string.
    ///
    /// The leading `#` is optional and hex digits are case-insensitive.
    /// A malformed string is a typed error, never a silent fallback; the
    /// caller decides whether to degrade.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        // Byte length only equals digit count for ASCII input; anything
        // else cannot be hex digits anyway.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PortalError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RRGGBB format, e.g. #6366f1".to_string()),
            });
        }

        let r = parse_hex_byte(&hex[0..2])?;
        let g = parse_hex_byte(&hex[2..4])?;
        let b = parse_hex_byte(&hex[4..6])?;
        Ok(Self::new(r, g, b))
    }

    /// Convert to HSL with each component rounded to the nearest integer.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            // Achromatic: hue and saturation are zero.
            return Hsl {
                h: 0,
                s: 0,
                l: (l * 100.0).round() as u8,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        // Max-channel branch; the red branch wraps by +6 when blue > green.
        let hue = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: (hue / 6.0 * 360.0).round() as u16,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }
}

impl Hsl {
    /// Create a new HSL colour.
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// Return the same hue/saturation at a different lightness, clamped
    /// to 0–100.
    pub fn with_lightness(self, l: i32) -> Self {
        Self {
            h: self.h,
            s: self.s,
            l: l.clamp(0, 100) as u8,
        }
    }

    /// Return the hue rotated by `degrees`, wrapped into 0–360.
    pub fn rotate(self, degrees: i32) -> Self {
        Self {
            h: (i32::from(self.h) + degrees).rem_euclid(360) as u16,
            s: self.s,
            l: self.l,
        }
    }

    /// Convert to RGB via the standard piecewise hue-to-RGB helper, each
    /// channel rounded to the nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h) / 360.0;
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            (hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
        )
    }

    /// Convert to a lowercase `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        self.to_rgb().to_string()
    }
}

/// Parse a hex colour string straight to HSL.
pub fn hex_to_hsl(s: &str) -> Result<Hsl> {
    Ok(Rgb::from_hex(s)?.to_hsl())
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl FromStr for Rgb {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PortalError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
