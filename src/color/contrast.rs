//! WCAG contrast checks.

use std::fmt;
use std::str::FromStr;

use crate::color::space::Rgb;
use crate::error::{PortalError, Result};

/// WCAG conformance level for text contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcagLevel {
    /// Minimum contrast, ratio >= 4.5.
    Aa,
    /// Enhanced contrast, ratio >= 7.
    Aaa,
}

impl WcagLevel {
    /// The minimum contrast ratio required by this level.
    pub fn threshold(self) -> f64 {
        match self {
            WcagLevel::Aa => 4.5,
            WcagLevel::Aaa => 7.0,
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::Aa => write!(f, "AA"),
            WcagLevel::Aaa => write!(f, "AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AA" => Ok(WcagLevel::Aa),
            "AAA" => Ok(WcagLevel::Aaa),
            _ => Err(PortalError::Parse {
                message: format!("Unknown WCAG level: {}", s),
                help: Some("Use AA or AAA".to_string()),
            }),
        }
    }
}

/// WCAG relative luminance of an sRGB colour.
pub fn relative_luminance(colour: Rgb) -> f64 {
    let linearize = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * linearize(colour.r) + 0.7152 * linearize(colour.g) + 0.0722 * linearize(colour.b)
}

/// Contrast ratio between two colours, from 1 (identical) to 21
/// (black on white).
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (brighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (brighter + 0.05) / (darker + 0.05)
}

/// Check whether a foreground/background pair meets a WCAG level.
pub fn is_accessible(foreground: Rgb, background: Rgb, level: WcagLevel) -> bool {
    contrast_ratio(foreground, background) >= level.threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_colours_ratio_one() {
        for hex in ["#6366f1", "#000000", "#ffffff"] {
            let c = Rgb::from_hex(hex).unwrap();
            let ratio = contrast_ratio(c, c);
            assert!((ratio - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_black_on_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!((ratio - 21.0).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let a = Rgb::from_hex("#6366f1").unwrap();
        let b = Rgb::from_hex("#f9fafb").unwrap();
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_black_on_white_passes_aa() {
        assert!(is_accessible(Rgb::BLACK, Rgb::WHITE, WcagLevel::Aa));
        assert!(is_accessible(Rgb::BLACK, Rgb::WHITE, WcagLevel::Aaa));
    }

    #[test]
    fn test_close_greys_fail_aaa() {
        let fg = Rgb::from_hex("#777777").unwrap();
        let bg = Rgb::from_hex("#888888").unwrap();
        assert!(!is_accessible(fg, bg, WcagLevel::Aaa));
        assert!(!is_accessible(fg, bg, WcagLevel::Aa));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("aa".parse::<WcagLevel>().unwrap(), WcagLevel::Aa);
        assert_eq!("AAA".parse::<WcagLevel>().unwrap(), WcagLevel::Aaa);
        assert!("AAAA".parse::<WcagLevel>().is_err());
    }
}
