//! Palette serializers.
//!
//! Three output formats for downstream tooling: a CSS custom-property block,
//! pretty-printed JSON, and a Tailwind theme-config snippet. Pure string
//! templating; no validation of the output beyond correct interpolation.

use std::fmt::Write;

use crate::color::palette::Palette;
use crate::error::{PortalError, Result};

/// Render a palette as a `:root` CSS custom-property block.
pub fn to_css(palette: &Palette) -> String {
    let mut css = String::from(":root {\n");

    for (name, value) in named_colours(palette) {
        let _ = writeln!(css, "  --color-{}: {};", name, value);
    }
    for (key, value) in &palette.shades {
        let _ = writeln!(css, "  --color-primary-{}: {};", key, value);
    }

    css.push_str("}\n");
    css
}

/// Render a palette as pretty-printed JSON.
pub fn to_json(palette: &Palette) -> Result<String> {
    serde_json::to_string_pretty(palette).map_err(|e| PortalError::Parse {
        message: format!("Failed to serialize palette: {}", e),
        help: None,
    })
}

/// Render a palette as a Tailwind theme-config source snippet.
pub fn to_tailwind(palette: &Palette) -> String {
    let mut out = String::from("module.exports = {\n  theme: {\n    extend: {\n      colors: {\n");

    out.push_str("        primary: {\n");
    let _ = writeln!(out, "          DEFAULT: '{}',", palette.primary);
    for (key, value) in &palette.shades {
        let _ = writeln!(out, "          {}: '{}',", key, value);
    }
    out.push_str("        },\n");

    for (name, value) in named_colours(palette).into_iter().skip(1) {
        let name = match name {
            "text-secondary" => "textSecondary".to_string(),
            other => other.to_string(),
        };
        let _ = writeln!(out, "        {}: '{}',", name, value);
    }

    out.push_str("      },\n    },\n  },\n};\n");
    out
}

/// The palette's named colours in output order.
fn named_colours(palette: &Palette) -> Vec<(&'static str, &str)> {
    vec![
        ("primary", &palette.primary),
        ("secondary", &palette.secondary),
        ("accent", &palette.accent),
        ("background", &palette.background),
        ("surface", &palette.surface),
        ("text", &palette.text),
        ("text-secondary", &palette.text_secondary),
        ("success", &palette.success),
        ("warning", &palette.warning),
        ("error", &palette.error),
        ("info", &palette.info),
    ]
}
