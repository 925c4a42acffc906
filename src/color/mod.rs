//! Colour engine: colour-space conversion, palette generation, WCAG
//! contrast checks, and palette serializers.
//!
//! Everything here is a pure function of its arguments; there is no shared
//! state and no I/O.

pub mod contrast;
pub mod export;
pub mod palette;
pub mod space;

pub use contrast::{contrast_ratio, is_accessible, relative_luminance, WcagLevel};
pub use export::{to_css, to_json, to_tailwind};
pub use palette::{generate, generate_all, generate_shades, Palette, Scheme, DEFAULT_BASE};
pub use space::{hex_to_hsl, Hsl, Rgb};
