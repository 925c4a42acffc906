//! portalkit - Developer-portal branding and validation toolkit
//!
//! Two independent engines behind the banking developer portal: a colour
//! engine that derives brand palettes from a base colour, and a validation
//! engine that evaluates server-driven field rules.

pub mod cli;
pub mod color;
pub mod error;
pub mod output;
pub mod validation;

pub use color::{
    contrast_ratio, generate, generate_all, generate_shades, hex_to_hsl, is_accessible,
    relative_luminance, to_css, to_json, to_tailwind, Hsl, Palette, Rgb, Scheme, WcagLevel,
    DEFAULT_BASE,
};
pub use error::{PortalError, Result};
pub use validation::{
    CustomOutcome, EntityRules, FieldConstraints, FieldRules, HttpRuleSource, RuleClient,
    RuleKind, RuleSource, StaticRuleSource, ValidationError, ValidationRule, ValidatorRegistry,
};
