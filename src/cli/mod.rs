pub mod check;
pub mod constraints;
pub mod contrast;
pub mod palette;
pub mod rules;
pub mod schema;

use clap::{Args, Parser, Subcommand};

/// portalkit - developer-portal branding and validation toolkit
#[derive(Parser, Debug)]
#[command(name = "portalkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate brand palettes from a base colour
    Palette(palette::PaletteArgs),

    /// Check the WCAG contrast of a colour pair
    Contrast(contrast::ContrastArgs),

    /// Fetch and print the validation rules for an entity
    Rules(rules::RulesArgs),

    /// Validate a field value or a JSON object against server rules
    Check(check::CheckArgs),

    /// Print the flat input constraints for a field
    Constraints(constraints::ConstraintsArgs),

    /// Derive JSON Schema objects for an entity's fields
    Schema(schema::SchemaArgs),
}

/// Options shared by every command that talks to the rules backend.
#[derive(Args, Debug)]
pub struct BackendArgs {
    /// Base URL of the portal backend
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Environment to fetch rules for
    #[arg(long, default_value = crate::validation::DEFAULT_ENVIRONMENT)]
    pub environment: String,
}

impl BackendArgs {
    /// Build a rule client against the configured backend.
    pub fn client(&self) -> crate::error::Result<crate::RuleClient<crate::HttpRuleSource>> {
        Ok(crate::RuleClient::new(crate::HttpRuleSource::new(
            &self.base_url,
        )?))
    }
}
