use clap::Args;

use crate::cli::BackendArgs;
use crate::error::{PortalError, Result};
use crate::output::{plural, Printer};

/// Fetch and print the validation rules for an entity
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Entity type to fetch rules for; omit for every entity
    pub entity: Option<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub fn run(args: RulesArgs, printer: &Printer) -> Result<()> {
    let client = args.backend.client()?;

    printer.status(
        "Fetching",
        &format!(
            "rules for {} ({})",
            args.entity.as_deref().unwrap_or("all entities"),
            args.backend.environment
        ),
    );

    let rules = client.fetch_rules(args.entity.as_deref(), &args.backend.environment);
    let field_count: usize = rules.values().map(|fields| fields.len()).sum();
    printer.info(
        "Loaded",
        &format!(
            "{} across {}",
            plural(field_count, "field config", "field configs"),
            plural(rules.len(), "entity", "entities")
        ),
    );

    let json = serde_json::to_string_pretty(&rules).map_err(|e| PortalError::Parse {
        message: format!("Failed to serialize rules: {}", e),
        help: None,
    })?;
    println!("{}", json);

    Ok(())
}
