use clap::Args;

use crate::cli::BackendArgs;
use crate::error::{PortalError, Result};
use crate::output::{plural, Printer};

/// Derive JSON Schema objects for an entity's fields
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Entity type the fields belong to
    pub entity: String,

    /// Fields to derive schemas for
    #[arg(required = true)]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub fn run(args: SchemaArgs, printer: &Printer) -> Result<()> {
    let client = args.backend.client()?;

    printer.status(
        "Deriving",
        &format!(
            "schemas for {} of {}",
            plural(args.fields.len(), "field", "fields"),
            args.entity
        ),
    );

    let schemas = client.field_schemas(&args.entity, &args.fields, &args.backend.environment);
    if schemas.len() < args.fields.len() {
        printer.warning(
            "Skipped",
            &plural(
                args.fields.len() - schemas.len(),
                "field with no configured rules",
                "fields with no configured rules",
            ),
        );
    }

    let json = serde_json::to_string_pretty(&schemas).map_err(|e| PortalError::Parse {
        message: format!("Failed to serialize schemas: {}", e),
        help: None,
    })?;
    println!("{}", json);

    Ok(())
}
