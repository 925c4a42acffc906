use clap::Args;

use crate::cli::BackendArgs;
use crate::error::{PortalError, Result};
use crate::output::Printer;

/// Print the flat input constraints for a field
#[derive(Args, Debug)]
pub struct ConstraintsArgs {
    /// Entity type the field belongs to
    pub entity: String,

    /// Field name
    pub field: String,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub fn run(args: ConstraintsArgs, printer: &Printer) -> Result<()> {
    let client = args.backend.client()?;

    printer.status("Resolving", &format!("{}.{}", args.entity, args.field));

    match client.field_constraints(&args.entity, &args.field, &args.backend.environment) {
        Some(constraints) => {
            let json =
                serde_json::to_string_pretty(&constraints).map_err(|e| PortalError::Parse {
                    message: format!("Failed to serialize constraints: {}", e),
                    help: None,
                })?;
            println!("{}", json);
        }
        None => {
            printer.info("Resolved", "no rules configured for this field");
            println!("{{}}");
        }
    }

    Ok(())
}
