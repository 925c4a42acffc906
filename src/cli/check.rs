use clap::Args;
use serde_json::{Map, Value};

use crate::cli::BackendArgs;
use crate::error::{PortalError, Result};
use crate::output::{plural, Printer};
use crate::validation::ValidationError;

/// Validate a field value or a JSON object against server rules
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Entity type the field belongs to
    pub entity: String,

    /// Field name (single-field mode)
    pub field: Option<String>,

    /// Value to validate (single-field mode)
    pub value: Option<String>,

    /// Validate every field of a JSON object instead
    #[arg(long, conflicts_with_all = ["field", "value"])]
    pub json: Option<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let client = args.backend.client()?;
    let environment = &args.backend.environment;

    let errors = if let Some(json) = &args.json {
        let data: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| PortalError::Parse {
                message: format!("Invalid JSON object: {}", e),
                help: Some("Pass an object, e.g. --json '{\"iban\": \"DE89...\"}'".to_string()),
            })?;
        printer.status(
            "Checking",
            &format!("{} fields of {}", data.len(), args.entity),
        );
        client.validate_object(&args.entity, &data, environment)?
    } else {
        let (field, value) = match (&args.field, &args.value) {
            (Some(field), Some(value)) => (field, value),
            _ => {
                return Err(PortalError::Validation {
                    message: "Missing field and value".to_string(),
                    help: Some(
                        "Pass FIELD VALUE positionally, or use --json for a whole object"
                            .to_string(),
                    ),
                })
            }
        };
        printer.status("Checking", &format!("{}.{}", args.entity, field));
        client.validate_field(&args.entity, field, value, environment)?
    };

    print_errors(&errors)?;

    if errors.is_empty() {
        printer.info("Result", "all checks passed");
        Ok(())
    } else {
        printer.warning(
            "Result",
            &plural(errors.len(), "validation error", "validation errors"),
        );
        Err(PortalError::Validation {
            message: format!("{} failed validation", args.entity),
            help: None,
        })
    }
}

fn print_errors(errors: &[ValidationError]) -> Result<()> {
    let json = serde_json::to_string_pretty(errors).map_err(|e| PortalError::Parse {
        message: format!("Failed to serialize errors: {}", e),
        help: None,
    })?;
    println!("{}", json);
    Ok(())
}
