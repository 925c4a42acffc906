//! Rule evaluation.
//!
//! Rules run in ascending priority order. A failing `required` rule on an
//! empty value short-circuits the rest; every other rule type always runs,
//! so errors accumulate rather than failing fast.

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{PortalError, Result};
use crate::validation::registry::{CustomOutcome, ValidatorRegistry};
use crate::validation::rule::{FieldRules, RuleKind, ValidationError};

enum RuleOutcome {
    Pass,
    /// Failed; use the field's configured message.
    Fail,
    /// Failed; the validator supplied its own message.
    FailWith(String),
}

/// Evaluate a field's config against a value, returning every failure.
///
/// An invalid `pattern` rule is a programming error in the rule set and
/// propagates as `Err` rather than reporting a validation failure.
pub fn validate_value(
    field: &str,
    value: &str,
    config: &FieldRules,
    registry: &ValidatorRegistry,
) -> Result<Vec<ValidationError>> {
    let mut rules: Vec<_> = config.rules.iter().filter(|r| r.active).collect();
    rules.sort_by_key(|r| r.priority);

    let mut errors = Vec::new();
    for rule in rules {
        match evaluate(&rule.kind, field, value, registry)? {
            RuleOutcome::Pass => {}
            RuleOutcome::Fail => {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: config.message_for(&rule.kind, field),
                    kind: rule.kind.name().to_string(),
                });
                // A missing required value makes the remaining checks noise.
                if matches!(rule.kind, RuleKind::Required) {
                    break;
                }
            }
            RuleOutcome::FailWith(message) => {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message,
                    kind: rule.kind.name().to_string(),
                });
            }
        }
    }

    Ok(errors)
}

fn evaluate(
    kind: &RuleKind,
    field: &str,
    value: &str,
    registry: &ValidatorRegistry,
) -> Result<RuleOutcome> {
    let outcome = match kind {
        RuleKind::Required => {
            if value.trim().is_empty() {
                RuleOutcome::Fail
            } else {
                RuleOutcome::Pass
            }
        }

        RuleKind::Length { min, max, exact } => {
            let len = value.chars().count();
            let too_short = min.is_some_and(|m| len < m);
            let too_long = max.is_some_and(|m| len > m);
            let wrong_exact = exact.is_some_and(|e| len != e);
            if too_short || too_long || wrong_exact {
                RuleOutcome::Fail
            } else {
                RuleOutcome::Pass
            }
        }

        RuleKind::Pattern { pattern } => {
            let regex = Regex::new(pattern).map_err(|e| PortalError::Pattern {
                message: e.to_string(),
                help: Some(format!("Fix the pattern rule configured for '{}'", field)),
            })?;
            if regex.is_match(value) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail
            }
        }

        RuleKind::Range { min, max } => match value.trim().parse::<f64>() {
            Ok(number) => {
                let below = min.is_some_and(|m| number < m);
                let above = max.is_some_and(|m| number > m);
                if below || above {
                    RuleOutcome::Fail
                } else {
                    RuleOutcome::Pass
                }
            }
            Err(_) => {
                // The permissive skip is deliberate: non-numeric input is a
                // job for a pattern rule, not a range rule.
                debug!(field, value, "range rule skipped: value is not numeric");
                RuleOutcome::Pass
            }
        },

        RuleKind::Custom { validator } => match registry.run(validator, value) {
            Some(CustomOutcome::Pass) => RuleOutcome::Pass,
            Some(CustomOutcome::Fail) => RuleOutcome::Fail,
            Some(CustomOutcome::Message(message)) => RuleOutcome::FailWith(message),
            None => {
                warn!(field, validator, "custom rule skipped: validator not registered");
                RuleOutcome::Pass
            }
        },

        RuleKind::Unknown(_) => RuleOutcome::Pass,
    };

    Ok(outcome)
}
