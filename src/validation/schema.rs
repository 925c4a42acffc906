//! Derived field descriptions.
//!
//! Two flattened views over a field's rule list: native HTML input
//! constraints, and a per-field JSON Schema object for external schema
//! validators.

use serde::Serialize;
use serde_json::{json, Value};

use crate::validation::rule::{FieldRules, RuleKind};

/// Flat constraint record for driving native input attributes.
///
/// When several active rules of the same kind appear, later rules
/// overwrite earlier ones; there is no merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConstraints {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Fold a field's active rules into a flat constraint record.
pub fn fold_constraints(config: &FieldRules) -> FieldConstraints {
    let mut constraints = FieldConstraints::default();

    for rule in config.rules.iter().filter(|r| r.active) {
        match &rule.kind {
            RuleKind::Required => constraints.required = true,
            RuleKind::Length { min, max, exact } => {
                constraints.min_length = *min;
                constraints.max_length = *max;
                constraints.exact_length = *exact;
            }
            RuleKind::Pattern { pattern } => constraints.pattern = Some(pattern.clone()),
            RuleKind::Range { min, max } => {
                constraints.min = *min;
                constraints.max = *max;
            }
            RuleKind::Custom { .. } | RuleKind::Unknown(_) => {}
        }
    }

    constraints
}

/// Build a JSON Schema object for one field from its active rules.
///
/// `required` maps to `minLength: 1`, exact length pins both bounds, and
/// pattern rules are embedded verbatim. Range rules describe numeric input
/// carried as strings, so they contribute nothing to the string schema.
pub fn field_schema(config: &FieldRules) -> Value {
    let mut object = serde_json::Map::new();
    object.insert("type".to_string(), json!("string"));

    for rule in config.rules.iter().filter(|r| r.active) {
        match &rule.kind {
            RuleKind::Required => {
                object.entry("minLength").or_insert(json!(1));
            }
            RuleKind::Length { min, max, exact } => {
                if let Some(exact) = exact {
                    object.insert("minLength".to_string(), json!(exact));
                    object.insert("maxLength".to_string(), json!(exact));
                } else {
                    if let Some(min) = min {
                        object.insert("minLength".to_string(), json!(min));
                    }
                    if let Some(max) = max {
                        object.insert("maxLength".to_string(), json!(max));
                    }
                }
            }
            RuleKind::Pattern { pattern } => {
                object.insert("pattern".to_string(), json!(pattern));
            }
            RuleKind::Range { .. } | RuleKind::Custom { .. } | RuleKind::Unknown(_) => {}
        }
    }

    Value::Object(object)
}
