//! Validation rule model and wire format.
//!
//! The backend describes each rule as `{ "type": <s>, "rules": { ...params },
//! "priority": <i>, "isActive": <b> }`. On this side every rule type is a
//! distinct `RuleKind` variant with typed parameters; the open key-value
//! `rules` map exists only at the wire boundary. Rule types the portal does
//! not recognise deserialize to `RuleKind::Unknown` and evaluate to no error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A typed validation check.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Fails when the trimmed value is empty.
    Required,
    /// Checks string length against min/max/exact bounds, independently.
    Length {
        min: Option<usize>,
        max: Option<usize>,
        exact: Option<usize>,
    },
    /// Tests the value against a regular expression.
    Pattern { pattern: String },
    /// Parses the value as a number and checks min/max bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Delegates to a named validator resolved through the registry.
    Custom { validator: String },
    /// A rule type this build does not know about.
    Unknown(String),
}

impl RuleKind {
    /// The wire name of this rule type, also the key into a field's
    /// message map.
    pub fn name(&self) -> &str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Length { .. } => "length",
            RuleKind::Pattern { .. } => "pattern",
            RuleKind::Range { .. } => "range",
            RuleKind::Custom { .. } => "custom",
            RuleKind::Unknown(name) => name,
        }
    }

    /// The fallback error message when the field config supplies none.
    pub fn default_message(&self, field: &str) -> String {
        match self {
            RuleKind::Required => format!("{} is required", field),
            RuleKind::Length { .. } => format!("{} has an invalid length", field),
            RuleKind::Pattern { .. } => format!("{} has an invalid format", field),
            RuleKind::Range { .. } => format!("{} is out of range", field),
            RuleKind::Custom { .. } | RuleKind::Unknown(_) => format!("{} is invalid", field),
        }
    }
}

/// A single rule: what to check, when to run it, and whether it is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRule", into = "WireRule")]
pub struct ValidationRule {
    pub kind: RuleKind,
    /// Lower priorities run first.
    pub priority: i32,
    /// Inactive rules are skipped entirely.
    pub active: bool,
}

impl ValidationRule {
    /// Create an active rule.
    pub fn new(kind: RuleKind, priority: i32) -> Self {
        Self {
            kind,
            priority,
            active: true,
        }
    }
}

/// The server-supplied validation config for one field: an ordered rule
/// list plus per-rule-type error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl FieldRules {
    /// The error message for a failing rule: the configured message for its
    /// type, or a built-in default.
    pub fn message_for(&self, kind: &RuleKind, field: &str) -> String {
        self.messages
            .get(kind.name())
            .cloned()
            .unwrap_or_else(|| kind.default_message(field))
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    /// The wire name of the failing rule type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// field name → validation config.
pub type FieldRuleMap = HashMap<String, FieldRules>;

/// entity type → field name → validation config.
pub type EntityRules = HashMap<String, FieldRuleMap>;

/// Wire shape of a rule as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRule {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "WireParams::is_empty")]
    rules: WireParams,
    #[serde(default)]
    priority: i32,
    #[serde(default = "default_true")]
    is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validator: Option<String>,
}

impl WireParams {
    fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.exact.is_none()
            && self.pattern.is_none()
            && self.validator.is_none()
    }
}

fn default_true() -> bool {
    true
}

fn as_usize(n: Option<&Number>) -> Option<usize> {
    n.and_then(Number::as_u64).map(|v| v as usize)
}

impl From<WireRule> for ValidationRule {
    fn from(wire: WireRule) -> Self {
        let params = &wire.rules;
        let kind = match wire.kind.as_str() {
            "required" => RuleKind::Required,
            "length" => RuleKind::Length {
                min: as_usize(params.min.as_ref()),
                max: as_usize(params.max.as_ref()),
                exact: params.exact.map(|v| v as usize),
            },
            "pattern" => RuleKind::Pattern {
                pattern: params.pattern.clone().unwrap_or_default(),
            },
            "range" => RuleKind::Range {
                min: params.min.as_ref().and_then(Number::as_f64),
                max: params.max.as_ref().and_then(Number::as_f64),
            },
            "custom" => RuleKind::Custom {
                validator: params.validator.clone().unwrap_or_default(),
            },
            other => RuleKind::Unknown(other.to_string()),
        };

        Self {
            kind,
            priority: wire.priority,
            active: wire.is_active,
        }
    }
}

impl From<ValidationRule> for WireRule {
    fn from(rule: ValidationRule) -> Self {
        let mut params = WireParams::default();
        match &rule.kind {
            RuleKind::Required | RuleKind::Unknown(_) => {}
            RuleKind::Length { min, max, exact } => {
                params.min = min.map(|v| Number::from(v as u64));
                params.max = max.map(|v| Number::from(v as u64));
                params.exact = exact.map(|v| v as u64);
            }
            RuleKind::Pattern { pattern } => params.pattern = Some(pattern.clone()),
            RuleKind::Range { min, max } => {
                params.min = min.and_then(Number::from_f64);
                params.max = max.and_then(Number::from_f64);
            }
            RuleKind::Custom { validator } => params.validator = Some(validator.clone()),
        }

        Self {
            kind: rule.kind.name().to_string(),
            rules: params,
            priority: rule.priority,
            is_active: rule.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_length_rule() {
        let rule: ValidationRule = serde_json::from_str(
            r#"{ "type": "length", "rules": { "min": 3, "max": 10 }, "priority": 2, "isActive": true }"#,
        )
        .unwrap();

        assert_eq!(
            rule,
            ValidationRule::new(
                RuleKind::Length {
                    min: Some(3),
                    max: Some(10),
                    exact: None
                },
                2
            )
        );
    }

    #[test]
    fn test_deserialize_required_without_params() {
        let rule: ValidationRule =
            serde_json::from_str(r#"{ "type": "required", "priority": 1 }"#).unwrap();
        assert_eq!(rule.kind, RuleKind::Required);
        assert!(rule.active);
    }

    #[test]
    fn test_deserialize_range_with_floats() {
        let rule: ValidationRule = serde_json::from_str(
            r#"{ "type": "range", "rules": { "min": 0.01, "max": 5000 }, "priority": 3 }"#,
        )
        .unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::Range {
                min: Some(0.01),
                max: Some(5000.0)
            }
        );
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let rule: ValidationRule = serde_json::from_str(
            r#"{ "type": "checksum", "rules": { "algo": "mod97" }, "priority": 9 }"#,
        )
        .unwrap();
        assert_eq!(rule.kind, RuleKind::Unknown("checksum".to_string()));
    }

    #[test]
    fn test_inactive_flag() {
        let rule: ValidationRule = serde_json::from_str(
            r#"{ "type": "required", "priority": 1, "isActive": false }"#,
        )
        .unwrap();
        assert!(!rule.active);
    }

    #[test]
    fn test_serialize_round_trip() {
        let rule = ValidationRule::new(
            RuleKind::Pattern {
                pattern: "^[A-Z]{2}[0-9]{2}$".to_string(),
            },
            4,
        );
        let json = serde_json::to_string(&rule).unwrap();
        let back: ValidationRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);
    }

    #[test]
    fn test_field_rules_message_fallback() {
        let mut config = FieldRules::default();
        config
            .messages
            .insert("required".to_string(), "IBAN is mandatory".to_string());

        assert_eq!(
            config.message_for(&RuleKind::Required, "iban"),
            "IBAN is mandatory"
        );
        assert_eq!(
            config.message_for(
                &RuleKind::Length {
                    min: None,
                    max: None,
                    exact: None
                },
                "iban"
            ),
            "iban has an invalid length"
        );
    }

    #[test]
    fn test_entity_rules_nested_mapping() {
        let json = r#"{
            "account": {
                "iban": {
                    "rules": [
                        { "type": "required", "priority": 1 },
                        { "type": "length", "rules": { "exact": 22 }, "priority": 2 }
                    ],
                    "messages": { "length": "IBAN must be 22 characters" }
                }
            }
        }"#;

        let rules: EntityRules = serde_json::from_str(json).unwrap();
        let field = &rules["account"]["iban"];
        assert_eq!(field.rules.len(), 2);
        assert_eq!(
            field.rules[1].kind,
            RuleKind::Length {
                min: None,
                max: None,
                exact: Some(22)
            }
        );
    }
}
