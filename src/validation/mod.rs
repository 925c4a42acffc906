//! Validation engine: server-driven field validation.
//!
//! Rule sets are fetched from the portal backend (or any [`RuleSource`]),
//! cached per entity/environment for a short window, and evaluated as an
//! ordered list of typed checks. The same rule set also drives native input
//! constraints and JSON Schema derivation.

pub mod client;
pub mod engine;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod source;

pub use client::{RuleClient, CACHE_TTL, DEFAULT_ENVIRONMENT};
pub use engine::validate_value;
pub use registry::{CustomOutcome, ValidatorRegistry};
pub use rule::{EntityRules, FieldRuleMap, FieldRules, RuleKind, ValidationError, ValidationRule};
pub use schema::{field_schema, fold_constraints, FieldConstraints};
pub use source::{HttpRuleSource, RuleSource, StaticRuleSource};
