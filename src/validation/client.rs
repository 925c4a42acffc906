//! Rule client with a time-boxed cache.
//!
//! `RuleClient` wraps a [`RuleSource`] and caches fetched rule sets per
//! `(entity type, environment)` key for a fixed window. Expiry is checked
//! lazily on each call; there are no background timers, no retries, and no
//! request coalescing — two callers that both observe a cold slot each
//! fetch, and the later write wins.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::validation::engine::validate_value;
use crate::validation::registry::ValidatorRegistry;
use crate::validation::rule::{EntityRules, FieldRuleMap, FieldRules, ValidationError};
use crate::validation::schema::{field_schema, fold_constraints, FieldConstraints};
use crate::validation::source::RuleSource;

/// How long a fetched rule set is reused before re-fetching.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Environment queried when the caller does not care.
pub const DEFAULT_ENVIRONMENT: &str = "all";

type CacheKey = (Option<String>, String);

struct CacheEntry {
    rules: EntityRules,
    fetched_at: Instant,
}

/// Client for server-driven field validation.
pub struct RuleClient<S> {
    source: S,
    registry: ValidatorRegistry,
    ttl: Duration,
    cache: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl<S: RuleSource> RuleClient<S> {
    /// Create a client with the default cache window and the built-in
    /// validator registry.
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, CACHE_TTL)
    }

    /// Create a client with a custom cache window.
    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            registry: ValidatorRegistry::with_builtins(),
            ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The custom validator registry, for registering portal-specific
    /// validators.
    pub fn registry_mut(&mut self) -> &mut ValidatorRegistry {
        &mut self.registry
    }

    /// Fetch the rules mapping for an entity type and environment, served
    /// from cache while the slot is warm.
    ///
    /// A failed fetch is logged and yields an empty mapping; it neither
    /// populates the slot nor erases a previously cached value, so callers
    /// cannot distinguish "no rules configured" from "fetch failed".
    pub fn fetch_rules(&self, entity_type: Option<&str>, environment: &str) -> EntityRules {
        let key: CacheKey = (entity_type.map(str::to_string), environment.to_string());

        {
            let cache = self.lock_cache();
            if let Some(entry) = cache.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(?entity_type, environment, "rules cache hit");
                    return entry.rules.clone();
                }
                debug!(?entity_type, environment, "rules cache expired");
            }
        }

        match self.source.fetch(entity_type, environment) {
            Ok(rules) => {
                let mut cache = self.lock_cache();
                cache.insert(
                    key,
                    CacheEntry {
                        rules: rules.clone(),
                        fetched_at: Instant::now(),
                    },
                );
                rules
            }
            Err(e) => {
                warn!(?entity_type, environment, error = %e, "rules fetch failed");
                EntityRules::new()
            }
        }
    }

    /// The per-entity sub-mapping, or an empty mapping when absent.
    pub fn entity_rules(&self, entity_type: &str, environment: &str) -> FieldRuleMap {
        self.fetch_rules(Some(entity_type), environment)
            .remove(entity_type)
            .unwrap_or_default()
    }

    /// The validation config for one field, if any.
    pub fn field_rules(
        &self,
        entity_type: &str,
        field: &str,
        environment: &str,
    ) -> Option<FieldRules> {
        self.entity_rules(entity_type, environment).remove(field)
    }

    /// Validate a single field value against its server-driven rules.
    ///
    /// A field with no configured rules yields no errors.
    pub fn validate_field(
        &self,
        entity_type: &str,
        field: &str,
        value: &str,
        environment: &str,
    ) -> Result<Vec<ValidationError>> {
        match self.field_rules(entity_type, field, environment) {
            Some(config) => validate_value(field, value, &config, &self.registry),
            None => Ok(Vec::new()),
        }
    }

    /// Validate every field of an input object, concatenating all field
    /// errors in the object's insertion order.
    pub fn validate_object(
        &self,
        entity_type: &str,
        data: &Map<String, Value>,
        environment: &str,
    ) -> Result<Vec<ValidationError>> {
        let fields = self.entity_rules(entity_type, environment);
        let mut errors = Vec::new();

        for (field, value) in data {
            if let Some(config) = fields.get(field) {
                let value = value_as_str(value);
                errors.extend(validate_value(field, &value, config, &self.registry)?);
            }
        }

        Ok(errors)
    }

    /// Flat input constraints for one field, if it has any configured rules.
    pub fn field_constraints(
        &self,
        entity_type: &str,
        field: &str,
        environment: &str,
    ) -> Option<FieldConstraints> {
        self.field_rules(entity_type, field, environment)
            .map(|config| fold_constraints(&config))
    }

    /// Per-field JSON Schema objects for the requested fields, skipping
    /// fields with no configured rules.
    pub fn field_schemas(
        &self,
        entity_type: &str,
        fields: &[String],
        environment: &str,
    ) -> Map<String, Value> {
        let configs = self.entity_rules(entity_type, environment);
        let mut schemas = Map::new();

        for field in fields {
            if let Some(config) = configs.get(field) {
                schemas.insert(field.clone(), field_schema(config));
            }
        }

        schemas
    }

    /// Drop every cached slot unconditionally. The next fetch for any key
    /// always hits the source.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Coerce an arbitrary JSON value to the string the rules run against.
fn value_as_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rule::{RuleKind, ValidationRule};
    use crate::validation::source::StaticRuleSource;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Counts fetches so the tests can observe cache behaviour.
    struct CountingSource {
        inner: StaticRuleSource,
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingSource {
        fn new(rules: EntityRules) -> Self {
            Self {
                inner: StaticRuleSource::new(rules),
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            let source = Self::new(EntityRules::new());
            source.set_fail(true);
            source
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RuleSource for &CountingSource {
        fn fetch(&self, entity_type: Option<&str>, environment: &str) -> Result<EntityRules> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(crate::error::PortalError::Transport {
                    message: "connection refused".to_string(),
                });
            }
            self.inner.fetch(entity_type, environment)
        }
    }

    fn sample_rules() -> EntityRules {
        let iban = FieldRules {
            rules: vec![
                ValidationRule::new(RuleKind::Required, 1),
                ValidationRule::new(
                    RuleKind::Length {
                        min: Some(15),
                        max: Some(34),
                        exact: None,
                    },
                    2,
                ),
            ],
            messages: HashMap::from([(
                "length".to_string(),
                "IBAN length is invalid".to_string(),
            )]),
        };

        let amount = FieldRules {
            rules: vec![ValidationRule::new(
                RuleKind::Range {
                    min: Some(0.01),
                    max: Some(10_000.0),
                },
                1,
            )],
            messages: HashMap::new(),
        };

        let mut account = FieldRuleMap::new();
        account.insert("iban".to_string(), iban);

        let mut payment = FieldRuleMap::new();
        payment.insert("amount".to_string(), amount);

        let mut rules = EntityRules::new();
        rules.insert("account".to_string(), account);
        rules.insert("payment".to_string(), payment);
        rules
    }

    #[test]
    fn test_warm_cache_skips_source() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        client.fetch_rules(Some("account"), "all");
        client.fetch_rules(Some("account"), "all");
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_cache_keyed_per_entity_and_environment() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        client.fetch_rules(Some("account"), "all");
        client.fetch_rules(Some("payment"), "all");
        client.fetch_rules(Some("account"), "sandbox");
        assert_eq!(source.calls(), 3);

        // Each key is warm now.
        client.fetch_rules(Some("account"), "all");
        client.fetch_rules(Some("payment"), "all");
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_expired_slot_refetches() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::with_ttl(&source, Duration::ZERO);

        client.fetch_rules(Some("account"), "all");
        client.fetch_rules(Some("account"), "all");
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_clear_cache_forces_fetch() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        client.fetch_rules(Some("account"), "all");
        client.clear_cache();
        client.fetch_rules(Some("account"), "all");
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_failed_fetch_returns_empty_without_caching() {
        let source = CountingSource::failing();
        let client = RuleClient::new(&source);

        assert!(client.fetch_rules(Some("account"), "all").is_empty());
        // Failure was not cached; the next call fetches again.
        assert!(client.fetch_rules(Some("account"), "all").is_empty());
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_failed_fetch_leaves_warm_entries_alone() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let warm = client.fetch_rules(Some("account"), "all");
        assert!(warm.contains_key("account"));
        source.set_fail(true);

        // A cold key fails and comes back empty...
        assert!(client.fetch_rules(Some("payment"), "all").is_empty());
        // ...while the warm key still serves its cached payload without
        // touching the source.
        assert_eq!(client.fetch_rules(Some("account"), "all"), warm);
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_entity_rules_missing_entity_is_empty() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);
        assert!(client.entity_rules("loan", "all").is_empty());
    }

    #[test]
    fn test_validate_field_through_client() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let errors = client.validate_field("account", "iban", "", "all").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "required");

        let errors = client
            .validate_field("account", "iban", "DE89370400440532013000", "all")
            .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_field_uses_configured_message() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let errors = client
            .validate_field("account", "iban", "DE89", "all")
            .unwrap();
        assert_eq!(errors[0].message, "IBAN length is invalid");
    }

    #[test]
    fn test_validate_field_without_config_passes() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);
        assert!(client
            .validate_field("account", "nickname", "", "all")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_validate_object_concatenates_errors() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let data: Map<String, Value> = serde_json::from_str(
            r#"{ "amount": "99999", "memo": "coffee" }"#,
        )
        .unwrap();

        let errors = client.validate_object("payment", &data, "all").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "amount");
        assert_eq!(errors[0].kind, "range");
    }

    #[test]
    fn test_validate_object_coerces_numbers() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let data: Map<String, Value> = serde_json::from_str(r#"{ "amount": 50 }"#).unwrap();
        assert!(client
            .validate_object("payment", &data, "all")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_field_constraints_through_client() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let constraints = client.field_constraints("account", "iban", "all").unwrap();
        assert!(constraints.required);
        assert_eq!(constraints.min_length, Some(15));

        assert!(client.field_constraints("account", "missing", "all").is_none());
    }

    #[test]
    fn test_field_schemas_skip_unconfigured_fields() {
        let source = CountingSource::new(sample_rules());
        let client = RuleClient::new(&source);

        let schemas = client.field_schemas(
            "account",
            &["iban".to_string(), "nickname".to_string()],
            "all",
        );
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas["iban"]["minLength"], 15);
    }
}
