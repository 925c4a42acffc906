//! Rule sources.
//!
//! `RuleSource` is the seam between the validation engine and wherever the
//! rule sets live: the portal backend over HTTP in production, an in-memory
//! mapping for fixtures and offline use.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{PortalError, Result};
use crate::validation::rule::EntityRules;

/// Path of the rules endpoint on the portal backend.
const RULES_PATH: &str = "/api/validation-rules";

/// Default request timeout for the rules endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can produce an entity rules mapping.
pub trait RuleSource {
    /// Fetch the rules for an entity type (or all entities when `None`)
    /// in the given environment.
    fn fetch(&self, entity_type: Option<&str>, environment: &str) -> Result<EntityRules>;
}

/// The `{ "data": ... }` envelope the backend wraps rule payloads in.
#[derive(Debug, Deserialize)]
struct RulePayload {
    #[serde(default)]
    data: EntityRules,
}

/// Fetches rules from the portal backend over HTTP.
pub struct HttpRuleSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpRuleSource {
    /// Create a source against a backend base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PortalError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl RuleSource for HttpRuleSource {
    fn fetch(&self, entity_type: Option<&str>, environment: &str) -> Result<EntityRules> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(entity) = entity_type {
            query.push(("entityType", entity));
        }
        query.push(("environment", environment));

        let url = format!("{}{}", self.base_url, RULES_PATH);
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .map_err(|e| PortalError::Transport {
                message: format!("GET {} failed: {}", url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Transport {
                message: format!("Rules endpoint returned {}", status),
            });
        }

        let payload: RulePayload = response.json().map_err(|e| PortalError::Transport {
            message: format!("Failed to decode rules payload: {}", e),
        })?;

        Ok(payload.data)
    }
}

/// An in-memory rule source for fixtures, tests, and offline work.
#[derive(Debug, Clone, Default)]
pub struct StaticRuleSource {
    rules: EntityRules,
}

impl StaticRuleSource {
    pub fn new(rules: EntityRules) -> Self {
        Self { rules }
    }
}

impl RuleSource for StaticRuleSource {
    fn fetch(&self, entity_type: Option<&str>, _environment: &str) -> Result<EntityRules> {
        match entity_type {
            None => Ok(self.rules.clone()),
            Some(entity) => Ok(self
                .rules
                .get(entity)
                .map(|fields| {
                    let mut filtered = EntityRules::new();
                    filtered.insert(entity.to_string(), fields.clone());
                    filtered
                })
                .unwrap_or_default()),
        }
    }
}
