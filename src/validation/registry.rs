//! Named custom validators.
//!
//! A `custom` rule carries only a validator name; the actual check is
//! resolved here at evaluation time. The portal ships a few banking
//! built-ins; consumers can register their own under new names.

use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a custom validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    /// The value is acceptable.
    Pass,
    /// The value failed; report the field's configured message.
    Fail,
    /// The value failed; report this text instead of the configured message.
    Message(String),
}

type ValidatorFn = Arc<dyn Fn(&str) -> CustomOutcome + Send + Sync>;

/// String-keyed registry of custom validators.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, ValidatorFn>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the portal built-ins:
    /// `iban`, `bic`, and `currency-code`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("iban", validate_iban);
        registry.register("bic", validate_bic);
        registry.register("currency-code", validate_currency_code);
        registry
    }

    /// Register a validator under a name, replacing any existing one.
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&str) -> CustomOutcome + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    /// Run the named validator against a value, or `None` if no validator
    /// is registered under that name.
    pub fn run(&self, name: &str, value: &str) -> Option<CustomOutcome> {
        self.validators.get(name).map(|f| f(value))
    }

    /// Check whether a validator is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}

/// IBAN structure and mod-97 check-digit validation (ISO 13616).
fn validate_iban(value: &str) -> CustomOutcome {
    let iban: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if iban.len() < 15 || iban.len() > 34 {
        return CustomOutcome::Fail;
    }
    let bytes = iban.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_uppercase)
        || !bytes[2..4].iter().all(u8::is_ascii_digit)
        || !bytes.iter().all(u8::is_ascii_alphanumeric)
    {
        return CustomOutcome::Fail;
    }

    // Move the country code and check digits to the end, expand letters to
    // two-digit numbers, and take the whole thing mod 97.
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u32 = 0;
    for c in rearranged.chars() {
        let digit = c.to_digit(36).unwrap_or(0);
        remainder = if digit < 10 {
            (remainder * 10 + digit) % 97
        } else {
            (remainder * 100 + digit) % 97
        };
    }

    if remainder == 1 {
        CustomOutcome::Pass
    } else {
        CustomOutcome::Message("IBAN check digits are invalid".to_string())
    }
}

/// BIC/SWIFT code: 4 bank letters, 2 country letters, 2 location
/// characters, optional 3-character branch.
fn validate_bic(value: &str) -> CustomOutcome {
    let bic = value.trim();
    let bytes = bic.as_bytes();
    if bic.len() != 8 && bic.len() != 11 {
        return CustomOutcome::Fail;
    }
    let ok = bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..].iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if ok {
        CustomOutcome::Pass
    } else {
        CustomOutcome::Fail
    }
}

/// ISO 4217 currency code: exactly three uppercase letters.
fn validate_currency_code(value: &str) -> CustomOutcome {
    let code = value.trim();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        CustomOutcome::Pass
    } else {
        CustomOutcome::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_run() {
        let mut registry = ValidatorRegistry::new();
        registry.register("always-fails", |_| CustomOutcome::Fail);

        assert_eq!(registry.run("always-fails", "x"), Some(CustomOutcome::Fail));
        assert_eq!(registry.run("missing", "x"), None);
    }

    #[test]
    fn test_builtin_iban_valid() {
        // Well-known test IBANs.
        for iban in ["GB82WEST12345698765432", "DE89 3704 0044 0532 0130 00"] {
            assert_eq!(
                ValidatorRegistry::with_builtins().run("iban", iban),
                Some(CustomOutcome::Pass),
                "{} should pass",
                iban
            );
        }
    }

    #[test]
    fn test_builtin_iban_bad_check_digits() {
        let outcome = ValidatorRegistry::with_builtins()
            .run("iban", "GB82WEST12345698765433")
            .unwrap();
        assert_eq!(
            outcome,
            CustomOutcome::Message("IBAN check digits are invalid".to_string())
        );
    }

    #[test]
    fn test_builtin_iban_malformed() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(registry.run("iban", "short"), Some(CustomOutcome::Fail));
        assert_eq!(
            registry.run("iban", "12XX000000000000000000"),
            Some(CustomOutcome::Fail)
        );
    }

    #[test]
    fn test_builtin_bic() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(registry.run("bic", "DEUTDEFF"), Some(CustomOutcome::Pass));
        assert_eq!(registry.run("bic", "DEUTDEFF500"), Some(CustomOutcome::Pass));
        assert_eq!(registry.run("bic", "DEUTDEFF50"), Some(CustomOutcome::Fail));
        assert_eq!(registry.run("bic", "deutdeff"), Some(CustomOutcome::Fail));
    }

    #[test]
    fn test_builtin_currency_code() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(registry.run("currency-code", "EUR"), Some(CustomOutcome::Pass));
        assert_eq!(registry.run("currency-code", "eur"), Some(CustomOutcome::Fail));
        assert_eq!(registry.run("currency-code", "EURO"), Some(CustomOutcome::Fail));
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = ValidatorRegistry::with_builtins();
        registry.register("bic", |_| CustomOutcome::Pass);
        assert_eq!(registry.run("bic", "nonsense"), Some(CustomOutcome::Pass));
    }
}
