//! Field validation rules.
//!
//! A rule is applied in a fixed order: maximum length, minimum length,
//! required (or default substitution), then the type check. Type checks see
//! the value after default substitution.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use crate::error::{Result, ValidationErrors};
use crate::loose;
use crate::value::{FieldValue, Values};

/// Message suffix for a missing required field.
pub const REQUIRED_MESSAGE: &str = " is required";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("email pattern is valid")
});

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
        .expect("numeric pattern is valid")
});

/// Type checks a rule can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// Must look like an email address.
    Email,
    /// Coerced to a boolean; never fails.
    Boolean,
    /// Must be numeric.
    Integer,
    /// Any other tag; no type check.
    Unchecked,
}

impl RuleType {
    /// Resolves a rule type tag. Unknown tags are unchecked.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "email" => Self::Email,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            _ => Self::Unchecked,
        }
    }
}

fn rule_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<RuleType>, D::Error> {
    Ok(loose::opt_text(deserializer)?.map(|tag| RuleType::from_tag(&tag)))
}

/// Validation constraints for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    /// Reject empty and missing values.
    #[serde(default, deserialize_with = "loose::truthy")]
    pub required: bool,
    /// Maximum length in bytes.
    #[serde(default, deserialize_with = "loose::opt_count")]
    pub max_length: Option<usize>,
    /// Minimum length in bytes, checked only for non-empty values.
    #[serde(default, deserialize_with = "loose::opt_count")]
    pub min_length: Option<usize>,
    /// Type check applied last.
    #[serde(rename = "type", default, deserialize_with = "rule_type")]
    pub rule_type: Option<RuleType>,
    /// Substituted for empty or missing optional values.
    #[serde(default, deserialize_with = "loose::opt_text")]
    pub default: Option<String>,
}

impl ValidationRule {
    /// Creates a rule with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the type check.
    #[must_use]
    pub fn of_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = Some(rule_type);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the value injected for empty or missing optional fields.
    pub fn default_field_value(&self) -> FieldValue {
        FieldValue::Text(self.default.clone().unwrap_or_default())
    }

    /// Applies the rule to a value in place.
    ///
    /// Default substitution and boolean coercion are written back even when
    /// a later check fails.
    pub fn apply(&self, value: &mut FieldValue) -> std::result::Result<(), String> {
        let len = value.len();

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(" maximum length is {max}"));
            }
        }

        if let Some(min) = self.min_length {
            if len > 0 && len < min {
                return Err(format!(" minimum length is {min}"));
            }
        }

        if self.required {
            if len == 0 {
                return Err(REQUIRED_MESSAGE.to_string());
            }
        } else if len == 0 {
            *value = self.default_field_value();
        }

        match self.rule_type {
            Some(RuleType::Email) => {
                if !is_email(value.as_text()) {
                    return Err(" is an invalid email address".to_string());
                }
            }
            Some(RuleType::Boolean) => {
                if let FieldValue::Text(text) = value {
                    *value = FieldValue::Bool(is_truthy(text));
                }
            }
            Some(RuleType::Integer) => {
                if !is_numeric(value.as_text()) {
                    return Err(" is not a number".to_string());
                }
            }
            Some(RuleType::Unchecked) | None => {}
        }

        Ok(())
    }
}

/// Validation rules keyed by field name.
///
/// A JSON entry that is not an object reads as a rule with no constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, MaybeRule>")]
pub struct Rules {
    rules: IndexMap<String, ValidationRule>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeRule {
    Rule(ValidationRule),
    Malformed(IgnoredAny),
}

impl From<IndexMap<String, MaybeRule>> for Rules {
    fn from(entries: IndexMap<String, MaybeRule>) -> Self {
        let rules = entries
            .into_iter()
            .map(|(name, rule)| {
                let rule = match rule {
                    MaybeRule::Rule(rule) => rule,
                    MaybeRule::Malformed(_) => {
                        debug!(field = %name, "ignoring malformed rule entry");
                        ValidationRule::default()
                    }
                };
                (name, rule)
            })
            .collect();
        Self { rules }
    }
}

impl Rules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Gets the rule for a field.
    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.get(name)
    }

    /// Iterates over `(name, rule)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parses rules from a JSON object of field name to rule.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON rules file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Validates one value, returning the possibly substituted or coerced value.
pub fn validate_field(
    value: &FieldValue,
    rule: &ValidationRule,
) -> std::result::Result<FieldValue, String> {
    let mut value = value.clone();
    rule.apply(&mut value)?;
    Ok(value)
}

/// Validates every ruled field, fixing up `values` in place.
///
/// Missing optional fields receive their default. Fields without a rule are
/// left alone and never reported.
pub fn validate_all(values: &mut Values, rules: &Rules) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (name, rule) in rules.iter() {
        if let Some(value) = values.get_mut(name) {
            if let Err(message) = rule.apply(value) {
                debug!(field = name, error = %message, "field failed validation");
                errors.insert(name, message);
            }
        } else if rule.required {
            debug!(field = name, "required field missing");
            errors.insert(name, REQUIRED_MESSAGE);
        } else {
            trace!(field = name, "injecting default value");
            values.insert(name, rule.default_field_value());
        }
    }

    errors
}

/// Checks an address against a conventional `local@domain.tld` shape.
pub fn is_email(value: &str) -> bool {
    value.len() <= 254
        && value
            .split_once('@')
            .is_some_and(|(local, _)| !local.is_empty() && local.len() <= 64)
        && !value.contains("..")
        && !value.starts_with('.')
        && !value.contains(".@")
        && EMAIL_REGEX.is_match(value)
}

/// Checks for a decimal number with optional sign, fraction and exponent.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_REGEX.is_match(value)
}

fn is_truthy(value: &str) -> bool {
    ["y", "true", "yes", "on"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}
