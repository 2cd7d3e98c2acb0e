//! Error types for field schemas and validation.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading schemas, rules or values.
///
/// Rendering and validation never produce these; they only come from the
/// document-loading helpers.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A schema or rule document could not be parsed.
    #[error("failed to parse field document: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema or rule document could not be read.
    #[error("failed to read field document: {0}")]
    Io(#[from] std::io::Error),

    /// A field type tag has no builder.
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    /// Invalid field value.
    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Validation errors keyed by field name, in rule order.
///
/// Each message is a suffix meant to follow the field label, e.g.
/// `" is required"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: IndexMap<String, String>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: IndexMap::new(),
        }
    }

    /// Records the error for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field failed validation.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}{message}")?;
        }
        Ok(())
    }
}

/// Result type alias for field document operations.
pub type Result<T> = std::result::Result<T, FieldError>;
