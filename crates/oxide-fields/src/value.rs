//! Submitted field values.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FieldError, Result};

/// A single submitted value.
///
/// Values arrive as text; the validator may coerce boolean fields to
/// [`FieldValue::Bool`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Raw submitted text.
    Text(String),
    /// A coerced boolean.
    Bool(bool),
}

impl FieldValue {
    /// Returns the value as text.
    ///
    /// Booleans follow the form-post convention: `true` is `"1"` and `false`
    /// is the empty string.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Bool(true) => "1",
            Self::Bool(false) => "",
        }
    }

    /// Returns the length of the textual form in bytes.
    pub fn len(&self) -> usize {
        self.as_text().len()
    }

    /// Returns whether the textual form is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the boolean, if this value has been coerced.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    /// Compares against an option or checkbox value.
    ///
    /// Text compares by string equality. A coerced boolean matches any
    /// value with the same truthiness, so a validated `"Y"` checkbox stays
    /// checked; `""` and `"0"` are the only falsy strings.
    pub fn matches(&self, other: &str) -> bool {
        match self {
            Self::Text(s) => s == other,
            Self::Bool(b) => *b == !(other.is_empty() || other == "0"),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Submitted values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Values {
    values: IndexMap<String, FieldValue>,
}

impl Values {
    /// Creates an empty value mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Gets a value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Gets a mutable value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(name)
    }

    /// Gets the textual form of a value.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(FieldValue::as_text)
    }

    /// Returns whether a value exists for the field.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parses values from a query string or url-encoded form body.
    ///
    /// A repeated key keeps its last value.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let values = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((
                    urlencoding_decode(key),
                    FieldValue::Text(urlencoding_decode(value)),
                ))
            })
            .collect();
        Self { values }
    }

    /// Parses values from a flat JSON object.
    ///
    /// Strings and booleans are kept as-is, numbers become text and `null`
    /// entries are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: IndexMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut values = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => values.insert(name, s),
                serde_json::Value::Bool(b) => values.insert(name, b),
                serde_json::Value::Number(n) => values.insert(name, n.to_string()),
                other => {
                    return Err(FieldError::InvalidValue {
                        field: name,
                        message: format!("expected a scalar, found {other}"),
                    });
                }
            }
        }
        Ok(values)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decodes `%XX` escapes and `+` as space.
fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let decoded = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = decoded {
                    result.push(byte);
                    i += 3;
                    continue;
                }
                result.push(b'%');
            }
            b'+' => result.push(b' '),
            b => result.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&result).into_owned()
}
