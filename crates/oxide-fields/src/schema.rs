//! Field schema definitions.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{FieldError, Result};
use crate::loose::{self, Loose};

/// The field types the renderer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `<input type="text">`
    Text,
    /// `<input type="hidden">`
    Hidden,
    /// `<textarea>`
    Textarea,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<select>` with schema-supplied options
    Select,
    /// `<input type="date">`
    Date,
    /// `<select>` listing every day until the end of next year
    DateSelect,
    /// Day, month and year select boxes
    Dob,
}

impl FieldType {
    /// Resolves a schema type tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        const TAGS: &[(&str, FieldType)] = &[
            ("text", FieldType::Text),
            ("hidden", FieldType::Hidden),
            ("textarea", FieldType::Textarea),
            ("checkbox", FieldType::Checkbox),
            ("select", FieldType::Select),
            ("date", FieldType::Date),
            ("dateInput", FieldType::Date),
            ("dateSelect", FieldType::DateSelect),
            ("dob", FieldType::Dob),
        ];
        TAGS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, ty)| *ty)
    }

    /// Returns the canonical type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hidden => "hidden",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Date => "date",
            Self::DateSelect => "dateSelect",
            Self::Dob => "dob",
        }
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s).ok_or_else(|| FieldError::UnknownFieldType(s.to_string()))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `values` setting of a schema entry.
///
/// Select boxes need an ordered option map; checkboxes use a single string
/// as the value they compare against. Any scalar reads as a single value,
/// a list as options keyed by position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Loose")]
pub enum OptionValues {
    /// A single value.
    Single(String),
    /// Option value to display label, in display order.
    Options(IndexMap<String, String>),
}

impl From<Loose> for OptionValues {
    fn from(value: Loose) -> Self {
        match value.text() {
            Some(single) => Self::Single(single),
            None => Self::Options(value.into_pairs().unwrap_or_default()),
        }
    }
}

impl OptionValues {
    /// Returns the single value, if this is one.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Options(_) => None,
        }
    }

    /// Returns the option map, if this is one.
    pub fn as_options(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Options(options) => Some(options),
            Self::Single(_) => None,
        }
    }
}

/// Definition of a single form field.
///
/// Attribute values are written into the markup unescaped. Callers must not
/// put untrusted data in them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldSchemaEntry {
    /// Raw type tag. Entries without one are skipped by the renderer.
    #[serde(rename = "type", default, deserialize_with = "loose::opt_text")]
    pub field_type: Option<String>,
    /// Option map for selects, comparison value for checkboxes.
    #[serde(default)]
    pub values: Option<OptionValues>,
    /// HTML attributes, written in insertion order. Scalar values are read
    /// as text; nested ones are dropped.
    #[serde(default, deserialize_with = "loose::text_map")]
    pub attributes: IndexMap<String, String>,
    /// Self-close void elements. Set by the presence of the key alone.
    #[serde(default, deserialize_with = "key_present")]
    pub xhtml: bool,
}

fn key_present<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

impl FieldSchemaEntry {
    /// Creates an entry with the given type tag.
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Default::default()
        }
    }

    /// Creates a text input entry.
    pub fn text() -> Self {
        Self::new("text")
    }

    /// Creates a hidden input entry.
    pub fn hidden() -> Self {
        Self::new("hidden")
    }

    /// Creates a textarea entry.
    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    /// Creates a checkbox entry comparing against the default `"Y"`.
    pub fn checkbox() -> Self {
        Self::new("checkbox")
    }

    /// Creates a select entry with the given `(value, label)` options.
    pub fn select<V, L>(options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self::new("select").options(options)
    }

    /// Creates a free-text date input entry.
    pub fn date() -> Self {
        Self::new("date")
    }

    /// Creates a date select entry.
    pub fn date_select() -> Self {
        Self::new("dateSelect")
    }

    /// Creates a date of birth entry.
    pub fn dob() -> Self {
        Self::new("dob")
    }

    /// Resolves the type tag.
    pub fn kind(&self) -> Option<FieldType> {
        self.field_type.as_deref().and_then(FieldType::from_tag)
    }

    /// Sets an HTML attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets a single value, e.g. a checkbox comparison value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values = Some(OptionValues::Single(value.into()));
        self
    }

    /// Sets the option map.
    #[must_use]
    pub fn options<V, L>(mut self, options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.values = Some(OptionValues::Options(
            options
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
        ));
        self
    }

    /// Enables XHTML self-closing tags.
    #[must_use]
    pub fn xhtml(mut self) -> Self {
        self.xhtml = true;
        self
    }
}

/// An ordered set of named field definitions.
///
/// A JSON entry that is not an object is kept as an untyped entry, which the
/// renderer skips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, MaybeEntry>")]
pub struct Schema {
    fields: IndexMap<String, FieldSchemaEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeEntry {
    Entry(FieldSchemaEntry),
    Malformed(IgnoredAny),
}

impl From<IndexMap<String, MaybeEntry>> for Schema {
    fn from(entries: IndexMap<String, MaybeEntry>) -> Self {
        let fields = entries
            .into_iter()
            .map(|(name, entry)| {
                let entry = match entry {
                    MaybeEntry::Entry(entry) => entry,
                    MaybeEntry::Malformed(_) => {
                        debug!(field = %name, "ignoring malformed schema entry");
                        FieldSchemaEntry::default()
                    }
                };
                (name, entry)
            })
            .collect();
        Self { fields }
    }
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the schema.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, entry: FieldSchemaEntry) -> Self {
        self.insert(name, entry);
        self
    }

    /// Adds or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, entry: FieldSchemaEntry) {
        self.fields.insert(name.into(), entry);
    }

    /// Gets a field definition.
    pub fn get(&self, name: &str) -> Option<&FieldSchemaEntry> {
        self.fields.get(name)
    }

    /// Iterates over `(name, entry)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchemaEntry)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a schema from a JSON object of field name to entry.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        assert_eq!(FieldType::from_tag("text"), Some(FieldType::Text));
        assert_eq!(FieldType::from_tag("dateSelect"), Some(FieldType::DateSelect));
        assert_eq!(FieldType::from_tag("dateinput"), Some(FieldType::Date));
        assert_eq!(FieldType::from_tag("DOB"), Some(FieldType::Dob));
        assert_eq!(FieldType::from_tag("radio"), None);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "radio".parse::<FieldType>().unwrap_err();
        assert!(matches!(err, FieldError::UnknownFieldType(ref t) if t == "radio"));
        assert_eq!("Select".parse::<FieldType>().unwrap(), FieldType::Select);
    }

    #[test]
    fn test_entry_builder() {
        let entry = FieldSchemaEntry::select([("Mr", "Mr"), ("Mrs", "Mrs")])
            .attr("id", "title")
            .xhtml();
        assert_eq!(entry.kind(), Some(FieldType::Select));
        assert!(entry.xhtml);
        assert_eq!(entry.attributes.get("id"), Some(&"title".to_string()));
        let options = entry.values.as_ref().and_then(OptionValues::as_options).unwrap();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_parse_json_schema() {
        let schema = Schema::from_json(
            r#"{
                "title": {
                    "type": "select",
                    "values": {"Mr": "Mr", "Mrs": "Mrs", "Ms": "Ms"},
                    "attributes": {"id": "title"}
                },
                "agree": {"type": "checkbox", "values": "yes", "xhtml": false},
                "note": {"attributes": {"class": "x"}}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["title", "agree", "note"]);

        let title = schema.get("title").unwrap();
        let options: Vec<_> = title
            .values
            .as_ref()
            .and_then(OptionValues::as_options)
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(options, ["Mr", "Mrs", "Ms"]);
        assert!(!title.xhtml);

        let agree = schema.get("agree").unwrap();
        assert!(agree.xhtml);
        assert_eq!(agree.values.as_ref().and_then(OptionValues::as_single), Some("yes"));

        assert_eq!(schema.get("note").unwrap().field_type, None);
    }

    #[test]
    fn test_parse_loosely_typed_entries() {
        let schema = Schema::from_json(
            r#"{
                "bio": {"type": "textarea", "attributes": {"rows": 4, "cols": 40.5, "required": true, "nested": {"a": 1}}},
                "rating": {"type": "select", "values": {"1": 1, "2": 2}},
                "count": {"type": "select", "values": 5},
                "title": {"type": "select", "values": ["Mr", "Mrs"]},
                "odd": {"type": 7, "attributes": "id"},
                "broken": "text",
                "name": {"type": "text"}
            }"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 7);

        let bio: Vec<_> = schema
            .get("bio")
            .unwrap()
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(bio, [("rows", "4"), ("cols", "40.5"), ("required", "1")]);

        let rating = schema.get("rating").unwrap().values.as_ref();
        let rating = rating.and_then(OptionValues::as_options).unwrap();
        assert_eq!(rating.get("2").map(String::as_str), Some("2"));

        let count = schema.get("count").unwrap().values.as_ref();
        assert_eq!(count.and_then(OptionValues::as_single), Some("5"));

        let title = schema.get("title").unwrap().values.as_ref();
        let title = title.and_then(OptionValues::as_options).unwrap();
        assert_eq!(title.get("1").map(String::as_str), Some("Mrs"));

        let odd = schema.get("odd").unwrap();
        assert_eq!(odd.field_type.as_deref(), Some("7"));
        assert_eq!(odd.kind(), None);
        assert!(odd.attributes.is_empty());

        assert_eq!(schema.get("broken").unwrap(), &FieldSchemaEntry::default());
        assert_eq!(schema.get("name").unwrap().kind(), Some(FieldType::Text));
    }

    #[test]
    fn test_null_values_are_absent() {
        let schema = Schema::from_json(r#"{"c": {"type": null, "values": null}}"#).unwrap();
        let entry = schema.get("c").unwrap();
        assert_eq!(entry.field_type, None);
        assert_eq!(entry.values, None);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            Schema::from_json("{not json"),
            Err(FieldError::Json(_))
        ));
    }
}
