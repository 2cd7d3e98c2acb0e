//! Lenient decoding of hand-written JSON documents.
//!
//! Schema and rule files come from people, not serializers: `"rows": 4`,
//! `"required": 1` and option lists all turn up. Every JSON value decodes
//! into [`Loose`], which then converts the way a form post would read it.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Any JSON value, with object keys kept in document order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Loose>),
    Map(IndexMap<String, Loose>),
}

impl Loose {
    /// Returns the textual form of a scalar.
    ///
    /// `true` reads as `"1"`, `false` and `null` as the empty string. Lists
    /// and maps have no textual form.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Bool(false) => Some(String::new()),
            Self::Bool(true) => Some("1".to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Returns whether the value counts as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::UInt(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::Text(s) => !(s.is_empty() || s == "0"),
            Self::List(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
        }
    }

    /// Returns the value as a non-negative count, if it reads as one.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Int(n) => usize::try_from(*n).ok(),
            Self::UInt(n) => usize::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Converts a map or list into text pairs.
    ///
    /// Lists are keyed by position. Entries without a textual form are
    /// dropped; scalars have no pairs.
    pub fn into_pairs(self) -> Option<IndexMap<String, String>> {
        match self {
            Self::Map(entries) => Some(
                entries
                    .into_iter()
                    .filter_map(|(k, v)| v.text().map(|t| (k, t)))
                    .collect(),
            ),
            Self::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.text().map(|t| (i.to_string(), t)))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Reads an optional scalar as text; `null` reads as absent.
pub fn opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Null => None,
        value => value.text(),
    })
}

/// Reads a map of scalars as text; anything that is not a map is empty.
pub fn text_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, String>, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        value @ Loose::Map(_) => value.into_pairs().unwrap_or_default(),
        _ => IndexMap::new(),
    })
}

/// Reads any value by truthiness.
pub fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Loose::deserialize(deserializer)?.is_truthy())
}

/// Reads an optional count; values that are not counts read as absent.
pub fn opt_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    Ok(Loose::deserialize(deserializer)?.count())
}
