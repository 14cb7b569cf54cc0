//! Lenient representations of loosely-typed raw input.
//!
//! Catalog records and UI selections arrive from collaborators that do not
//! guarantee field types: a label field may be a list, a delimited string,
//! a list of objects, a number, or absent. The types and deserializers here
//! accept anything and degrade unusable values to "missing" so that a single
//! malformed field never rejects a whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::canonical::split_delimited;

/// A multi-valued label field as it arrives from a raw record.
///
/// - `Text` is a delimited string (`"edible, medicinal"`), split on
///   `,` `;` `/` when tokenized.
/// - `List` items are taken as-is (trimmed), never split further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawLabels {
    /// Absent, null, or of an unusable type.
    #[default]
    Missing,
    /// A single delimited string.
    Text(String),
    /// A list of labels.
    List(Vec<String>),
}

impl RawLabels {
    /// Interpret an arbitrary JSON value as labels.
    ///
    /// Arrays keep their string items and the `name` of object items
    /// (`{"name": "Green"}`); other items are dropped.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) => RawLabels::Text(s.clone()),
            JsonValue::Array(items) => RawLabels::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        JsonValue::String(s) => Some(s.clone()),
                        JsonValue::Object(map) => {
                            map.get("name").and_then(|n| n.as_str()).map(String::from)
                        }
                        _ => None,
                    })
                    .collect(),
            ),
            _ => RawLabels::Missing,
        }
    }

    /// Individual label tokens, trimmed and non-empty, in input order.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            RawLabels::Missing => Vec::new(),
            RawLabels::Text(text) => split_delimited(text).collect(),
            RawLabels::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Check if there are no usable tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}

impl<'de> Deserialize<'de> for RawLabels {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(RawLabels::from_json(&value))
    }
}

impl From<&str> for RawLabels {
    fn from(s: &str) -> Self {
        RawLabels::Text(s.to_string())
    }
}

impl From<String> for RawLabels {
    fn from(s: String) -> Self {
        RawLabels::Text(s)
    }
}

impl From<Vec<String>> for RawLabels {
    fn from(items: Vec<String>) -> Self {
        RawLabels::List(items)
    }
}

impl From<Vec<&str>> for RawLabels {
    fn from(items: Vec<&str>) -> Self {
        RawLabels::List(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawLabels {
    fn from(items: [&str; N]) -> Self {
        RawLabels::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Deserialize an optional string field, treating non-strings and blank
/// strings as missing.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Deserialize an identifier that may arrive as a string or a number.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize a boolean flag that may arrive as a bool, a number, or a
/// string (`"true"`, `"yes"`, `"1"`). Anything else is `false`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(truthy(&value))
}

/// Truthiness of a raw JSON value, as used by [`lenient_bool`].
pub fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        JsonValue::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    }
}
