//! User financial profile
//!
//! The engine treats a profile as opaque beyond two things: the demographic
//! tag (which parameterises the random factors) and presence checks on the
//! fields a scenario declares as required. Everything else is read by the
//! scenario itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single profile field value.
///
/// Deserialized untagged so YAML/JSON profiles map directly onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Null, empty text and empty collections count as empty.
    /// Numbers and booleans are always present, including `0` and `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A user's financial profile: a demographic tag plus an open set of fields.
///
/// Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Coarse user segment used to select random-parameter defaults
    #[serde(default)]
    pub demographic: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Profile {
    #[must_use]
    pub fn new(demographic: impl Into<String>) -> Self {
        Self {
            demographic: demographic.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Shallow lookup of a top-level field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of a field, `None` if absent or not a number
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_f64)
    }

    /// Whether a field exists and is non-empty
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.field(name).is_some_and(|v| !v.is_empty())
    }

    /// Names from `required` that are missing or empty on this profile
    #[must_use]
    pub fn missing_fields<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.has_value(name))
            .collect()
    }
}
