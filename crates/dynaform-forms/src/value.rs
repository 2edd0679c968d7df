//! Field values and the maps the form state keeps.
//!
//! A form holds two maps keyed by field `name`:
//!
//! - [`FormValues`]: what the user entered. A key is present only for fields
//!   that were touched or carried a default; a missing key means empty/false.
//! - [`FormErrors`]: the current error message per field. A missing key means
//!   no error; a present key always maps to a non-empty message.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The value held by a single field.
///
/// Text-like kinds, selects, radios, and textareas hold [`FieldValue::Text`];
/// checkboxes hold [`FieldValue::Bool`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean answer (checkbox).
    Bool(bool),
    /// A string answer.
    Text(String),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns `true` if the value counts as "not answered" for the required check.
    ///
    /// Only the empty string is blank. An explicit `false` is an answer and
    /// is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) => false,
        }
    }

    /// Returns `true` if the value is non-empty and not `false`.
    ///
    /// Format checks (email shape, custom pattern) only run on truthy values.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }

    /// Returns the value as text, as a browser would stringify it.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
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

/// Current values, keyed by field name.
pub type FormValues = HashMap<String, FieldValue>;

/// Current error messages, keyed by field name.
pub type FormErrors = HashMap<String, String>;

/// Converts a values map to a JSON object with keys in sorted order.
pub fn values_to_json(values: &FormValues) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = values
        .iter()
        .map(|(k, v)| {
            let json = match v {
                FieldValue::Bool(b) => serde_json::Value::Bool(*b),
                FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            };
            (k.clone(), json)
        })
        .collect();
    serde_json::Value::Object(map)
}
