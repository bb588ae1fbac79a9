use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete answer for one field.
///
/// Serializes untagged, so `Text("a")` becomes `"a"` and `Multi(["a"])`
/// becomes `["a"]`, matching the submission body shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// The value as a single string, or `None` for multi-select answers.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }

    /// Every string carried by this value, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(s) => vec![s.as_str()],
            FieldValue::Multi(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Multi(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Multi(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}
