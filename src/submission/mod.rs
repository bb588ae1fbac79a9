//! Building the wire-level submission from a finished traversal.

use crate::schema::{FieldDescriptor, FieldValue};
use crate::traversal::TraversalOutcome;
use serde_json::{Map, Value};

/// Converts a view URL into the URL answers are posted to.
///
/// `/viewform` becomes `/formResponse`; any other URL gets `/formResponse`
/// appended unless it already ends with it.
pub fn form_response_url(url: &str) -> String {
    let mut url = url.replace("/viewform", "/formResponse");
    if !url.ends_with("/formResponse") {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str("formResponse");
    }
    url
}

/// Ordered submission key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPayload {
    entries: Vec<(String, FieldValue)>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value submitted under `key`.
    pub fn insert(&mut self, key: String, value: FieldValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat pairs for form encoding; multi-select values become repeated keys.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (key.clone(), v.to_string()))
            })
            .collect()
    }

    /// The payload as a JSON object, keys in insertion order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    FieldValue::Text(s) => Value::String(s.clone()),
                    FieldValue::Multi(items) => {
                        Value::Array(items.iter().cloned().map(Value::String).collect())
                    }
                };
                (key.clone(), json)
            })
            .collect();
        Value::Object(map)
    }
}

/// Flattens filled fields into a payload.
///
/// Fields without a resolved value are skipped.
pub fn assemble<'a>(fields: impl IntoIterator<Item = &'a FieldDescriptor>) -> SubmissionPayload {
    let mut payload = SubmissionPayload::new();
    for field in fields {
        if let Some(value) = &field.resolved_value {
            payload.insert(field.id.submission_key(), value.clone());
        }
    }
    payload
}

impl TraversalOutcome {
    /// The full payload: every filled field, then the page history for multi-page forms.
    pub fn to_payload(&self) -> SubmissionPayload {
        assemble(self.fields.iter().chain(self.page_history_field().as_ref()))
    }
}
