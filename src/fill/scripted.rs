use super::{FillRequest, FillStrategy};
use crate::error::{BoxError, FillError};
use crate::schema::FieldValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// Rotates through a list of names, one per day, starting at `start_date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roster {
    /// Submission key (`entry.<id>` or a reserved name) of the field that
    /// receives the name. The bare numeric id is accepted too.
    pub field: String,
    pub names: Vec<String>,
    pub start_date: NaiveDate,
}

impl Roster {
    /// The name on duty for `date`. Dates before `start_date` wrap around.
    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let days = (date - self.start_date).num_days();
        let slot = days.rem_euclid(self.names.len() as i64) as usize;
        self.names.get(slot).map(String::as_str)
    }
}

/// Fixed answers for a recurring submission.
///
/// Keys are submission keys as printed by the field listing (`entry.111`,
/// `emailAddress`). A bare numeric id (`111`) also matches.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScriptedConfig {
    #[serde(default)]
    pub overrides: HashMap<String, FieldValue>,
    #[serde(default)]
    pub roster: Option<Roster>,
}

impl ScriptedConfig {
    /// Load a scripted configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, FillError> {
        let content = fs::read_to_string(path).map_err(|e| FillError::ConfigIo {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, FillError> {
        serde_json::from_str(content).map_err(|e| FillError::ConfigParse(e.to_string()))
    }
}

/// Answers from a [`ScriptedConfig`] and hands every other field to `fallback`.
///
/// The date used by the roster is passed in explicitly, so the same
/// configuration always produces the same answers for the same day.
pub struct ScriptedFill<S> {
    config: ScriptedConfig,
    date: NaiveDate,
    fallback: S,
}

impl<S: FillStrategy> ScriptedFill<S> {
    pub fn for_date(config: ScriptedConfig, date: NaiveDate, fallback: S) -> Self {
        Self {
            config,
            date,
            fallback,
        }
    }
}

impl<S: FillStrategy> FillStrategy for ScriptedFill<S> {
    fn fill(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, BoxError> {
        let keys = [request.id.submission_key(), request.id.to_string()];
        let matches = |candidate: &str| keys.iter().any(|key| key == candidate);

        if let Some(roster) = self.config.roster.as_ref().filter(|r| matches(&r.field)) {
            if let Some(name) = roster.name_for(self.date) {
                return Ok(FieldValue::Text(name.to_string()));
            }
        }
        if let Some(value) = keys.iter().find_map(|key| self.config.overrides.get(key)) {
            return Ok(value.clone());
        }
        self.fallback.fill(request)
    }
}
