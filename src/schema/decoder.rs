use super::field::{DecodedForm, FREE_TEXT_OPTION, FieldDescriptor, FieldId, PageMarker, RawEntry};
use super::kind::FieldKind;
use crate::error::SchemaError;
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

/// Positions inside the provider's nested-array schema.
///
/// Nothing outside this module indexes raw schema arrays.
mod layout {
    /// `blob[1]`: the form body.
    pub const FORM: usize = 1;
    /// `blob[1][1]`: the question container list.
    pub const CONTAINERS: usize = 1;
    /// `blob[1][10]`: form-level settings.
    pub const SETTINGS: usize = 10;
    /// `blob[1][10][6]`: email collection mode, values above 1 ask the respondent.
    pub const EMAIL_MODE: usize = 6;

    pub const ITEM_ID: usize = 0;
    pub const ITEM_TITLE: usize = 1;
    pub const ITEM_TYPE: usize = 3;
    pub const ITEM_FIELDS: usize = 4;
    /// Page break only: "after this section, go to" target.
    pub const ITEM_JUMP: usize = 5;

    pub const FIELD_ID: usize = 0;
    pub const FIELD_OPTIONS: usize = 1;
    pub const FIELD_REQUIRED: usize = 2;
    pub const FIELD_LABELS: usize = 3;

    pub const OPTION_LABEL: usize = 0;
    pub const OPTION_NEXT_PAGE: usize = 2;
}

const EXCERPT_LEN: usize = 240;

/// Decodes the raw schema blob into typed entries in a single pass.
#[derive(Debug, Clone, Default)]
pub struct SchemaDecoder {
    only_required: bool,
}

impl SchemaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop fields that are not required. They never reach later stages.
    pub fn only_required(mut self, only_required: bool) -> Self {
        self.only_required = only_required;
        self
    }

    pub fn decode(&self, blob: &Value) -> Result<DecodedForm, SchemaError> {
        debug!(excerpt = %excerpt(blob), "decoding form schema");

        let form = blob.get(layout::FORM).ok_or(SchemaError::MissingContainers)?;
        let containers = form
            .get(layout::CONTAINERS)
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
            .ok_or(SchemaError::MissingContainers)?;

        let entries = containers
            .iter()
            .enumerate()
            .map(|(position, item)| self.decode_item(position, item))
            .collect::<Result<Vec<_>, _>>()?;

        let collects_email = form
            .get(layout::SETTINGS)
            .and_then(|settings| settings.get(layout::EMAIL_MODE))
            .and_then(Value::as_i64)
            .is_some_and(|mode| mode > 1);

        let decoded = DecodedForm {
            entries,
            collects_email,
        };
        debug!(
            entries = decoded.entries.len(),
            fields = decoded.fields().count(),
            page_breaks = decoded.page_break_count(),
            collects_email,
            "schema decoded"
        );
        Ok(decoded)
    }

    fn decode_item(&self, position: usize, item: &Value) -> Result<RawEntry, SchemaError> {
        let malformed = |message: &str| SchemaError::MalformedEntry {
            position,
            message: message.to_string(),
        };

        let item = item
            .as_array()
            .ok_or_else(|| malformed("container is not an array"))?;
        let provider_id = item
            .get(layout::ITEM_ID)
            .and_then(Value::as_i64)
            .ok_or_else(|| malformed("missing item id"))?;
        let title = item.get(layout::ITEM_TITLE).map(text).unwrap_or_default();
        let code = item
            .get(layout::ITEM_TYPE)
            .and_then(Value::as_i64)
            .ok_or_else(|| malformed("missing type code"))?;
        let kind = FieldKind::from_code(code);

        if kind == FieldKind::SessionMarker {
            return Ok(RawEntry::PageBreak(PageMarker {
                provider_id,
                title,
                jump_target: item.get(layout::ITEM_JUMP).and_then(Value::as_i64),
            }));
        }

        let fields = match item.get(layout::ITEM_FIELDS) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(raw_fields)) => raw_fields
                .iter()
                .map(|raw| decode_field(raw, &title, kind).ok_or_else(|| malformed("bad sub-field")))
                .filter_ok(|field| !self.only_required || field.required)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(malformed("sub-field list is not an array")),
        };

        Ok(RawEntry::Question {
            provider_id,
            title,
            kind,
            fields,
        })
    }
}

fn decode_field(raw: &Value, container_name: &str, kind: FieldKind) -> Option<FieldDescriptor> {
    let raw = raw.as_array()?;
    let id = raw.get(layout::FIELD_ID)?.as_i64()?;

    let required = match raw.get(layout::FIELD_REQUIRED) {
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::Bool(b)) => *b,
        _ => false,
    };

    let sub_label = raw
        .get(layout::FIELD_LABELS)
        .and_then(Value::as_array)
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.iter().map(text).join(" - "));

    let mut option_next_page = AHashMap::new();
    let options = match raw.get(layout::FIELD_OPTIONS) {
        Some(Value::Array(raw_options)) if !raw_options.is_empty() => Some(
            raw_options
                .iter()
                .map(|option| {
                    let label = option
                        .get(layout::OPTION_LABEL)
                        .map(text)
                        .filter(|label| !label.is_empty())
                        .unwrap_or_else(|| FREE_TEXT_OPTION.to_string());
                    if let Some(target) = option.get(layout::OPTION_NEXT_PAGE).and_then(Value::as_i64) {
                        option_next_page.insert(label.clone(), target);
                    }
                    label
                })
                .collect(),
        ),
        _ => None,
    };

    Some(FieldDescriptor {
        id: FieldId::Entry(id),
        container_name: container_name.to_string(),
        kind,
        required,
        sub_label,
        options,
        option_next_page,
        resolved_value: None,
    })
}

/// Renders a scalar schema value as a label.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn excerpt(blob: &Value) -> String {
    let raw = blob.to_string();
    if raw.len() <= EXCERPT_LEN {
        return raw;
    }
    let mut end = EXCERPT_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &raw[..end])
}
