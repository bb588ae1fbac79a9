//! Developer-facing listing of a form's fields.
//!
//! The listing is a JSON-like object with one key per field and comment lines
//! describing the question, whether it is required and what values it takes.
//! It is meant as a starting point for writing scripted answers by hand.

use crate::schema::{EMAIL_FIELD_ID, FieldDescriptor, FieldId, FieldKind, PAGE_HISTORY_FIELD_ID};
use serde_json::Value;

/// Formats field listings.
pub struct SchemaFormatter;

impl SchemaFormatter {
    /// Render every field as a `"key": value` line, optionally preceded by comments.
    ///
    /// Fields without a resolved value are rendered with an empty string.
    pub fn format_fields(fields: &[FieldDescriptor], with_comment: bool) -> String {
        let mut result = String::from("{\n");
        for (position, field) in fields.iter().enumerate() {
            if with_comment {
                result.push_str(&Self::format_comment(field));
            }
            let value = field
                .resolved_value
                .as_ref()
                .and_then(|v| serde_json::to_string(v).ok())
                .unwrap_or_else(|| "\"\"".to_string());
            let separator = if position + 1 < fields.len() { "," } else { "" };
            result.push_str(&format!(
                "    \"{}\": {}{}\n",
                field.id.submission_key(),
                value,
                separator
            ));
        }
        result.push('}');
        result
    }

    /// The two comment lines describing a field.
    fn format_comment(field: &FieldDescriptor) -> String {
        let label = field
            .sub_label
            .as_ref()
            .map(|label| format!(": {}", label))
            .unwrap_or_default();
        let required = if field.required { " (required)" } else { "" };
        let mut comment = format!("    # {}{}{}\n", field.container_name, label, required);

        match &field.options {
            Some(options) => {
                let list = Value::from(options.clone());
                comment.push_str(&format!("    #   Options: {}\n", list));
            }
            None => comment.push_str(&format!("    #   Option: {}\n", Self::value_rule(field))),
        }
        comment
    }

    fn value_rule(field: &FieldDescriptor) -> &'static str {
        match (&field.id, field.kind) {
            (FieldId::Reserved(name), FieldKind::Bookkeeping) if name == EMAIL_FIELD_ID => {
                "email address"
            }
            (FieldId::Reserved(name), FieldKind::Bookkeeping) if name == PAGE_HISTORY_FIELD_ID => {
                "from 0 to (number of page - 1)"
            }
            (_, kind) => kind.value_rule(),
        }
    }
}
