use super::kind::FieldKind;
use super::value::FieldValue;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// Placeholder option label meaning "the respondent may type anything".
pub const FREE_TEXT_OPTION: &str = "!ANY TEXT";

/// Reserved id of the responder email bookkeeping field.
pub const EMAIL_FIELD_ID: &str = "emailAddress";

/// Reserved id of the page history bookkeeping field.
pub const PAGE_HISTORY_FIELD_ID: &str = "pageHistory";

/// Provider-assigned identifier of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FieldId {
    /// A numeric question entry, submitted as `entry.<id>`.
    Entry(i64),
    /// A reserved bookkeeping name, submitted under its literal name.
    Reserved(String),
}

impl FieldId {
    /// The key this field is submitted under.
    pub fn submission_key(&self) -> String {
        match self {
            FieldId::Entry(id) => format!("entry.{}", id),
            FieldId::Reserved(name) => name.clone(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Entry(id) => write!(f, "{}", id),
            FieldId::Reserved(name) => write!(f, "{}", name),
        }
    }
}

/// One answerable input of the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    /// Title of the enclosing question. A grid question hosts several fields.
    pub container_name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Row label of a grid (or other multi-field question); `None` for sole fields.
    pub sub_label: Option<String>,
    /// Selectable option labels; `None` for free-text fields.
    pub options: Option<Vec<String>>,
    /// Option label -> provider id of the page that option jumps to.
    pub option_next_page: AHashMap<String, i64>,
    /// The answer chosen during traversal.
    pub resolved_value: Option<FieldValue>,
}

impl FieldDescriptor {
    /// Creates a synthetic bookkeeping field with a reserved id.
    pub fn bookkeeping(id: &str, container_name: &str, required: bool) -> Self {
        Self {
            id: FieldId::Reserved(id.to_string()),
            container_name: container_name.to_string(),
            kind: FieldKind::Bookkeeping,
            required,
            sub_label: None,
            options: None,
            option_next_page: AHashMap::new(),
            resolved_value: None,
        }
    }

    /// Options with the free-text sentinel removed, as handed to fill strategies.
    pub fn selectable_options(&self) -> Option<Vec<String>> {
        self.options.as_ref().map(|options| {
            options
                .iter()
                .filter(|o| o.as_str() != FREE_TEXT_OPTION)
                .cloned()
                .collect()
        })
    }

    /// Whether choosing an option on this field can redirect the traversal.
    pub fn has_branches(&self) -> bool {
        !self.option_next_page.is_empty()
    }
}

/// A page break in the decoded entry stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMarker {
    /// The provider id other entries use to jump to the page this marker opens.
    pub provider_id: i64,
    pub title: String,
    /// Explicit "after this section go to" target, if declared.
    pub jump_target: Option<i64>,
}

/// One decoded item of the schema, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RawEntry {
    PageBreak(PageMarker),
    Question {
        provider_id: i64,
        title: String,
        kind: FieldKind,
        fields: Vec<FieldDescriptor>,
    },
}

/// The complete result of one decode pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedForm {
    pub entries: Vec<RawEntry>,
    /// The form asks the respondent to type an email address.
    pub collects_email: bool,
}

impl DecodedForm {
    /// All decoded fields in document order, ignoring page boundaries.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                RawEntry::Question { fields, .. } => Some(fields),
                RawEntry::PageBreak(_) => None,
            })
            .flatten()
    }

    pub fn page_break_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, RawEntry::PageBreak(_)))
            .count()
    }
}
