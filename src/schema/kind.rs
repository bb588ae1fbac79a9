use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of field kinds a form question can have.
///
/// Provider type codes are translated exactly once, in [`FieldKind::from_code`].
/// Codes with no known meaning become [`FieldKind::Unsupported`] instead of
/// silently being treated as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    ShortAnswer,
    Paragraph,
    MultipleChoice,
    Dropdown,
    Checkboxes,
    LinearScale,
    GridChoice,
    /// Section header / page break. Never carries answerable fields.
    SessionMarker,
    Date,
    Time,
    /// Synthetic fields such as `emailAddress` and `pageHistory`.
    Bookkeeping,
    Unsupported(i64),
}

impl FieldKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => FieldKind::ShortAnswer,
            1 => FieldKind::Paragraph,
            2 => FieldKind::MultipleChoice,
            3 => FieldKind::Dropdown,
            4 => FieldKind::Checkboxes,
            5 => FieldKind::LinearScale,
            7 => FieldKind::GridChoice,
            8 => FieldKind::SessionMarker,
            9 => FieldKind::Date,
            10 => FieldKind::Time,
            other => FieldKind::Unsupported(other),
        }
    }

    /// The provider code for this kind, if it has one.
    pub fn code(&self) -> Option<i64> {
        match self {
            FieldKind::ShortAnswer => Some(0),
            FieldKind::Paragraph => Some(1),
            FieldKind::MultipleChoice => Some(2),
            FieldKind::Dropdown => Some(3),
            FieldKind::Checkboxes => Some(4),
            FieldKind::LinearScale => Some(5),
            FieldKind::GridChoice => Some(7),
            FieldKind::SessionMarker => Some(8),
            FieldKind::Date => Some(9),
            FieldKind::Time => Some(10),
            FieldKind::Bookkeeping => None,
            FieldKind::Unsupported(code) => Some(*code),
        }
    }

    /// Whether an answer for this kind is a list of labels rather than a single string.
    pub fn is_multi_select(&self) -> bool {
        matches!(self, FieldKind::Checkboxes)
    }

    /// Human-readable hint for the expected value of free-text kinds.
    pub fn value_rule(&self) -> &'static str {
        match self {
            FieldKind::Date => "YYYY-MM-DD",
            FieldKind::Time => "HH:MM (24h format)",
            _ => "any text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::ShortAnswer => write!(f, "short answer"),
            FieldKind::Paragraph => write!(f, "paragraph"),
            FieldKind::MultipleChoice => write!(f, "multiple choice"),
            FieldKind::Dropdown => write!(f, "dropdown"),
            FieldKind::Checkboxes => write!(f, "checkboxes"),
            FieldKind::LinearScale => write!(f, "linear scale"),
            FieldKind::GridChoice => write!(f, "grid choice"),
            FieldKind::SessionMarker => write!(f, "section"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Time => write!(f, "time"),
            FieldKind::Bookkeeping => write!(f, "bookkeeping"),
            FieldKind::Unsupported(code) => write!(f, "unsupported ({})", code),
        }
    }
}
