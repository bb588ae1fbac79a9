//! The contract between the traversal engine and answer synthesis.
//!
//! A [`FillStrategy`] receives one [`FillRequest`] per field, in traversal
//! order, and returns the answer. Any `FnMut(&FillRequest) -> Result<FieldValue, BoxError>`
//! closure is a strategy, and two ready-made ones are bundled:
//!
//! * [`RandomFill`] picks a random option, or today's date/time, per field kind.
//! * [`ScriptedFill`] answers from a JSON configuration and delegates the rest.

use crate::error::BoxError;
use crate::schema::{FieldId, FieldKind, FieldValue};

pub mod random;
pub mod scripted;

pub use random::RandomFill;
pub use scripted::{Roster, ScriptedConfig, ScriptedFill};

/// Everything a strategy may know about the field it is answering.
#[derive(Debug, Clone, Copy)]
pub struct FillRequest<'a> {
    pub kind: FieldKind,
    pub id: &'a FieldId,
    /// Selectable options, already stripped of the free-text sentinel.
    pub options: Option<&'a [String]>,
    pub required: bool,
    pub container_name: &'a str,
    pub sub_label: Option<&'a str>,
}

/// Decides the concrete answer of a field.
///
/// Errors are propagated to the caller of the traversal unchanged.
pub trait FillStrategy {
    fn fill(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, BoxError>;
}

impl<F> FillStrategy for F
where
    F: FnMut(&FillRequest<'_>) -> Result<FieldValue, BoxError>,
{
    fn fill(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, BoxError> {
        self(request)
    }
}
