use super::{FillRequest, FillStrategy};
use crate::error::{BoxError, FillError};
use crate::schema::{EMAIL_FIELD_ID, FieldId, FieldKind, FieldValue};
use chrono::{Local, NaiveDateTime};
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};

const DEFAULT_EMAIL: &str = "your_email@gmail.com";
const DEFAULT_TEXT: &str = "Ok!";

/// Fills every field with a random but well-formed answer.
///
/// Choice kinds pick uniformly among the options, checkboxes pick a random
/// non-empty subset, dates and times use the current local clock (or a fixed
/// instant set with [`RandomFill::at`]). Optional free-text fields are left empty.
pub struct RandomFill<R: Rng = ThreadRng> {
    rng: R,
    email: String,
    text: String,
    now: Option<NaiveDateTime>,
}

impl RandomFill<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rng())
    }
}

impl Default for RandomFill<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomFill<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            email: DEFAULT_EMAIL.to_string(),
            text: DEFAULT_TEXT.to_string(),
            now: None,
        }
    }

    /// Address used for the responder email field.
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    /// Answer used for required free-text fields.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Pins the clock used for date and time fields.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    fn now(&self) -> NaiveDateTime {
        self.now.unwrap_or_else(|| Local::now().naive_local())
    }

    fn pick_one(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, FillError> {
        request
            .options
            .and_then(|options| options.choose(&mut self.rng))
            .map(|choice| FieldValue::Text(choice.clone()))
            .ok_or_else(|| no_options(request))
    }

    fn pick_many(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, FillError> {
        let options = request
            .options
            .filter(|options| !options.is_empty())
            .ok_or_else(|| no_options(request))?;
        let count = self.rng.random_range(1..=options.len());
        let chosen = options
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect();
        Ok(FieldValue::Multi(chosen))
    }
}

impl<R: Rng> FillStrategy for RandomFill<R> {
    fn fill(&mut self, request: &FillRequest<'_>) -> Result<FieldValue, BoxError> {
        if matches!(request.id, FieldId::Reserved(name) if name == EMAIL_FIELD_ID) {
            return Ok(FieldValue::Text(self.email.clone()));
        }

        let value = match request.kind {
            FieldKind::ShortAnswer | FieldKind::Paragraph => {
                if request.required {
                    FieldValue::Text(self.text.clone())
                } else {
                    FieldValue::Text(String::new())
                }
            }
            FieldKind::MultipleChoice
            | FieldKind::Dropdown
            | FieldKind::LinearScale
            | FieldKind::GridChoice => self.pick_one(request)?,
            FieldKind::Checkboxes => self.pick_many(request)?,
            FieldKind::Date => FieldValue::Text(self.now().format("%Y-%m-%d").to_string()),
            FieldKind::Time => FieldValue::Text(self.now().format("%H:%M").to_string()),
            FieldKind::SessionMarker | FieldKind::Bookkeeping | FieldKind::Unsupported(_) => {
                FieldValue::Text(String::new())
            }
        };
        Ok(value)
    }
}

fn no_options(request: &FillRequest<'_>) -> FillError {
    FillError::NoOptions {
        field: request.id.to_string(),
        kind: request.kind.to_string(),
    }
}
