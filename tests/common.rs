//! Common test utilities for building schema blobs, pages and fakes.
use formfill::prelude::*;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};

/// A free-text question container with a single field.
#[allow(dead_code)]
pub fn text_question(item_id: i64, title: &str, field_id: i64, required: bool) -> Value {
    let required = i64::from(required);
    json!([item_id, title, null, 0, [[field_id, null, required]]])
}

/// A choice question container (`code` 2, 3, 4, 5...) with a single field.
///
/// Each option is `(label, jump target)`.
#[allow(dead_code)]
pub fn choice_question(
    item_id: i64,
    title: &str,
    code: i64,
    field_id: i64,
    options: &[(&str, Option<i64>)],
    required: bool,
) -> Value {
    let options: Vec<Value> = options
        .iter()
        .map(|(label, target)| match target {
            Some(target) => json!([label, null, target]),
            None => json!([label]),
        })
        .collect();
    let required = i64::from(required);
    json!([item_id, title, null, code, [[field_id, options, required]]])
}

/// A page break opening a new page, with an optional "go to" target.
#[allow(dead_code)]
pub fn page_break(item_id: i64, title: &str, jump: Option<i64>) -> Value {
    match jump {
        Some(target) => json!([item_id, title, null, 8, null, target]),
        None => json!([item_id, title, null, 8, null]),
    }
}

/// Wraps containers into the provider's top-level layout.
#[allow(dead_code)]
pub fn form_blob(containers: Vec<Value>, collects_email: bool) -> Value {
    let email_mode = if collects_email { 3 } else { 1 };
    json!([
        null,
        [
            "Form description",
            containers,
            null, null, null, null, null, null,
            "Test form",
            null,
            [null, null, null, null, null, null, email_mode]
        ],
        "/forms",
        "Test form"
    ])
}

/// A minimal form page embedding `blob` the way the provider does.
#[allow(dead_code)]
pub fn html_page(blob: &Value) -> String {
    format!(
        "<html><head><script type=\"text/javascript\" nonce=\"abc\">var FB_PUBLIC_LOAD_DATA_ = {};\n</script></head><body></body></html>",
        blob
    )
}

#[allow(dead_code)]
pub fn decode(blob: &Value) -> DecodedForm {
    SchemaDecoder::new().decode(blob).expect("Failed to decode schema")
}

#[allow(dead_code)]
pub fn build_form(blob: &Value) -> Form {
    Form::from_decoded("https://docs.google.com/forms/d/e/ID/viewform", decode(blob))
}

/// Single page: required text `111` and optional checkboxes `222` with `A`, `B`.
#[allow(dead_code)]
pub fn single_page_blob() -> Value {
    form_blob(
        vec![
            text_question(1, "Name", 111, true),
            choice_question(2, "Pick", 4, 222, &[("A", None), ("B", None)], false),
        ],
        false,
    )
}

/// A dropdown page where `X` submits (self jump to 100) and `Y` continues to page 200.
///
/// Pages: 0 (empty), 1 = dropdown `333` (id 100), 2 = text `444` (id 200).
#[allow(dead_code)]
pub fn branching_blob() -> Value {
    form_blob(
        vec![
            page_break(100, "Choose", None),
            choice_question(3, "Route", 3, 333, &[("X", Some(100)), ("Y", Some(200))], true),
            page_break(200, "Details", None),
            text_question(4, "Details", 444, true),
        ],
        false,
    )
}

/// Always answers `"hello"` for text and the first option for choices.
#[allow(dead_code)]
pub fn first_option(request: &FillRequest<'_>) -> std::result::Result<FieldValue, BoxError> {
    Ok(match (request.kind, request.options) {
        (FieldKind::Checkboxes, Some(options)) => FieldValue::Multi(options[..1].to_vec()),
        (_, Some(options)) if !options.is_empty() => FieldValue::Text(options[0].clone()),
        _ => FieldValue::Text("hello".to_string()),
    })
}

/// A strategy answering `choice` for every choice field and `"hello"` otherwise.
#[allow(dead_code)]
pub fn always_choose(
    choice: &'static str,
) -> impl FnMut(&FillRequest<'_>) -> std::result::Result<FieldValue, BoxError> {
    move |request: &FillRequest<'_>| {
        Ok(match request.options {
            Some(_) => FieldValue::Text(choice.to_string()),
            None => FieldValue::Text("hello".to_string()),
        })
    }
}

/// Serves a fixed page and records every requested URL.
#[allow(dead_code)]
pub struct StaticSource {
    pub html: String,
    pub requested: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl StaticSource {
    pub fn new(html: String) -> Self {
        Self {
            html,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl SchemaSource for StaticSource {
    fn fetch(&self, url: &str) -> std::result::Result<String, SchemaError> {
        self.requested.borrow_mut().push(url.to_string());
        Ok(self.html.clone())
    }
}

/// Records submissions and answers with a fixed HTTP status.
#[allow(dead_code)]
pub struct RecordingTransport {
    pub status: u16,
    pub sent: RefCell<Vec<(String, SubmissionPayload)>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl SubmissionTransport for RecordingTransport {
    fn submit(
        &self,
        url: &str,
        payload: &SubmissionPayload,
    ) -> std::result::Result<(), SubmissionError> {
        self.sent
            .borrow_mut()
            .push((url.to_string(), payload.clone()));
        if self.status == 200 {
            Ok(())
        } else {
            Err(SubmissionError::HttpStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Log output collected by [`capture_logs`].
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a warn-level subscriber installed and returns what it logged.
#[allow(dead_code)]
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    (result, output)
}
