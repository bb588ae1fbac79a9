//! The network edges of a run: fetching the form page and posting answers.

use crate::error::{SchemaError, SubmissionError};
use crate::submission::SubmissionPayload;

mod config;
mod http;

pub use config::ClientConfig;
pub use http::HttpClient;

/// Returns the raw text of a form page.
pub trait SchemaSource {
    fn fetch(&self, url: &str) -> Result<String, SchemaError>;
}

/// Delivers a finished payload to the form's response URL.
pub trait SubmissionTransport {
    fn submit(&self, url: &str, payload: &SubmissionPayload) -> Result<(), SubmissionError>;
}
