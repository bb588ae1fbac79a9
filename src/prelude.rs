//! Prelude module for convenient imports
//!
//! Re-exports the types needed for the usual fetch, fill and submit workflow.
//!
//! # Example
//!
//! ```rust,no_run
//! use formfill::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let client = HttpClient::new(ClientConfig::default())?;
//! let form = Form::builder(&client)
//!     .only_required(true)
//!     .fetch("https://docs.google.com/forms/d/e/FORM_ID/viewform")?;
//!
//! let outcome = form.fill(&mut RandomFill::new())?;
//! let payload = outcome.to_payload();
//! form.submit(&client, &payload)?;
//! # Ok(())
//! # }
//! ```

// Workflow
pub use crate::form::{Form, FormBuilder};
pub use crate::traversal::{Traversal, TraversalOptions, TraversalOutcome};

// Schema model
pub use crate::graph::{Page, PageGraph, Transition, TransitionTable};
pub use crate::schema::{DecodedForm, FieldDescriptor, FieldId, FieldKind, FieldValue, SchemaDecoder};

// Fill strategies
pub use crate::fill::{FillRequest, FillStrategy, RandomFill, ScriptedConfig, ScriptedFill};

// Submission and transport
pub use crate::render::SchemaFormatter;
pub use crate::submission::{SubmissionPayload, form_response_url};
pub use crate::transport::{ClientConfig, HttpClient, SchemaSource, SubmissionTransport};

// Error types
pub use crate::error::{BoxError, FillError, FormError, SchemaError, SubmissionError, TraversalError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
