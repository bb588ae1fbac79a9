//! # formfill - Schema Extraction and Autofill for Script-Embedded Forms
//!
//! Some public web forms do not describe their questions in HTML at all. The
//! page instead carries one script variable holding a nested JSON array with
//! every question, page break, option and conditional jump, addressed purely
//! by position. **formfill** decodes that blob into typed field descriptors,
//! rebuilds the page graph including branching sections, walks it with a
//! pluggable fill strategy and posts the answers the way the form expects.
//!
//! ## Core Workflow
//!
//! 1.  **Fetch**: A [`transport::SchemaSource`] returns the form page text.
//! 2.  **Decode**: [`schema::SchemaDecoder`] turns the embedded blob into a [`schema::DecodedForm`].
//! 3.  **Build the graph**: [`graph::PageGraph`] splits the entries into pages and
//!     [`graph::TransitionTable`] resolves default and option-level jumps.
//! 4.  **Traverse**: [`traversal::Traversal`] fills each visited page with a
//!     [`fill::FillStrategy`] and follows the jumps the answers trigger.
//! 5.  **Submit**: [`traversal::TraversalOutcome::to_payload`] flattens the answers and a
//!     [`transport::SubmissionTransport`] posts them.
//!
//! [`form::Form`] wires these steps together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formfill::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(ClientConfig::default())?;
//!     let form = Form::builder(&client).fetch("https://docs.google.com/forms/d/e/FORM_ID/viewform")?;
//!
//!     // Any closure can answer the questions.
//!     let mut strategy = |request: &FillRequest<'_>| -> std::result::Result<FieldValue, BoxError> {
//!         Ok(match (request.kind, request.options) {
//!             (FieldKind::Checkboxes, Some(options)) => FieldValue::Multi(options[..1].to_vec()),
//!             (_, Some(options)) => FieldValue::Text(options[0].clone()),
//!             (_, None) => FieldValue::Text("hello".to_string()),
//!         })
//!     };
//!
//!     let payload = form.fill_and_submit(&mut strategy, &client)?;
//!     println!("{}", payload.to_json());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fill;
pub mod form;
pub mod graph;
pub mod prelude;
pub mod render;
pub mod schema;
pub mod submission;
pub mod transport;
pub mod traversal;
