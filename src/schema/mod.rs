//! Decoding of the script-embedded form schema.
//!
//! The provider ships every question, page break and option as one nested
//! JSON array assigned to a script variable. [`extract`] pulls that value out
//! of the page text and [`decoder`] turns it into [`DecodedForm`].

pub mod decoder;
pub mod extract;
pub mod field;
pub mod kind;
pub mod value;

pub use decoder::SchemaDecoder;
pub use extract::{SCHEMA_VARIABLE, extract_schema_blob, extract_script_variable};
pub use field::*;
pub use kind::FieldKind;
pub use value::FieldValue;

use crate::error::SchemaError;

/// Extracts and decodes the schema of a fetched form page.
pub fn decode_page(html: &str, only_required: bool) -> Result<DecodedForm, SchemaError> {
    let blob = extract_schema_blob(html)?;
    SchemaDecoder::new().only_required(only_required).decode(&blob)
}
