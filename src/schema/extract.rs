use crate::error::SchemaError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Name of the script variable holding the form schema blob.
pub const SCHEMA_VARIABLE: &str = "FB_PUBLIC_LOAD_DATA_";

static SCHEMA_ASSIGNMENT: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn assignment_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"var\s+{}\s*=\s*", regex::escape(name)))
}

fn pattern_error(name: &str, error: &regex::Error) -> SchemaError {
    SchemaError::InvalidPattern {
        name: name.to_string(),
        message: error.to_string(),
    }
}

/// Finds `var <name> = <json>;` in page text and parses the right-hand side.
///
/// Parsing stops at the end of the first complete JSON value, so semicolons
/// inside string literals do not cut the blob short.
pub fn extract_script_variable(name: &str, html: &str) -> Result<Value, SchemaError> {
    let pattern = assignment_pattern(name).map_err(|e| pattern_error(name, &e))?;
    parse_assignment(&pattern, name, html)
}

/// Extracts the form schema blob from a fetched form page.
pub fn extract_schema_blob(html: &str) -> Result<Value, SchemaError> {
    let pattern = SCHEMA_ASSIGNMENT
        .get_or_init(|| assignment_pattern(SCHEMA_VARIABLE))
        .as_ref()
        .map_err(|e| pattern_error(SCHEMA_VARIABLE, e))?;
    parse_assignment(pattern, SCHEMA_VARIABLE, html)
}

fn parse_assignment(pattern: &Regex, name: &str, html: &str) -> Result<Value, SchemaError> {
    let found = pattern
        .find(html)
        .ok_or_else(|| SchemaError::VariableNotFound(name.to_string()))?;

    let rest = &html[found.end()..];
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(SchemaError::InvalidJson {
            name: name.to_string(),
            message: e.to_string(),
        }),
        None => Err(SchemaError::InvalidJson {
            name: name.to_string(),
            message: "assignment has no value".to_string(),
        }),
    }
}
