use thiserror::Error;

/// Boxed error type returned by fill strategies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that make the form schema unavailable for the current run.
///
/// Every variant is terminal: no partial traversal is attempted once one of
/// these is raised. A `MissingContainers` in particular usually means the form
/// sits behind a login wall or the provider changed its page layout.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to fetch form page '{url}': {message}")]
    Fetch { url: String, message: String },

    #[error("Form page '{url}' answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Embedded schema variable '{0}' not found in the page")]
    VariableNotFound(String),

    #[error("Cannot build a lookup pattern for script variable '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Embedded schema variable '{name}' is not valid JSON: {message}")]
    InvalidJson { name: String, message: String },

    #[error("Schema has no question containers (login required or unknown layout)")]
    MissingContainers,

    #[error("Question container #{position} is malformed: {message}")]
    MalformedEntry { position: usize, message: String },
}

/// Errors that can occur while walking the page graph.
#[derive(Error, Debug)]
pub enum TraversalError {
    /// Raised by the caller-supplied strategy and passed through untouched.
    #[error(transparent)]
    Strategy(BoxError),

    #[error("Traversal exceeded {limit} page visits (last page {page}); conditional jumps form a cycle")]
    StepLimitExceeded { limit: usize, page: usize },
}

/// The submission could not be delivered. Safe to retry the whole run.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to submit to '{url}': {message}")]
    Transport { url: String, message: String },

    #[error("Submission to '{url}' answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },
}

/// Errors raised by the bundled fill strategies.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("Field '{field}' of kind {kind} has no selectable options")]
    NoOptions { field: String, kind: String },

    #[error("Could not read fill configuration '{path}': {message}")]
    ConfigIo { path: String, message: String },

    #[error("Invalid fill configuration: {0}")]
    ConfigParse(String),
}

/// Umbrella error for the end-to-end `Form` workflow.
#[derive(Error, Debug)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
