//! Error types

use markq_html::ErrorRecord;
use markq_xpath::XPathError;

/// A load produced at least one fatal diagnostic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Fatal parse error {}: {}", .record.code, .record.message)]
pub struct FatalParseError {
    /// First fatal diagnostic the engine reported for the load
    pub record: ErrorRecord,
}

impl FatalParseError {
    pub fn new(record: ErrorRecord) -> Self {
        Self { record }
    }

    pub fn code(&self) -> u32 {
        self.record.code
    }

    pub fn message(&self) -> &str {
        &self.record.message
    }
}

impl From<FatalParseError> for ErrorRecord {
    fn from(err: FatalParseError) -> Self {
        err.record
    }
}

/// Element query errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("No nodes match query: {query}")]
    ElementNotFound { query: String },

    /// The query matched only non-element nodes (attributes, text, ...)
    #[error("Query matched nodes but none were elements: {query}")]
    NoElementMatches { query: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Query failed: {0}")]
    Query(#[from] XPathError),
}

impl QueryError {
    /// Whether this is one of the two not-found conditions
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QueryError::ElementNotFound { .. } | QueryError::NoElementMatches { .. }
        )
    }
}
