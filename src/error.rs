//! Error types for the search engine.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`SearchError`] enum. Validation failures are reported synchronously and
//! never retried internally.
//!
//! # Examples
//!
//! ```
//! use search_server::error::{Result, SearchError};
//!
//! fn lookup(id: i32) -> Result<()> {
//!     Err(SearchError::UnknownDocument(id))
//! }
//!
//! match lookup(7) {
//!     Ok(_) => println!("found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::document::DocumentId;

/// The main error type for search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The id is negative or already present in the index.
    #[error("Invalid document id: {0} is negative or already indexed")]
    DuplicateOrInvalidId(DocumentId),

    /// A document or query term contains a control character.
    #[error("Invalid term: {0:?} contains a control character")]
    InvalidTerm(String),

    /// A query term is empty or malformed after stripping the negation marker.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The document does not exist.
    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),

    /// The document has no indexable terms or no ratings.
    #[error("Empty document: {0}")]
    EmptyDocument(String),

    /// Construction input (for example a stop word) is invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Engine configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidQuery(msg.into())
    }

    /// Create a new empty document error.
    pub fn empty_document<S: Into<String>>(msg: S) -> Self {
        SearchError::EmptyDocument(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidInput(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SearchError::UnknownDocument(42);
        assert_eq!(error.to_string(), "Unknown document: 42");

        let error = SearchError::invalid_query("bare '-'");
        assert_eq!(error.to_string(), "Invalid query: bare '-'");

        let error = SearchError::DuplicateOrInvalidId(-1);
        assert_eq!(
            error.to_string(),
            "Invalid document id: -1 is negative or already indexed"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = SearchError::from(json_error);

        match error {
            SearchError::Json(_) => {} // Expected
            _ => panic!("Expected JSON error variant"),
        }
    }
}
