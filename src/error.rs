//! Error types for the Halberd library.
//!
//! Every fallible engine operation reports failure through the
//! [`HalberdError`] enum. Errors are always returned synchronously; the engine
//! never drops a mutation silently.
//!
//! # Examples
//!
//! ```
//! use halberd::error::{HalberdError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HalberdError::invalid_argument("negative document id"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::DocumentId;

/// The main error type for Halberd operations.
#[derive(Error, Debug)]
pub enum HalberdError {
    /// Invalid caller input: negative ids, control characters, bad settings.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed query syntax (stray or doubled minus, invalid characters).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The id is already used by a live document.
    #[error("Duplicate document: id {0} is already indexed")]
    DuplicateDocument(DocumentId),

    /// The id does not refer to a live document.
    #[error("Document not found: id {0}")]
    DocumentNotFound(DocumentId),

    /// The document has no indexable terms and empty documents are disabled.
    #[error("Empty document: id {0} has no indexable terms")]
    EmptyDocument(DocumentId),

    /// I/O errors (configuration and corpus files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HalberdError.
pub type Result<T> = std::result::Result<T, HalberdError>;

impl HalberdError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HalberdError::InvalidArgument(msg.into())
    }

    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        HalberdError::InvalidQuery(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HalberdError::InvalidArgument(format!("invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HalberdError::Other(msg.into())
    }

    /// True for every kind of rejected caller input, query syntax included.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            HalberdError::InvalidArgument(_) | HalberdError::InvalidQuery(_)
        )
    }
}
