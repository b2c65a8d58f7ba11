//! Error types for termscope.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TermscopeError`] enum. Request-level failures (a bad taxonomy source, an
//! empty document) abort the request; page-level rendering failures are
//! recovered by the annotator and only surface as skipped pages.
//!
//! # Examples
//!
//! ```
//! use termscope::error::{Result, TermscopeError};
//!
//! fn load() -> Result<()> {
//!     Err(TermscopeError::schema("missing column 'Keywords'"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::PageNumber;

/// The main error type for termscope operations.
#[derive(Error, Debug)]
pub enum TermscopeError {
    /// I/O errors (reading documents, scratch files, output files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required column is absent from a taxonomy source, or a category
    /// tag has no schema.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The document has zero pages.
    #[error("Empty document: {0} has no pages")]
    EmptyDocument(String),

    /// A single page failed to render.
    #[error("Render error on page {page}: {message}")]
    Render { page: PageNumber, message: String },

    /// A scoped temporary artifact could not be released. Only ever logged.
    #[error("Resource cleanup warning: {0}")]
    Cleanup(String),

    /// A document could not be opened or its pages could not be read.
    #[error("Document error: {0}")]
    Document(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for operations that may fail with TermscopeError.
pub type Result<T> = std::result::Result<T, TermscopeError>;

impl TermscopeError {
    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        TermscopeError::Schema(msg.into())
    }

    /// Create a new empty document error.
    pub fn empty_document<S: Into<String>>(name: S) -> Self {
        TermscopeError::EmptyDocument(name.into())
    }

    /// Create a new page-scoped render error.
    pub fn render<S: Into<String>>(page: PageNumber, msg: S) -> Self {
        TermscopeError::Render {
            page,
            message: msg.into(),
        }
    }

    /// Create a new cleanup warning.
    pub fn cleanup<S: Into<String>>(msg: S) -> Self {
        TermscopeError::Cleanup(msg.into())
    }

    /// Create a new document error.
    pub fn document<S: Into<String>>(msg: S) -> Self {
        TermscopeError::Document(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TermscopeError::InvalidArgument(msg.into())
    }

    /// Whether this error only affects a single page and can be skipped.
    pub fn is_page_scoped(&self) -> bool {
        matches!(self, TermscopeError::Render { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TermscopeError::schema("missing column 'Keywords'");
        assert_eq!(error.to_string(), "Schema error: missing column 'Keywords'");

        let error = TermscopeError::empty_document("report.pdf");
        assert_eq!(error.to_string(), "Empty document: report.pdf has no pages");

        let error = TermscopeError::render(3, "unsupported content stream");
        assert_eq!(
            error.to_string(),
            "Render error on page 3: unsupported content stream"
        );
        assert!(error.is_page_scoped());
        assert!(!TermscopeError::invalid_argument("k").is_page_scoped());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TermscopeError::from(io_error);

        match error {
            TermscopeError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
