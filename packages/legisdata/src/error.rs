//! Error types for the parser.
//!
//! Only file-level and invocation failures are errors. A node that matches no
//! rule is reported as a [`Diagnostic`](crate::types::Diagnostic), never as an error.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The partitioned document contained no elements.
    #[error("Document has no elements: {source_path}")]
    EmptyDocument { source_path: String },

    /// The first element of an inquiry document is not an inquiry heading.
    #[error("Not an inquiry document (first element is not an inquiry heading): {source_path}")]
    MissingInquiryHeading { source_path: String },

    /// The scan was aborted before reaching the end of the document.
    #[error("Scan cancelled")]
    Cancelled,

    /// Invalid sitting year.
    #[error("Invalid year: '{0}'. Expected a four digit year between 1900 and 2100")]
    InvalidYear(String),

    /// Invalid session number.
    #[error("Invalid session: '{0}'. Expected a session number of 1 or more")]
    InvalidSession(String),

    /// Input path does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Output directory is the directory an input is read from.
    #[error("Output directory {} contains input {}; choose a separate output directory", .output.display(), .input.display())]
    OutputIsInputDir { output: PathBuf, input: PathBuf },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Markup generation failed.
    #[error("XML generation failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
