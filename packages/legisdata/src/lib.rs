//! Legisdata - Rebuild legislative transcript structure from partitioned PDFs.
//!
//! A PDF partitioner turns Hansard transcripts and inquiry documents into flat
//! sequences of typed elements. This crate scans those sequences and rebuilds
//! the attendance roster, the debate and the question-and-answer records, then
//! writes them as JSON with an Akoma Ntoso style markup rendering attached.
//!
//! # Example
//!
//! ```
//! use legisdata::config;
//!
//! // Validate year and session
//! assert!(config::validate_year("2024").is_ok());
//! assert!(config::validate_session("1").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, label tables and validation
//! - [`node`]: Partitioned input elements
//! - [`types`]: Record types (persons, debate entries, inquiries)
//! - [`error`]: Error types and Result alias
//! - [`predicates`]: Node classification predicates
//! - [`hansard`]: Transcript driver and its ordered rule table
//! - [`inquiry`]: Inquiry driver
//! - [`akn`]: Markup rendering
//! - [`output`]: JSON output naming and writing
//! - [`batch`]: Parallel multi-file processing
//! - [`cli`]: Command-line interface

pub mod akn;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod hansard;
pub mod inquiry;
pub mod node;
pub mod output;
pub mod predicates;
pub mod types;

// Re-export main functions
pub use hansard::parse_hansard;
pub use inquiry::parse_inquiry;

// Re-export commonly used items
pub use config::{validate_session, validate_year, ParseOptions};
pub use error::{ParserError, Result};
pub use node::SourceNode;
pub use types::{HansardRecord, InquiryRecord, Meta, PersonRef};
