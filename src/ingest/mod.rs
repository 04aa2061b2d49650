//! Ingestion boundary
//!
//! The engine itself never performs I/O; this module is the collaborator
//! that turns the collector's flat-file exports into a [`ResultStore`]:
//!
//! - [`csv`] - reads the collector's CSV export of raw hits
//! - [`terms`] - reads the one-term-per-line search terms file
//!
//! Recoverable input anomalies (malformed timestamps) are dropped and
//! counted here so the core only ever sees well-formed hits.

pub mod csv;
pub mod terms;

use std::path::PathBuf;

use thiserror::Error;

pub use csv::{read_hits, IngestOptions, IngestSummary};
pub use terms::{load_search_terms, TermMatcher};

/// Errors that can occur while reading collector exports
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Search terms file is empty: {}", .0.display())]
    EmptyTermsFile(PathBuf),

    #[error("Invalid search term pattern '{term}': {source}")]
    InvalidTerm {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;
