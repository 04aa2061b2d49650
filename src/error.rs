//! Unified error handling for the tgtrends crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single [`Error`] enum, while keeping the
//! domain errors usable on their own.
//!
//! # Architecture
//!
//! - [`TrendsErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping the domain-specific errors

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::analytics::TrendError;
pub use crate::ingest::IngestError;

/// Common trait for all tgtrends error types
///
/// Provides a unified interface for error handling across modules,
/// enabling consistent error processing strategies.
pub trait TrendsErrorTrait: std::error::Error {
    /// Check if this error is recoverable (the run can continue)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input and ingestion errors
    Ingest,
    /// Analysis precondition violations
    Analysis,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl TrendsErrorTrait for IngestError {
    fn is_recoverable(&self) -> bool {
        // a bad export file or terms file needs user action
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Storage,
            Self::Csv(_) | Self::EmptyTermsFile(_) | Self::InvalidTerm { .. } => {
                ErrorCategory::Ingest
            }
        }
    }
}

impl TrendsErrorTrait for TrendError {
    fn is_recoverable(&self) -> bool {
        // channel mixing is a precondition violation, not a transient fault
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Analysis
    }
}

/// Unified error type for the tgtrends crate
///
/// Wraps the domain-specific errors, providing a single error type usable
/// across module boundaries while preserving the detailed error
/// information.
#[derive(Error, Debug)]
pub enum Error {
    /// Trend analysis errors
    #[error("Analysis error: {0}")]
    Trend(#[from] TrendError),

    /// Ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TrendsErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Trend(e) => e.is_recoverable(),
            Self::Ingest(e) => e.is_recoverable(),
            Self::Io(_) => true, // I/O errors are often transient
            Self::Csv(_) => false,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Trend(e) => e.category(),
            Self::Ingest(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Csv(_) | Self::Json(_) => ErrorCategory::Ingest,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
