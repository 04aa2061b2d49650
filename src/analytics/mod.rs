//! Trend aggregation and normalization engine
//!
//! This module turns raw per-message search hits into aligned daily time
//! series:
//!
//! - [`daily`] - per-term daily mention counts
//! - [`traffic`] - estimated total channel volume per day
//! - [`align`] - reindexing onto a common daily axis
//! - [`ratio`] - cumulative mention-to-traffic percentage series
//! - [`pipeline`] - the parameterized run driver tying the stages together
//!
//! The engine is a pure batch computation: it never performs I/O and every
//! intermediate structure is immutable once built.

pub mod align;
pub mod daily;
pub mod pipeline;
pub mod ratio;
pub mod traffic;

use thiserror::Error;

pub use align::{align, AlignedFrame};
pub use daily::{count_daily, DailyCounts};
pub use pipeline::{analyze, analyze_channel, AnalysisOptions, TrendReport, TrendWarning};
pub use ratio::{normalize, RatioPoint, RatioSeries, Scale};
pub use traffic::estimate_total_traffic;

/// Errors that can occur during trend analysis
///
/// Only structural input violations surface as errors; per-term and per-day
/// anomalies are recovered locally and reported as [`TrendWarning`]s.
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("Hits span multiple channels: expected {expected}, found {found}")]
    ChannelMismatch { expected: i64, found: i64 },
}

/// Result type for trend analysis operations
pub type TrendResult<T> = Result<T, TrendError>;
