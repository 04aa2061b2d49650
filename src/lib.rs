//! tgtrends - Telegram Keyword Trend Analysis
//!
//! Turns keyword-matching messages collected from Telegram channels into
//! trend analyses: per-keyword daily counts, an aggregate multi-keyword
//! time series and a traffic-normalised prevalence ratio.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`store`] - Per-term search result collections
//! - [`analytics`] - Trend aggregation and normalization engine
//! - [`ingest`] - Collector export reading (CSV, search terms file)
//! - [`export`] - Chart-ready CSV series and text report writing
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use tgtrends::analytics::{analyze, AnalysisOptions};
//! use tgtrends::ingest::{read_hits, IngestOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let (store, _summary) =
//!         read_hits(Path::new("all_results.csv"), &IngestOptions::default())?;
//!     let reports = analyze(&store, &AnalysisOptions::default())?;
//!     for report in reports {
//!         println!("{:?}: {} term(s)", report.channel_id, report.term_daily.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod store;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        analyze, analyze_channel, AlignedFrame, AnalysisOptions, DailyCounts, RatioSeries, Scale,
        TrendReport, TrendWarning,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, TrendsErrorTrait};
    pub use crate::models::{Hit, RunStats};
    pub use crate::store::ResultStore;
}

// Direct re-exports for convenience
pub use models::{Hit, RunStats};
pub use store::ResultStore;
