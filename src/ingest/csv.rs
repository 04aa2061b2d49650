//! CSV hit ingestion
//!
//! Reads the collector's `all_results` CSV export (one row per matched
//! message, with `time`, `message`, `message_id`, `channel_id`,
//! `search_term` and `link` columns) into a [`ResultStore`].

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::models::Hit;
use crate::store::ResultStore;

use super::IngestResult;

/// Timestamp layouts the collector is known to emit
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
];

/// Naive layouts, interpreted as UTC
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// One raw row of the collector export
#[derive(Debug, Deserialize)]
struct RawRecord {
    time: String,
    message: String,
    message_id: i64,
    channel_id: i64,
    search_term: String,
    #[serde(default)]
    link: Option<String>,
}

/// Ingestion options
///
/// The date bounds pre-filter rows at this boundary only; the engine
/// always derives its own axis bounds from the data actually present.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl IngestOptions {
    fn accepts(&self, timestamp: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| timestamp >= start)
            && self.end.map_or(true, |end| timestamp <= end)
    }
}

/// Counters describing one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Rows read from the file
    pub rows: u64,

    /// Rows accepted as hits
    pub hits: u64,

    /// Rows dropped because the timestamp could not be parsed
    pub malformed_timestamps: u64,

    /// Rows outside the configured date bounds
    pub filtered_out: u64,
}

/// Parse a collector timestamp, normalising to UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Read hits from a collector CSV export
///
/// Rows with a malformed timestamp are dropped with a warning and counted
/// in the summary; a bad row never aborts the run. Rows outside the
/// configured date bounds are skipped silently and counted separately.
pub fn read_hits(
    path: &Path,
    options: &IngestOptions,
) -> IngestResult<(ResultStore, IngestSummary)> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut store = ResultStore::new();
    let mut summary = IngestSummary::default();

    for record in reader.deserialize::<RawRecord>() {
        let record = record?;
        summary.rows += 1;

        let Some(timestamp) = parse_timestamp(&record.time) else {
            summary.malformed_timestamps += 1;
            tracing::warn!(
                time = %record.time,
                message_id = record.message_id,
                "Dropping hit with malformed timestamp"
            );
            continue;
        };

        if !options.accepts(timestamp) {
            summary.filtered_out += 1;
            continue;
        }

        summary.hits += 1;
        store.push(Hit {
            timestamp,
            message_id: record.message_id,
            channel_id: record.channel_id,
            search_term: record.search_term,
            text: record.message,
            link: record.link.filter(|link| !link.is_empty()),
        });
    }

    tracing::info!(
        path = %path.display(),
        rows = summary.rows,
        hits = summary.hits,
        malformed = summary.malformed_timestamps,
        filtered = summary.filtered_out,
        "Ingested collector export"
    );

    Ok((store, summary))
}
