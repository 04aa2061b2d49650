// Core data structures for tgtrends

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One message matching a search term
///
/// Hits are immutable once recorded: they are created by the ingestion
/// boundary and only read by the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// When the message was posted (normalised to UTC)
    pub timestamp: DateTime<Utc>,

    /// Message identifier, monotonically increasing within a channel
    pub message_id: i64,

    /// Channel the message was found in
    pub channel_id: i64,

    /// Search term that matched this message
    pub search_term: String,

    /// Matched message text
    pub text: String,

    /// Permalink provided by the collector, when available
    pub link: Option<String>,
}

impl Hit {
    /// Calendar day bucket of this hit (UTC)
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Build the collector-style permalink: `https://t.me/c/{channel}/{message}`
    #[must_use]
    pub fn permalink(&self) -> String {
        format!("https://t.me/c/{}/{}", self.channel_id, self.message_id)
    }
}

/// Per-run counters collected while ingesting and analysing
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub total_hits: u64,
    pub malformed_timestamps: u64,
    pub terms_with_data: u32,
    pub terms_without_data: u32,
    pub channels: u32,
}

impl RunStats {
    /// Fraction of ingested rows dropped for malformed timestamps, as percentage
    pub fn drop_rate(&self) -> f64 {
        let seen = self.total_hits + self.malformed_timestamps;
        if seen == 0 {
            0.0
        } else {
            (self.malformed_timestamps as f64 / seen as f64) * 100.0
        }
    }
}
