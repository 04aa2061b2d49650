//! Plain-text run report
//!
//! Mirrors the collector's `report_{stamp}.txt`: project date, summary
//! stats, channels searched, search terms used and a most-common-channels
//! table, extended with the warnings surfaced by the run.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analytics::TrendReport;
use crate::store::ResultStore;

/// Text report writer
pub struct ReportWriter {
    output_dir: PathBuf,
    stamp: String,
}

impl ReportWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(output_dir: &Path, stamp: impl Into<String>) -> Result<Self> {
        std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            stamp: stamp.into(),
        })
    }

    /// Render the report body
    pub fn render(&self, store: &ResultStore, reports: &[TrendReport]) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Project Date");
        let _ = writeln!(out, "{}\n", self.stamp);

        let _ = writeln!(out, "Summary Stats");
        let _ = writeln!(out, "Number of results: {}", store.len());

        let timestamps: Vec<_> = store
            .iter()
            .flat_map(|(_, hits)| hits.iter().map(|hit| hit.timestamp))
            .collect();
        if let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) {
            let _ = writeln!(out, "Date range of results: {first} - {last}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Channels Searched");
        for channel in store.channels() {
            let _ = writeln!(out, "{channel}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Search Terms Used");
        for term in store.terms() {
            let _ = writeln!(out, "{term}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Most Common Channels");
        let mut channel_counts: BTreeMap<i64, usize> = BTreeMap::new();
        for (_, hits) in store.iter() {
            for hit in hits {
                *channel_counts.entry(hit.channel_id).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<_> = channel_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (channel_id, count) in ranked {
            let _ = writeln!(out, "Channel ID: {channel_id}, Count: {count}");
        }

        let warnings: Vec<_> = reports
            .iter()
            .flat_map(|report| report.warnings.iter())
            .collect();
        if !warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Warnings");
            for warning in warnings {
                let _ = writeln!(out, "{warning}");
            }
        }

        out
    }

    /// Write the report file, returning its path
    pub fn save(&self, store: &ResultStore, reports: &[TrendReport]) -> Result<PathBuf> {
        let filepath = self.output_dir.join(format!("report_{}.txt", self.stamp));

        std::fs::write(&filepath, self.render(store, reports))
            .with_context(|| format!("Failed to write report: {}", filepath.display()))?;

        tracing::debug!(path = %filepath.display(), "Saved run report");
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{analyze, AnalysisOptions};
    use crate::models::Hit;
    use chrono::{TimeZone, Utc};

    fn store_with_hits() -> ResultStore {
        let mut store = ResultStore::new();
        for (term, channel_id, message_id, day) in [
            ("bitcoin", 7, 100, 1),
            ("bitcoin", 7, 120, 2),
            ("bitcoin", 9, 50, 1),
            ("ether", 7, 110, 1),
        ] {
            store.push(Hit {
                timestamp: Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap(),
                message_id,
                channel_id,
                search_term: term.to_string(),
                text: term.to_string(),
                link: None,
            });
        }
        store.register_term("monero");
        store
    }

    #[test]
    fn test_report_sections() {
        let store = store_with_hits();
        let reports = analyze(&store, &AnalysisOptions::default()).unwrap();

        let writer = ReportWriter {
            output_dir: PathBuf::from("."),
            stamp: "20240105_120000".to_string(),
        };
        let body = writer.render(&store, &reports);

        assert!(body.contains("Project Date\n20240105_120000"));
        assert!(body.contains("Number of results: 4"));
        assert!(body.contains("Channels Searched\n7\n9"));
        assert!(body.contains("Search Terms Used\nbitcoin\nether\nmonero"));
        // channel 7 has three hits, channel 9 one
        assert!(body.contains("Channel ID: 7, Count: 3\nChannel ID: 9, Count: 1"));
        // the registered-but-silent term surfaces as a warning
        assert!(body.contains("No data available for search term: monero"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_hits();
        let reports = analyze(&store, &AnalysisOptions::default()).unwrap();

        let writer = ReportWriter::new(dir.path(), "stamp").unwrap();
        let path = writer.save(&store, &reports).unwrap();

        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "report_stamp.txt");
        assert!(std::fs::read_to_string(path).unwrap().contains("Summary Stats"));
    }
}
