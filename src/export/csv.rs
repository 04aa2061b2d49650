//! CSV series export
//!
//! Writes one file per derived series into the run's output directory,
//! named the way the collector named its chart images so runs stay
//! recognisable side by side.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analytics::{AlignedFrame, DailyCounts, RatioSeries, Scale};
use crate::utils::sanitize_filename;

/// CSV writer for derived series
pub struct SeriesWriter {
    /// Run output directory
    output_dir: PathBuf,

    /// Run timestamp used in file names
    stamp: String,
}

impl SeriesWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(output_dir: &Path, stamp: impl Into<String>) -> Result<Self> {
        std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            stamp: stamp.into(),
        })
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one term's daily mention counts
    ///
    /// File: `message_count_per_day_{term}.csv` with `date,mentions` rows.
    pub fn write_daily_counts(&self, term: &str, counts: &DailyCounts) -> Result<PathBuf> {
        let filename = format!("message_count_per_day_{}.csv", sanitize_filename(term));
        let filepath = self.output_dir.join(&filename);

        let mut writer = csv::Writer::from_path(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;

        writer.write_record(["date", "mentions"])?;
        for (date, count) in counts {
            writer.write_record([date.format("%Y-%m-%d").to_string(), count.to_string()])?;
        }
        writer.flush()?;

        tracing::debug!(path = %filepath.display(), term, "Saved daily count series");
        Ok(filepath)
    }

    /// Write the aligned multi-term frame
    ///
    /// File: `message_count_per_day.csv` with a `date` column, one column
    /// per term and the forward-filled `total_messages` column. Columns of
    /// terms that had no hits are flagged in the header so they cannot be
    /// mistaken for genuine zero-count series. Days before the first known
    /// traffic value have an empty `total_messages` cell.
    pub fn write_frame(&self, frame: &AlignedFrame) -> Result<PathBuf> {
        let filepath = self.output_dir.join("message_count_per_day.csv");

        let mut writer = csv::Writer::from_path(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;

        let mut header = vec!["date".to_string()];
        for term in frame.terms() {
            if frame.is_no_data(term) {
                header.push(format!("{term} (no data)"));
            } else {
                header.push(term.to_string());
            }
        }
        header.push("total_messages".to_string());
        writer.write_record(&header)?;

        for (i, date) in frame.axis().iter().enumerate() {
            let mut row = vec![date.format("%Y-%m-%d").to_string()];
            for term in frame.terms() {
                let column = frame.mentions(term).unwrap_or(&[]);
                row.push(column.get(i).copied().unwrap_or(0).to_string());
            }
            row.push(
                frame.total_messages()[i]
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
            writer.write_record(&row)?;
        }
        writer.flush()?;

        tracing::debug!(path = %filepath.display(), days = frame.len(), "Saved aligned frame");
        Ok(filepath)
    }

    /// Write one term's ratio series for one presentation scale
    ///
    /// File: `adjusted_keyword_frequency_{term}_{stamp}_{scale}.csv` with
    /// `date,cumulative_mentions,cumulative_total,ratio` rows. The data is
    /// identical across scales; only the file name and the tick metadata
    /// row in the companion chart differ. Days where the division guard
    /// suppressed the ratio carry an empty `ratio` cell.
    pub fn write_ratio(
        &self,
        frame: &AlignedFrame,
        series: &RatioSeries,
        scale: Scale,
    ) -> Result<PathBuf> {
        let filename = format!(
            "adjusted_keyword_frequency_{}_{}_{}.csv",
            sanitize_filename(&series.term),
            self.stamp,
            scale.as_str()
        );
        let filepath = self.output_dir.join(&filename);

        let mut writer = csv::Writer::from_path(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;

        writer.write_record(["date", "cumulative_mentions", "cumulative_total", "ratio"])?;

        let mut points = series.points.iter().peekable();
        for (i, date) in frame.axis().iter().enumerate() {
            let ratio = points
                .next_if(|point| point.date == *date)
                .map(|point| format!("{:.6}", point.ratio))
                .unwrap_or_default();

            writer.write_record([
                date.format("%Y-%m-%d").to_string(),
                series
                    .cumulative_mentions
                    .get(i)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                series
                    .cumulative_total
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                ratio,
            ])?;
        }
        writer.flush()?;

        tracing::debug!(
            path = %filepath.display(),
            term = %series.term,
            scale = %scale,
            "Saved ratio series"
        );
        Ok(filepath)
    }
}
