use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use crate::analytics::{self, TrendReport};
use crate::config::Config;
use crate::export::{ReportWriter, SeriesWriter};
use crate::ingest::{load_search_terms, read_hits, TermMatcher};
use crate::store::ResultStore;

/// Inputs for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    /// Collector CSV export to analyse
    pub input: PathBuf,

    /// Optional search terms file restricting the run
    pub terms_file: Option<PathBuf>,
}

/// Run the full pipeline over a collector export and write all outputs
pub fn analyze(config: &Config, params: &AnalyzeParams) -> Result<()> {
    config.validate()?;

    // Time at run start; every file of the run carries the same stamp.
    let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();

    println!("Keyword Trend Analysis");
    println!("======================");
    println!("Input: {}", params.input.display());

    let ingest_options = config.ingest.to_options()?;
    let (mut store, summary) = read_hits(&params.input, &ingest_options)
        .with_context(|| format!("Failed to ingest {}", params.input.display()))?;

    if summary.malformed_timestamps > 0 {
        println!(
            "Dropped {} row(s) with malformed timestamps",
            summary.malformed_timestamps
        );
    }

    if let Some(terms_path) = &params.terms_file {
        let terms = load_search_terms(terms_path)?;
        let matcher = TermMatcher::new(&terms)?;
        store.retain_terms(&matcher);

        // Terms that never matched anything still get a "no data" column.
        for term in &terms {
            let present = store
                .terms()
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(term));
            if !present {
                store.register_term(term);
            }
        }
    }

    println!(
        "Ingested {} hits across {} term(s) and {} channel(s)",
        store.len(),
        store.terms().len(),
        store.channels().len()
    );

    let options = config.analysis.to_options();
    let reports = analytics::analyze(&store, &options)?;

    let run_dir = config.output.dir.join(format!("TG-Search_{stamp}"));
    let multi_channel = reports.len() > 1;

    for report in &reports {
        let base = match (multi_channel, report.channel_id) {
            (true, Some(channel_id)) => run_dir.join(format!("channel_{channel_id}")),
            _ => run_dir.clone(),
        };
        write_series(&base, &stamp, &options, report)?;

        for warning in &report.warnings {
            tracing::warn!(channel = ?report.channel_id, %warning, "Run warning");
            println!("{warning}");
        }
    }

    if config.output.report {
        let writer = ReportWriter::new(&run_dir, &stamp)?;
        let path = writer.save(&store, &reports)?;
        println!("Saved {}", path.display());
    }

    println!();
    println!("Process completed");
    println!("Output folder: {}", run_dir.display());

    Ok(())
}

fn write_series(
    base: &std::path::Path,
    stamp: &str,
    options: &analytics::AnalysisOptions,
    report: &TrendReport,
) -> Result<()> {
    let writer = SeriesWriter::new(base, stamp)?;

    if options.per_term {
        for (term, counts) in &report.term_daily {
            if counts.is_empty() {
                continue;
            }
            let path = writer.write_daily_counts(term, counts)?;
            println!("Saved {}", path.display());
        }
    }

    // The frame may be present solely as the ratio series' axis; only an
    // aggregate run writes it out.
    if let Some(frame) = &report.frame {
        if options.aggregate {
            let path = writer.write_frame(frame)?;
            println!("Saved {}", path.display());
        }

        for &scale in &report.ratio_scales {
            for series in report.ratios.values() {
                let path = writer.write_ratio(frame, series, scale)?;
                println!("Saved {}", path.display());
            }
        }
    }

    Ok(())
}

/// Print the store's headline numbers without writing anything
pub(crate) fn print_store_overview(store: &ResultStore) {
    for (term, hits) in store.iter() {
        if hits.is_empty() {
            println!("  {term}: no results");
        } else {
            println!("  {term}: {} result(s)", hits.len());
        }
    }
}
