use anyhow::Result;
use std::path::PathBuf;

use crate::ingest::{read_hits, IngestOptions};
use crate::models::RunStats;

use super::analyze::print_store_overview;

/// Print ingestion statistics for a collector export without analysing it
pub fn stats(input: PathBuf) -> Result<()> {
    if !input.exists() {
        println!("Export not found: {}", input.display());
        println!("Run the collector first to create an export.");
        return Ok(());
    }

    let (store, summary) = read_hits(&input, &IngestOptions::default())?;

    let run_stats = RunStats {
        total_hits: summary.hits,
        malformed_timestamps: summary.malformed_timestamps,
        terms_with_data: store
            .iter()
            .filter(|(_, hits)| !hits.is_empty())
            .count() as u32,
        terms_without_data: store.iter().filter(|(_, hits)| hits.is_empty()).count() as u32,
        channels: store.channels().len() as u32,
    };

    println!("Export Statistics");
    println!("=================");
    println!("Export: {}", input.display());
    println!();
    println!("Total rows: {}", summary.rows);
    println!("  Hits:      {}", summary.hits);
    println!(
        "  Malformed: {} ({:.1}%)",
        summary.malformed_timestamps,
        run_stats.drop_rate()
    );
    println!();
    println!("Channels: {}", run_stats.channels);
    println!("Search terms:");
    print_store_overview(&store);

    let timestamps: Vec<_> = store
        .iter()
        .flat_map(|(_, hits)| hits.iter().map(|hit| hit.timestamp))
        .collect();
    if let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) {
        println!();
        println!("Date range: {first} - {last}");
    }

    Ok(())
}
