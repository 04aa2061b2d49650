//! Tests for the collector export ingestion boundary

use std::io::Write;

use chrono::{TimeZone, Utc};
use tempfile::NamedTempFile;

use tgtrends::ingest::{load_search_terms, read_hits, IngestError, IngestOptions, TermMatcher};

fn export_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "time,message,message_id,channel_id,search_term,link").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_read_hits_groups_by_term() {
    let file = export_file(&[
        "2024-01-01 10:00:00+00:00,bitcoin pump,100,7,bitcoin,https://t.me/c/7/100",
        "2024-01-01 11:00:00+00:00,more bitcoin,104,7,bitcoin,",
        "2024-01-02 09:30:00+00:00,ether news,112,7,ether,https://t.me/c/7/112",
    ]);

    let (store, summary) = read_hits(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.hits, 3);
    assert_eq!(summary.malformed_timestamps, 0);

    assert_eq!(store.hits("bitcoin").unwrap().len(), 2);
    assert_eq!(store.hits("ether").unwrap().len(), 1);

    let hit = &store.hits("bitcoin").unwrap()[0];
    assert_eq!(
        hit.timestamp,
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(hit.message_id, 100);
    assert_eq!(hit.channel_id, 7);
    assert_eq!(hit.link.as_deref(), Some("https://t.me/c/7/100"));

    // empty link cell becomes None, not Some("")
    let second = &store.hits("bitcoin").unwrap()[1];
    assert!(second.link.is_none());
}

#[test]
fn test_malformed_timestamp_dropped_not_fatal() {
    let file = export_file(&[
        "2024-01-01 10:00:00+00:00,fine,100,7,bitcoin,",
        "yesterday-ish,broken,101,7,bitcoin,",
        "2024-01-02 10:00:00+00:00,fine too,102,7,bitcoin,",
    ]);

    let (store, summary) = read_hits(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.hits, 2);
    assert_eq!(summary.malformed_timestamps, 1);
    assert_eq!(store.hits("bitcoin").unwrap().len(), 2);
}

#[test]
fn test_date_bounds_prefilter() {
    let file = export_file(&[
        "2024-01-01 10:00:00+00:00,early,100,7,bitcoin,",
        "2024-01-05 10:00:00+00:00,inside,110,7,bitcoin,",
        "2024-01-09 10:00:00+00:00,late,120,7,bitcoin,",
    ]);

    let options = IngestOptions {
        start: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
        end: Some(Utc.with_ymd_and_hms(2024, 1, 8, 23, 59, 59).unwrap()),
    };
    let (store, summary) = read_hits(file.path(), &options).unwrap();

    assert_eq!(summary.hits, 1);
    assert_eq!(summary.filtered_out, 2);
    assert_eq!(store.hits("bitcoin").unwrap().len(), 1);
    assert_eq!(store.hits("bitcoin").unwrap()[0].text, "inside");
}

#[test]
fn test_missing_file_is_an_error() {
    let result = read_hits(
        std::path::Path::new("/nonexistent/all_results.csv"),
        &IngestOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_load_search_terms_skips_blank_lines() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bitcoin").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  ether  ").unwrap();
    file.flush().unwrap();

    let terms = load_search_terms(file.path()).unwrap();
    assert_eq!(terms, vec!["bitcoin", "ether"]);
}

#[test]
fn test_empty_terms_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file).unwrap();
    file.flush().unwrap();

    let err = load_search_terms(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyTermsFile(_)));
}

#[test]
fn test_store_restricted_to_listed_terms() {
    let file = export_file(&[
        "2024-01-01 10:00:00+00:00,a,100,7,bitcoin,",
        "2024-01-01 11:00:00+00:00,b,101,7,ether,",
        "2024-01-01 12:00:00+00:00,c,102,7,dogecoin,",
    ]);
    let (mut store, _) = read_hits(file.path(), &IngestOptions::default()).unwrap();

    let matcher = TermMatcher::new(&["Bitcoin", "ETHER"]).unwrap();
    store.retain_terms(&matcher);

    assert_eq!(store.terms(), vec!["bitcoin", "ether"]);
    assert!(store.hits("dogecoin").is_none());
}
