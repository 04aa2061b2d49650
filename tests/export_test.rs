//! Tests for the presentation adapter exports

mod common;

use tgtrends::analytics::{analyze_channel, AnalysisOptions, Scale};
use tgtrends::export::{ReportWriter, SeriesWriter};

use common::example_store;

#[test]
fn test_full_export_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = example_store();
    let report = analyze_channel(&store, &AnalysisOptions::default()).unwrap();
    let frame = report.frame.as_ref().unwrap();

    let writer = SeriesWriter::new(dir.path(), "20240105_120000").unwrap();
    for (term, counts) in &report.term_daily {
        writer.write_daily_counts(term, counts).unwrap();
    }
    writer.write_frame(frame).unwrap();
    for &scale in &report.ratio_scales {
        for series in report.ratios.values() {
            writer.write_ratio(frame, series, scale).unwrap();
        }
    }
    ReportWriter::new(dir.path(), "20240105_120000")
        .unwrap()
        .save(&store, std::slice::from_ref(&report))
        .unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "adjusted_keyword_frequency_bitcoin_20240105_120000_linear.csv",
            "adjusted_keyword_frequency_bitcoin_20240105_120000_log.csv",
            "adjusted_keyword_frequency_ether_20240105_120000_linear.csv",
            "adjusted_keyword_frequency_ether_20240105_120000_log.csv",
            "message_count_per_day.csv",
            "message_count_per_day_bitcoin.csv",
            "message_count_per_day_ether.csv",
            "report_20240105_120000.txt",
        ]
    );
}

#[test]
fn test_ratio_files_carry_identical_data_across_scales() {
    let dir = tempfile::tempdir().unwrap();
    let report = analyze_channel(&example_store(), &AnalysisOptions::default()).unwrap();
    let frame = report.frame.as_ref().unwrap();
    let series = &report.ratios["bitcoin"];

    let writer = SeriesWriter::new(dir.path(), "stamp").unwrap();
    let linear = writer.write_ratio(frame, series, Scale::Linear).unwrap();
    let log = writer.write_ratio(frame, series, Scale::Logarithmic).unwrap();

    assert_ne!(linear, log);
    assert_eq!(
        std::fs::read_to_string(linear).unwrap(),
        std::fs::read_to_string(log).unwrap()
    );
}

#[test]
fn test_frame_file_has_one_row_per_axis_day() {
    let dir = tempfile::tempdir().unwrap();
    let report = analyze_channel(&example_store(), &AnalysisOptions::default()).unwrap();
    let frame = report.frame.as_ref().unwrap();

    let writer = SeriesWriter::new(dir.path(), "stamp").unwrap();
    let path = writer.write_frame(frame).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), frame.len() + 1);
    assert_eq!(lines[0], "date,bitcoin,ether,total_messages");
    assert_eq!(lines[1], "2024-01-01,3,0,10");
    assert_eq!(lines[2], "2024-01-02,0,1,1");
    assert_eq!(lines[3], "2024-01-03,2,0,20");
}
