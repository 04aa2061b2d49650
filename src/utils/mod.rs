//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Sanitize filename by removing invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();

    let re = INVALID_CHARS
        .get_or_init(|| Regex::new(r#"[<>:"/\\|?*\s]"#).expect("Invalid regex pattern"));

    re.replace_all(filename, "_").to_string()
}

/// Truncate text to a maximum length
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let truncated = &text[..max_len.saturating_sub(3)];
        format!("{truncated}...")
    }
}

/// Parse a `dd/mm/yyyy` date bound into a UTC instant
///
/// Start bounds snap to the first instant of the day, end bounds to the
/// last one, matching how the collector interprets the same inputs.
pub fn parse_date_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .with_context(|| format!("Invalid date '{raw}', expected dd/mm/yyyy"))?;

    let time = if end_of_day {
        NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("valid time")
    } else {
        NaiveTime::from_hms_opt(0, 0, 0).expect("valid time")
    };

    Ok(date.and_time(time).and_utc())
}
