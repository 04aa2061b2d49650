//! Daily bucketing of raw search hits

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Hit;

/// Mapping from calendar day to hit count for one term
///
/// Keys are exactly the set of days with at least one hit; gap filling is
/// the aligner's job, applied only once the global axis is known.
pub type DailyCounts = BTreeMap<NaiveDate, u64>;

/// Tally hits per calendar day for a single term
///
/// Timestamps are truncated to day precision on the UTC reference clock,
/// dropping time-of-day. An empty input yields an empty map; the pipeline
/// treats that as "no data" for the term and skips its downstream series
/// rather than failing the run.
#[must_use]
pub fn count_daily(hits: &[Hit]) -> DailyCounts {
    let mut counts = DailyCounts::new();

    for hit in hits {
        *counts.entry(hit.day()).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn hit_at(y: i32, m: u32, d: u32, h: u32) -> Hit {
        Hit {
            timestamp: Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap(),
            message_id: 1,
            channel_id: 7,
            search_term: "bitcoin".to_string(),
            text: "bitcoin".to_string(),
            link: None,
        }
    }

    #[test]
    fn test_counts_group_by_day() {
        let hits = vec![
            hit_at(2024, 1, 1, 0),
            hit_at(2024, 1, 1, 12),
            hit_at(2024, 1, 1, 23),
            hit_at(2024, 1, 3, 9),
        ];

        let counts = count_daily(&hits);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()], 3);
        assert_eq!(counts[&NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()], 1);
    }

    #[test]
    fn test_keys_only_for_days_with_hits() {
        let hits = vec![hit_at(2024, 1, 1, 8), hit_at(2024, 1, 3, 8)];
        let counts = count_daily(&hits);

        // no interpolation at this stage
        assert!(!counts.contains_key(&NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(count_daily(&[]).is_empty());
    }
}
