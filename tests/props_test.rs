//! Property tests for the engine's structural invariants

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use tgtrends::analytics::{analyze_channel, estimate_total_traffic, AnalysisOptions};
use tgtrends::models::Hit;
use tgtrends::store::ResultStore;

const TERMS: [&str; 3] = ["bitcoin", "ether", "monero"];

fn store_strategy() -> impl Strategy<Value = ResultStore> {
    prop::collection::vec((0usize..TERMS.len(), 1u32..=28, 0i64..100_000), 1..80).prop_map(
        |raw| {
            let mut store = ResultStore::new();
            for (term, day, message_id) in raw {
                store.push(Hit {
                    timestamp: Utc
                        .with_ymd_and_hms(2024, 1, day, (message_id % 24) as u32, 0, 0)
                        .unwrap(),
                    message_id,
                    channel_id: 1,
                    search_term: TERMS[term].to_string(),
                    text: TERMS[term].to_string(),
                    link: None,
                });
            }
            store
        },
    )
}

proptest! {
    // Once aligned, the axis covers every day between the global bounds
    // and every column has one value per day.
    #[test]
    fn prop_axis_is_contiguous_and_columns_match(store in store_strategy()) {
        let report = analyze_channel(&store, &AnalysisOptions::default()).unwrap();
        let frame = report.frame.expect("non-empty store always yields a frame");

        let first = frame.axis()[0];
        let last = frame.axis()[frame.len() - 1];
        let span = (last - first).num_days() as usize + 1;
        prop_assert_eq!(frame.len(), span);

        for window in frame.axis().windows(2) {
            prop_assert_eq!(window[0].succ_opt().unwrap(), window[1]);
        }

        for term in frame.terms() {
            prop_assert_eq!(frame.mentions(term).unwrap().len(), frame.len());
        }
        prop_assert_eq!(frame.total_messages().len(), frame.len());
    }

    // Whenever at least one hit exists on a day, the traffic estimate for
    // that day is at least 1.
    #[test]
    fn prop_traffic_estimates_are_positive(store in store_strategy()) {
        let traffic = estimate_total_traffic(&store).unwrap();
        let hit_days: std::collections::BTreeSet<_> = store
            .iter()
            .flat_map(|(_, hits)| hits.iter().map(Hit::day))
            .collect();

        prop_assert_eq!(traffic.keys().copied().collect::<std::collections::BTreeSet<_>>(), hit_days);
        for &estimate in traffic.values() {
            prop_assert!(estimate >= 1);
        }
    }

    // Ratio points exist exactly where the cumulative total is defined and
    // positive, and never carry NaN or infinity.
    #[test]
    fn prop_ratio_points_are_division_guarded(store in store_strategy()) {
        let report = analyze_channel(&store, &AnalysisOptions::default()).unwrap();

        for series in report.ratios.values() {
            let expected = series
                .cumulative_total
                .iter()
                .filter(|total| total.map_or(false, |v| v > 0))
                .count();
            prop_assert_eq!(series.points.len(), expected);

            for point in &series.points {
                prop_assert!(point.ratio.is_finite());
                prop_assert!(point.ratio >= 0.0);
            }
        }
    }

    // Re-running the engine over the same frozen input produces
    // byte-identical artifacts.
    #[test]
    fn prop_reruns_are_deterministic(store in store_strategy()) {
        let options = AnalysisOptions::default();
        let first = analyze_channel(&store, &options).unwrap();
        let second = analyze_channel(&store, &options).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
