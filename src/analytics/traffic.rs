//! Total channel traffic estimation from message-identifier spread
//!
//! Message identifiers increase monotonically within a channel, so the
//! spread between the highest and lowest identifier observed on a day -
//! across any term's hits that day - approximates the channel's total
//! message volume that day, independent of how many messages matched a
//! keyword. This is a heuristic, not an exact count: it is only as good as
//! the chance that some hit lands near the day's first and last messages,
//! and it degrades when hits are sparse.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::store::ResultStore;

use super::{TrendError, TrendResult};

/// Estimate total message volume per day for one channel
///
/// Merges the hits of every term in the store, buckets them by calendar
/// day, and computes `max(message_id) - min(message_id) + 1` for each day
/// with at least one hit. Days with no hits get no entry; the aligner
/// forward-fills them later. A single-identifier day yields 1, so the
/// estimate is never zero where it is defined.
///
/// Traffic is only meaningful within one channel. Hits spanning multiple
/// channels violate the input contract and are rejected; callers are
/// expected to segment multi-channel stores first (see
/// [`ResultStore::partition_by_channel`]).
pub fn estimate_total_traffic(store: &ResultStore) -> TrendResult<BTreeMap<NaiveDate, u64>> {
    let mut bounds: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    let mut channel: Option<i64> = None;

    for (_, hits) in store.iter() {
        for hit in hits {
            match channel {
                None => channel = Some(hit.channel_id),
                Some(expected) if expected != hit.channel_id => {
                    return Err(TrendError::ChannelMismatch {
                        expected,
                        found: hit.channel_id,
                    });
                }
                Some(_) => {}
            }

            bounds
                .entry(hit.day())
                .and_modify(|(min, max)| {
                    *min = (*min).min(hit.message_id);
                    *max = (*max).max(hit.message_id);
                })
                .or_insert((hit.message_id, hit.message_id));
        }
    }

    Ok(bounds
        .into_iter()
        .map(|(day, (min, max))| (day, (max - min + 1) as u64))
        .collect())
}
