//! Common test utilities

use chrono::{TimeZone, Utc};
use tgtrends::models::Hit;
use tgtrends::store::ResultStore;

/// Create a hit on a given January 2024 day
pub fn hit_on(term: &str, channel_id: i64, message_id: i64, day: u32) -> Hit {
    Hit {
        timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        message_id,
        channel_id,
        search_term: term.to_string(),
        text: format!("{term} mentioned in message {message_id}"),
        link: Some(format!("https://t.me/c/{channel_id}/{message_id}")),
    }
}

/// The bitcoin/ether scenario: bitcoin on day 1 (x3) and day 3 (x2),
/// ether on day 2 (x1), all in one channel
#[allow(dead_code)]
pub fn example_store() -> ResultStore {
    let mut store = ResultStore::new();
    store.push(hit_on("bitcoin", 7, 100, 1));
    store.push(hit_on("bitcoin", 7, 104, 1));
    store.push(hit_on("bitcoin", 7, 109, 1));
    store.push(hit_on("bitcoin", 7, 120, 3));
    store.push(hit_on("bitcoin", 7, 139, 3));
    store.push(hit_on("ether", 7, 112, 2));
    store
}
