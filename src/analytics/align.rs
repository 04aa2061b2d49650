//! Reindexing of per-term series onto a common daily axis

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::daily::DailyCounts;

/// Per-term daily counts and traffic on one shared daily axis
///
/// The axis runs from the global minimum to the global maximum date over
/// all terms with data, inclusive, in calendar-day steps. Mention columns
/// are zero-filled: the absence of a hit means zero matches that day, not
/// "unknown". The traffic column is forward-filled from the most recent
/// known value and stays undefined before the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedFrame {
    /// Daily date axis, contiguous and inclusive at both ends
    axis: Vec<NaiveDate>,

    /// Mention counts per term, one value per axis day
    mentions: BTreeMap<String, Vec<u64>>,

    /// Estimated total messages per axis day; `None` before the first
    /// known traffic value
    total_messages: Vec<Option<u64>>,

    /// Terms that contributed no hits at all
    ///
    /// They appear as all-zero columns but are flagged here so downstream
    /// consumers can tell "no data" from a genuine zero-count series.
    no_data_terms: BTreeSet<String>,
}

impl AlignedFrame {
    /// The shared daily axis
    #[must_use]
    pub fn axis(&self) -> &[NaiveDate] {
        &self.axis
    }

    /// Number of days on the axis
    #[must_use]
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    /// A frame is never built without at least one day
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// All terms present as columns, including "no data" ones
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        self.mentions.keys().map(String::as_str).collect()
    }

    /// Zero-filled mention column for one term
    #[must_use]
    pub fn mentions(&self, term: &str) -> Option<&[u64]> {
        self.mentions.get(term).map(Vec::as_slice)
    }

    /// Forward-filled traffic column
    #[must_use]
    pub fn total_messages(&self) -> &[Option<u64>] {
        &self.total_messages
    }

    /// Whether any traffic estimate is available at all
    #[must_use]
    pub fn has_traffic(&self) -> bool {
        self.total_messages.iter().any(Option::is_some)
    }

    /// Whether a term is an all-zero column because it had no hits
    #[must_use]
    pub fn is_no_data(&self, term: &str) -> bool {
        self.no_data_terms.contains(term)
    }

    /// Terms flagged as having no data
    #[must_use]
    pub fn no_data_terms(&self) -> &BTreeSet<String> {
        &self.no_data_terms
    }
}

/// Align per-term daily counts and a traffic estimate onto one daily axis
///
/// Axis bounds are the min/max date over all terms with data; terms
/// without data are excluded from the bound calculation but still appear
/// as all-zero columns, flagged via [`AlignedFrame::is_no_data`]. Missing
/// mention days are filled with 0. Traffic is forward-filled; days before
/// the first known value stay `None` so the ratio stage can exclude them
/// instead of dividing by a made-up zero.
///
/// Returns `None` when no term has any data, since no axis can be derived.
/// An empty `traffic` map is not an error: the frame then carries mention
/// columns only and [`AlignedFrame::has_traffic`] reports `false`.
#[must_use]
pub fn align(
    term_series: &BTreeMap<String, DailyCounts>,
    traffic: &BTreeMap<NaiveDate, u64>,
) -> Option<AlignedFrame> {
    let start = term_series
        .values()
        .filter_map(|counts| counts.keys().next())
        .min()
        .copied()?;
    let end = term_series
        .values()
        .filter_map(|counts| counts.keys().next_back())
        .max()
        .copied()?;

    let mut axis = Vec::new();
    let mut day = start;
    while day <= end {
        axis.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    let mut mentions = BTreeMap::new();
    let mut no_data_terms = BTreeSet::new();

    for (term, counts) in term_series {
        if counts.is_empty() {
            no_data_terms.insert(term.clone());
        }
        let column: Vec<u64> = axis
            .iter()
            .map(|d| counts.get(d).copied().unwrap_or(0))
            .collect();
        mentions.insert(term.clone(), column);
    }

    // Seed from any estimate at or before the axis start, then carry the
    // last known value forward.
    let mut last_known = traffic.range(..=start).next_back().map(|(_, &v)| v);
    let total_messages = axis
        .iter()
        .map(|d| {
            if let Some(&v) = traffic.get(d) {
                last_known = Some(v);
            }
            last_known
        })
        .collect();

    Some(AlignedFrame {
        axis,
        mentions,
        total_messages,
        no_data_terms,
    })
}
