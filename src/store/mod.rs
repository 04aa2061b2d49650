//! Search result store
//!
//! Holds, per search term, the ordered collection of raw hits produced by the
//! ingestion boundary. The store is the hand-off point between collection and
//! analysis: the engine only ever reads from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ingest::terms::TermMatcher;
use crate::models::Hit;

/// Per-term collections of raw hits
///
/// Terms are registered up front so that a term which never matched anything
/// is still visible downstream as "no data" instead of silently vanishing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultStore {
    /// Hits grouped by search term, kept in insertion order per term
    hits: BTreeMap<String, Vec<Hit>>,
}

impl ResultStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term with no hits yet
    ///
    /// Idempotent; existing hits for the term are kept.
    pub fn register_term(&mut self, term: &str) {
        self.hits.entry(term.to_string()).or_default();
    }

    /// Record a hit under its own search term
    pub fn push(&mut self, hit: Hit) {
        self.hits
            .entry(hit.search_term.clone())
            .or_default()
            .push(hit);
    }

    /// Record many hits at once
    pub fn extend<I>(&mut self, hits: I)
    where
        I: IntoIterator<Item = Hit>,
    {
        for hit in hits {
            self.push(hit);
        }
    }

    /// All registered terms, including ones with no hits
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        self.hits.keys().map(String::as_str).collect()
    }

    /// Hits recorded for one term
    #[must_use]
    pub fn hits(&self, term: &str) -> Option<&[Hit]> {
        self.hits.get(term).map(Vec::as_slice)
    }

    /// Per-term hit collections, in term order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Hit])> {
        self.hits.iter().map(|(term, hits)| (term.as_str(), hits.as_slice()))
    }

    /// Total number of hits across all terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.values().map(Vec::len).sum()
    }

    /// Check whether the store holds no hits at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.values().all(Vec::is_empty)
    }

    /// Distinct channels observed across all hits
    #[must_use]
    pub fn channels(&self) -> BTreeSet<i64> {
        self.hits
            .values()
            .flatten()
            .map(|hit| hit.channel_id)
            .collect()
    }

    /// Split the store into one single-channel store per channel
    ///
    /// Traffic estimation is only defined within a channel, so a
    /// multi-channel store must be segmented before the engine runs.
    /// Registered terms are carried into every segment so "no data" terms
    /// stay visible per channel.
    #[must_use]
    pub fn partition_by_channel(&self) -> BTreeMap<i64, ResultStore> {
        let mut partitions: BTreeMap<i64, ResultStore> = BTreeMap::new();

        for hits in self.hits.values() {
            for hit in hits {
                partitions
                    .entry(hit.channel_id)
                    .or_default()
                    .push(hit.clone());
            }
        }

        for store in partitions.values_mut() {
            for term in self.hits.keys() {
                store.register_term(term);
            }
        }

        partitions
    }

    /// Keep only terms accepted by the matcher, dropping the rest
    pub fn retain_terms(&mut self, matcher: &TermMatcher) {
        self.hits.retain(|term, _| matcher.matches(term));
    }
}
