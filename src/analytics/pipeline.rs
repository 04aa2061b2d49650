//! Parameterized analysis pipeline
//!
//! One run driver replaces the collector's accreted per-revision script
//! variants: a single options struct selects which derived series to
//! produce, and every run yields an immutable [`TrendReport`] instead of
//! accumulating into shared state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::ResultStore;

use super::align::{align, AlignedFrame};
use super::daily::{count_daily, DailyCounts};
use super::ratio::{normalize, RatioSeries, Scale};
use super::traffic::estimate_total_traffic;
use super::{TrendError, TrendResult};

/// Which derived series a run should produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Per-term daily count series (single-term charts)
    pub per_term: bool,

    /// The aligned multi-term frame (aggregate chart)
    pub aggregate: bool,

    /// Presentation scales to produce ratio series for; empty skips the
    /// ratio stage entirely
    pub ratio_scales: Vec<Scale>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            per_term: true,
            aggregate: true,
            ratio_scales: vec![Scale::Linear, Scale::Logarithmic],
        }
    }
}

impl AnalysisOptions {
    /// Whether the aligner has to run for these options
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.aggregate || !self.ratio_scales.is_empty()
    }
}

/// Recoverable anomaly surfaced by a run
///
/// Warnings never abort the run; they are carried on the report for the
/// caller to log or print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendWarning {
    /// A term had zero hits; its downstream series were skipped
    EmptyTerm { term: String },

    /// No hits at all in this scope, so no traffic baseline could be
    /// estimated; ratio computation was skipped
    NoTrafficData,
}

impl std::fmt::Display for TrendWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTerm { term } => {
                write!(f, "No data available for search term: {term}")
            }
            Self::NoTrafficData => {
                write!(f, "No traffic data; skipping ratio computation")
            }
        }
    }
}

/// All derived artifacts of one analysis run over a single channel scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    /// Channel the run was scoped to; `None` when the scope held no hits
    pub channel_id: Option<i64>,

    /// Daily counts per term (empty map for "no data" terms)
    pub term_daily: BTreeMap<String, DailyCounts>,

    /// Aligned frame, when requested and derivable
    pub frame: Option<AlignedFrame>,

    /// Ratio series per term, when requested and traffic was available
    pub ratios: BTreeMap<String, RatioSeries>,

    /// Scales the ratio series should be presented in
    pub ratio_scales: Vec<Scale>,

    /// Recoverable anomalies encountered during the run
    pub warnings: Vec<TrendWarning>,
}

impl TrendReport {
    /// Terms that produced at least one hit
    #[must_use]
    pub fn terms_with_data(&self) -> Vec<&str> {
        self.term_daily
            .iter()
            .filter(|(_, counts)| !counts.is_empty())
            .map(|(term, _)| term.as_str())
            .collect()
    }

    /// Whether ratio series were produced
    #[must_use]
    pub fn has_ratios(&self) -> bool {
        !self.ratios.is_empty()
    }
}

/// Run the engine over hits that all belong to one channel
///
/// Stage order is fixed: daily counting and traffic estimation first, then
/// alignment, then normalization. Hits spanning multiple channels are a
/// precondition violation and rejected; use [`analyze`] to segment a
/// multi-channel store automatically.
pub fn analyze_channel(
    store: &ResultStore,
    options: &AnalysisOptions,
) -> TrendResult<TrendReport> {
    let channels = store.channels();
    let mut iter = channels.iter();
    let channel_id = iter.next().copied();
    if let (Some(expected), Some(&found)) = (channel_id, iter.next()) {
        return Err(TrendError::ChannelMismatch { expected, found });
    }

    let mut warnings = Vec::new();

    let mut term_daily = BTreeMap::new();
    for (term, hits) in store.iter() {
        let counts = count_daily(hits);
        if counts.is_empty() {
            warnings.push(TrendWarning::EmptyTerm {
                term: term.to_string(),
            });
        }
        term_daily.insert(term.to_string(), counts);
    }

    let traffic = estimate_total_traffic(store)?;

    let frame = if options.needs_frame() {
        align(&term_daily, &traffic)
    } else {
        None
    };

    let mut ratios = BTreeMap::new();
    if !options.ratio_scales.is_empty() {
        match &frame {
            Some(frame) if frame.has_traffic() => {
                ratios = normalize(frame);
                // "no data" terms keep their frame column but get no
                // downstream ratio series
                ratios.retain(|term, _| !frame.is_no_data(term));
            }
            _ => warnings.push(TrendWarning::NoTrafficData),
        }
    }

    tracing::debug!(
        channel = ?channel_id,
        terms = term_daily.len(),
        days = frame.as_ref().map_or(0, AlignedFrame::len),
        warnings = warnings.len(),
        "Channel analysis complete"
    );

    Ok(TrendReport {
        channel_id,
        term_daily,
        frame: if options.aggregate || !ratios.is_empty() {
            frame
        } else {
            None
        },
        ratios,
        ratio_scales: options.ratio_scales.clone(),
        warnings,
    })
}

/// Run the engine once per channel found in the store
///
/// Traffic estimation is only defined within a channel, so the store is
/// partitioned first and each segment analysed on its own. A store with no
/// hits at all yields a single report carrying the "no data" warnings.
pub fn analyze(
    store: &ResultStore,
    options: &AnalysisOptions,
) -> TrendResult<Vec<TrendReport>> {
    if store.is_empty() {
        return Ok(vec![analyze_channel(store, options)?]);
    }

    store
        .partition_by_channel()
        .values()
        .map(|segment| analyze_channel(segment, options))
        .collect()
}
