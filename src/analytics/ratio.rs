//! Cumulative mention-to-traffic ratio series
//!
//! The prevalence ratio compares how much of a channel's estimated total
//! traffic a keyword accounts for over time: running sums of mentions and
//! traffic, then `100 * cumulative_mentions / cumulative_total` per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::align::AlignedFrame;

/// One plotted ratio value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    pub date: NaiveDate,

    /// Percentage of cumulative traffic accounted for by the term
    pub ratio: f64,
}

/// Cumulative mention-to-traffic percentage series for one term
///
/// The cumulative vectors run parallel to the frame axis they were derived
/// from. `points` only contains days where the cumulative traffic was
/// defined and positive; days failing that guard are omitted entirely
/// rather than emitted as zero, infinity or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    pub term: String,

    /// Running sum of the term's mentions, one value per axis day
    pub cumulative_mentions: Vec<u64>,

    /// Running sum of forward-filled traffic; `None` before the first
    /// known traffic value (those days contribute nothing, they are not
    /// summed as zero)
    pub cumulative_total: Vec<Option<u64>>,

    /// Plottable ratio values, division-guarded
    pub points: Vec<RatioPoint>,
}

impl RatioSeries {
    /// Ratio value on a given day, if one was emitted
    #[must_use]
    pub fn ratio_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.ratio)
    }
}

/// Presentation scale for ratio charts
///
/// The scale only affects rendering metadata - axis tick positions and tick
/// formatting. The underlying ratio values are identical between scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Linear,
    Logarithmic,
}

impl Scale {
    /// Parse a scale name from user input
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "normal" => Some(Self::Linear),
            "logarithmic" | "log" => Some(Self::Logarithmic),
            _ => None,
        }
    }

    /// Short name used in file names and labels
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Logarithmic => "log",
        }
    }

    /// Y-axis tick positions for ratio charts
    #[must_use]
    pub fn tick_values(&self) -> &'static [f64] {
        match self {
            Self::Linear => &[100.0, 50.0, 10.0, 1.0],
            Self::Logarithmic => &[100.0, 10.0, 1.0, 0.1, 0.01],
        }
    }

    /// Format one tick value the way the chart axis shows it
    #[must_use]
    pub fn format_tick(&self, value: f64) -> String {
        match self {
            Self::Linear => format!("{value:.0} %"),
            Self::Logarithmic => format!("{value:.2} %"),
        }
    }

    /// Y-axis label for ratio charts
    #[must_use]
    pub fn axis_label(&self) -> String {
        let name = match self {
            Self::Linear => "Linear",
            Self::Logarithmic => "Log",
        };
        format!("Cumulative Mentions to Total Messages Ratio ({name} Scale %)")
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive a ratio series per term from an aligned frame
///
/// `cumulative_mentions[d]` sums the term's mentions up to day `d`;
/// `cumulative_total[d]` sums the forward-filled traffic, skipping days
/// before the first known traffic value. A ratio point is emitted for a
/// day only where `cumulative_total > 0`.
#[must_use]
pub fn normalize(frame: &AlignedFrame) -> BTreeMap<String, RatioSeries> {
    let mut cumulative_total = Vec::with_capacity(frame.len());
    let mut total_sum: Option<u64> = None;
    for value in frame.total_messages() {
        if let Some(v) = value {
            total_sum = Some(total_sum.unwrap_or(0) + v);
        }
        cumulative_total.push(total_sum);
    }

    frame
        .terms()
        .into_iter()
        .map(|term| {
            let column = frame.mentions(term).unwrap_or(&[]);

            let mut cumulative_mentions = Vec::with_capacity(column.len());
            let mut mention_sum = 0u64;
            for count in column {
                mention_sum += count;
                cumulative_mentions.push(mention_sum);
            }

            let points = frame
                .axis()
                .iter()
                .zip(cumulative_mentions.iter().zip(cumulative_total.iter()))
                .filter_map(|(&date, (&mentions, &total))| match total {
                    Some(total) if total > 0 => Some(RatioPoint {
                        date,
                        ratio: 100.0 * mentions as f64 / total as f64,
                    }),
                    _ => None,
                })
                .collect();

            (
                term.to_string(),
                RatioSeries {
                    term: term.to_string(),
                    cumulative_mentions,
                    cumulative_total: cumulative_total.clone(),
                    points,
                },
            )
        })
        .collect()
}
