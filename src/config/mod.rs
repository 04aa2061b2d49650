//! Configuration management for tgtrends
//!
//! This module handles loading and validating configuration from environment
//! variables, files, and command-line arguments.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::{AnalysisOptions, Scale};
use crate::ingest::IngestOptions;
use crate::utils::parse_date_bound;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Analysis configuration
    pub analysis: AnalysisConfig,

    /// Ingestion configuration
    pub ingest: IngestConfig,

    /// Output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis-specific configuration: which derived series to produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Produce per-term daily count series
    pub per_term: bool,

    /// Produce the aggregate aligned frame
    pub aggregate: bool,

    /// Produce the linear-scale ratio series
    pub ratio_linear: bool,

    /// Produce the log-scale ratio series
    pub ratio_log: bool,
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Optional start date (dd/mm/yyyy), pre-filters ingestion only
    pub start_date: Option<String>,

    /// Optional end date (dd/mm/yyyy), pre-filters ingestion only
    pub end_date: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory run output folders are created under
    pub dir: PathBuf,

    /// Write the plain-text run report
    pub report: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl AnalysisConfig {
    /// Convert to the engine's options struct
    #[must_use]
    pub fn to_options(&self) -> AnalysisOptions {
        let mut ratio_scales = Vec::new();
        if self.ratio_linear {
            ratio_scales.push(Scale::Linear);
        }
        if self.ratio_log {
            ratio_scales.push(Scale::Logarithmic);
        }

        AnalysisOptions {
            per_term: self.per_term,
            aggregate: self.aggregate,
            ratio_scales,
        }
    }
}

impl IngestConfig {
    /// Parse the configured date bounds into ingestion options
    pub fn to_options(&self) -> Result<IngestOptions> {
        let start = self
            .start_date
            .as_deref()
            .map(|raw| parse_date_bound(raw, false))
            .transpose()?;
        let end = self
            .end_date
            .as_deref()
            .map(|raw| parse_date_bound(raw, true))
            .transpose()?;

        Ok(IngestOptions { start, end })
    }

    /// Parsed bounds, for validation
    fn bounds(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let options = self.to_options()?;
        Ok((options.start, options.end))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let parse_flag = |name: &str, default: bool| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(default)
        };

        let per_term = parse_flag("TGTRENDS_PER_TERM", true);
        let aggregate = parse_flag("TGTRENDS_AGGREGATE", true);
        let ratio_linear = parse_flag("TGTRENDS_RATIO_LINEAR", true);
        let ratio_log = parse_flag("TGTRENDS_RATIO_LOG", true);

        let start_date = std::env::var("TGTRENDS_START_DATE").ok();
        let end_date = std::env::var("TGTRENDS_END_DATE").ok();

        let output_dir = std::env::var("TGTRENDS_OUTPUT_DIR")
            .unwrap_or_else(|_| String::from("output"))
            .into();

        let report = parse_flag("TGTRENDS_REPORT", true);

        let log_level = std::env::var("TGTRENDS_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format = std::env::var("TGTRENDS_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            analysis: AnalysisConfig {
                per_term,
                aggregate,
                ratio_linear,
                ratio_log,
            },
            ingest: IngestConfig {
                start_date,
                end_date,
            },
            output: OutputConfig {
                dir: output_dir,
                report,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if !analysis.per_term
            && !analysis.aggregate
            && !analysis.ratio_linear
            && !analysis.ratio_log
        {
            anyhow::bail!("At least one derived series must be enabled");
        }

        let (start, end) = self.ingest.bounds()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                anyhow::bail!("start_date must not be after end_date");
            }
        }

        if self.output.dir.as_os_str().is_empty() {
            anyhow::bail!("output dir must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                per_term: true,
                aggregate: true,
                ratio_linear: true,
                ratio_log: true,
            },
            ingest: IngestConfig {
                start_date: None,
                end_date: None,
            },
            output: OutputConfig {
                dir: PathBuf::from("output"),
                report: true,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_series_disabled_is_invalid() {
        let mut config = Config::default();
        config.analysis = AnalysisConfig {
            per_term: false,
            aggregate: false,
            ratio_linear: false,
            ratio_log: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reversed_bounds_are_invalid() {
        let mut config = Config::default();
        config.ingest.start_date = Some("02/01/2024".to_string());
        config.ingest.end_date = Some("01/01/2024".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let mut config = Config::default();
        config.ingest.start_date = Some("01/01/2024".to_string());
        config.ingest.end_date = Some("01/01/2024".to_string());
        // start snaps to 00:00:00, end to 23:59:59
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options_conversion() {
        let config = Config::default();
        let options = config.analysis.to_options();
        assert!(options.per_term);
        assert_eq!(options.ratio_scales, vec![Scale::Linear, Scale::Logarithmic]);
    }
}
