use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tgtrends::analytics::Scale;
use tgtrends::commands::{self, AnalyzeParams};
use tgtrends::config::Config;

#[derive(Parser)]
#[command(
    name = "tgtrends",
    version,
    about = "Telegram keyword trend analysis with traffic-normalised time series",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file (TOML); environment variables otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a collector CSV export into trend series and a report
    Analyze {
        /// Collector CSV export to analyse
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for run folders
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Search terms file (one term per line) restricting the run
        #[arg(long)]
        terms_file: Option<PathBuf>,

        /// Start date bound (dd/mm/yyyy), pre-filters ingestion
        #[arg(long)]
        start_date: Option<String>,

        /// End date bound (dd/mm/yyyy), pre-filters ingestion
        #[arg(long)]
        end_date: Option<String>,

        /// Skip per-term daily count series
        #[arg(long, default_value = "false")]
        no_per_term: bool,

        /// Skip the aggregate aligned frame
        #[arg(long, default_value = "false")]
        no_aggregate: bool,

        /// Ratio scales to produce (linear, log); repeatable
        #[arg(long = "scale")]
        scales: Vec<String>,

        /// Skip ratio series entirely
        #[arg(long, default_value = "false")]
        no_ratio: bool,
    },

    /// Show ingestion statistics for a collector export
    Stats {
        /// Collector CSV export to inspect
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("tgtrends starting");

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Analyze {
            input,
            output,
            terms_file,
            start_date,
            end_date,
            no_per_term,
            no_aggregate,
            scales,
            no_ratio,
        } => {
            if let Some(output) = output {
                config.output.dir = output;
            }
            if start_date.is_some() {
                config.ingest.start_date = start_date;
            }
            if end_date.is_some() {
                config.ingest.end_date = end_date;
            }
            if no_per_term {
                config.analysis.per_term = false;
            }
            if no_aggregate {
                config.analysis.aggregate = false;
            }
            if !scales.is_empty() {
                config.analysis.ratio_linear = false;
                config.analysis.ratio_log = false;
                for raw in &scales {
                    match Scale::parse(raw) {
                        Some(Scale::Linear) => config.analysis.ratio_linear = true,
                        Some(Scale::Logarithmic) => config.analysis.ratio_log = true,
                        None => anyhow::bail!("Unknown scale '{raw}', expected linear or log"),
                    }
                }
            }
            if no_ratio {
                config.analysis.ratio_linear = false;
                config.analysis.ratio_log = false;
            }

            tracing::info!(
                input = %input.display(),
                terms_file = ?terms_file,
                "Starting analyze command"
            );
            commands::analyze(&config, &AnalyzeParams { input, terms_file })?;
        }

        Commands::Stats { input } => {
            tracing::info!(input = %input.display(), "Starting stats command");
            commands::stats(input)?;
        }
    }

    tracing::info!("tgtrends completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tgtrends=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("tgtrends=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
