//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{BurstConfig, Config, StrategyKind};

/// BurstDispatch - synthetic event burst generator
#[derive(Parser)]
#[command(
    name = "bd",
    about = "Fire bursts of synthetic interaction events at an ingestion API",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate and submit one burst of synthetic events
    Burst(BurstArgs),

    /// Check the ingestion endpoint's health
    Health {
        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

/// Overrides for a single burst; unset flags fall back to the config file
#[derive(Debug, Clone, Default, Args)]
pub struct BurstArgs {
    /// Number of events to submit
    #[arg(short = 'n', long)]
    pub total: Option<usize>,

    /// Maximum in-flight submissions
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Comma-separated hashtag pool (e.g. "#AI,#Rust")
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Concurrency strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Pause between batches in milliseconds (batch strategy)
    #[arg(long)]
    pub batch_pause_ms: Option<u64>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Suppress per-event log lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for the summary
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl BurstArgs {
    /// Layer these flags over the configured burst defaults
    pub fn apply(&self, base: &BurstConfig) -> BurstConfig {
        debug!(?self, "BurstArgs::apply: called");
        let mut burst = base.clone();
        if let Some(total) = self.total {
            burst.total = total;
        }
        if let Some(concurrency) = self.concurrency {
            burst.concurrency = concurrency;
        }
        if let Some(tags) = &self.tags {
            burst.tag_pool = tags.clone();
        }
        if let Some(strategy) = self.strategy {
            burst.strategy = strategy;
        }
        if let Some(pause) = self.batch_pause_ms {
            burst.batch_pause_ms = pause;
        }
        burst
    }
}

/// Resolve the base URL: flag first, then config
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::to_string).unwrap_or_else(|| config.client.base_url.clone())
}

/// Output format for command summaries
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => {
                debug!("OutputFormat::from_str: matched Text");
                Ok(Self::Text)
            }
            "json" => {
                debug!("OutputFormat::from_str: matched Json");
                Ok(Self::Json)
            }
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use text or json", s))
            }
        }
    }
}
