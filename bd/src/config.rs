//! BurstDispatch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::RunConfig;
use crate::gate::GateStrategy;

/// Project-local config file name
const LOCAL_CONFIG: &str = ".burstdispatch.yml";

/// Largest accepted `client.max-retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Main BurstDispatch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ingestion endpoint configuration
    pub client: ClientConfig,

    /// Burst defaults
    pub burst: BurstConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .burstdispatch.yml
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/burstdispatch/burstdispatch.yml
        if let Some(user_config) = user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed; the full load reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => std::iter::once(PathBuf::from(LOCAL_CONFIG))
                .chain(user_config_path())
                .collect(),
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.client.validate()?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("burstdispatch").join("burstdispatch.yml"))
}

/// Ingestion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL (events are posted to `{base-url}/events`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries for transient failures (0 disables retrying)
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Backoff before the first retry, doubled on each subsequent one
    #[serde(rename = "initial-backoff-ms")]
    pub initial_backoff_ms: u64,
}

impl ClientConfig {
    /// Reject values the client cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_retries > MAX_RETRIES_LIMIT {
            eyre::bail!(
                "client.max-retries is {}, the maximum is {}",
                self.max_retries,
                MAX_RETRIES_LIMIT
            );
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_ms: 10_000,
            max_retries: 0,
            initial_backoff_ms: 250,
        }
    }
}

/// Named gate strategy, as written in config files and on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    SharedQueue,
    Batch,
}

/// Burst defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Number of events per burst
    pub total: usize,

    /// Maximum in-flight submissions
    pub concurrency: usize,

    /// Candidate hashtags
    #[serde(rename = "tag-pool")]
    pub tag_pool: Vec<String>,

    /// Gate strategy
    pub strategy: StrategyKind,

    /// Pause between batches in milliseconds (batch strategy only)
    #[serde(rename = "batch-pause-ms")]
    pub batch_pause_ms: u64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            total: 100,
            concurrency: 20,
            tag_pool: vec!["#AI".to_string(), "#Python".to_string()],
            strategy: StrategyKind::SharedQueue,
            batch_pause_ms: 50,
        }
    }
}

impl BurstConfig {
    /// Gate strategy with its parameters resolved
    pub fn gate_strategy(&self) -> GateStrategy {
        match self.strategy {
            StrategyKind::SharedQueue => GateStrategy::SharedQueue,
            StrategyKind::Batch => GateStrategy::Batch {
                pause: Duration::from_millis(self.batch_pause_ms),
            },
        }
    }

    /// Build the run config for a single burst
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig::new(self.total, self.concurrency, self.tag_pool.iter().cloned()).with_strategy(self.gate_strategy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.client.base_url, "http://localhost:8000/api");
        assert_eq!(config.burst.total, 100);
        assert_eq!(config.burst.concurrency, 20);
        assert_eq!(config.burst.tag_pool, vec!["#AI", "#Python"]);
        assert_eq!(config.burst.strategy, StrategyKind::SharedQueue);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
client:
  base-url: https://ingest.example.com/api
  timeout-ms: 2000
  max-retries: 3
  initial-backoff-ms: 100

burst:
  total: 500
  concurrency: 50
  tag-pool: ["#Rust", "Go", "  "]
  strategy: batch
  batch-pause-ms: 20

log-level: debug
"##;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.client.base_url, "https://ingest.example.com/api");
        assert_eq!(config.client.max_retries, 3);
        assert_eq!(config.burst.total, 500);
        assert_eq!(config.burst.strategy, StrategyKind::Batch);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.burst.gate_strategy(),
            GateStrategy::Batch {
                pause: Duration::from_millis(20)
            }
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
burst:
  total: 5
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.burst.total, 5);

        // Defaults for unspecified
        assert_eq!(config.burst.concurrency, 20);
        assert_eq!(config.client.timeout_ms, 10_000);
    }

    #[test]
    fn test_to_run_config() {
        let burst = BurstConfig {
            total: 5,
            concurrency: 2,
            tag_pool: vec!["#AI".to_string(), "#Go".to_string()],
            ..Default::default()
        };

        let run = burst.to_run_config();
        assert_eq!(run.total, 5);
        assert_eq!(run.concurrency, 2);
        assert_eq!(run.tag_pool, vec!["#AI", "#Go"]);
        assert_eq!(run.strategy, GateStrategy::SharedQueue);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "burst:\n  concurrency: 7\nlog-level: WARN").unwrap();
        let path = file.path().to_path_buf();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.burst.concurrency, 7);
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/burstdispatch.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    fn test_excessive_max_retries_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "client:\n  max-retries: 40").unwrap();
        let path = file.path().to_path_buf();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:?}", err).contains("max-retries"));
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_keeps_kebab_keys() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("base-url"));
        assert!(yaml.contains("tag-pool"));
        assert!(yaml.contains("shared-queue"));
    }
}
