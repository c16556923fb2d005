//! BurstDispatch - synthetic event burst generator
//!
//! CLI entry point for firing bursts at an ingestion API.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use burstdispatch::cli::{BurstArgs, Cli, Command, OutputFormat, resolve_base_url};
use burstdispatch::client::HttpEventClient;
use burstdispatch::config::{ClientConfig, Config};
use burstdispatch::dispatcher::Dispatcher;
use burstdispatch::progress::{ConsoleSink, PresentationSink};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("burstdispatch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("burstdispatch.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("BurstDispatch loaded config: base-url={}", config.client.base_url);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Burst(args) => {
            debug!("main: matched Burst command");
            cmd_burst(&config, &args).await
        }
        Command::Health { base_url } => {
            debug!(?base_url, "main: matched Health command");
            cmd_health(&config, base_url.as_deref()).await
        }
        Command::Config => {
            debug!("main: matched Config command");
            cmd_config(&config)
        }
    }
}

/// Build an HTTP client, honouring a base URL override
fn build_client(config: &Config, base_url: Option<&str>) -> Result<HttpEventClient> {
    let client_config = ClientConfig {
        base_url: resolve_base_url(base_url, config),
        ..config.client.clone()
    };
    HttpEventClient::from_config(&client_config).context("Failed to build HTTP client")
}

/// Run one burst and print its summary
async fn cmd_burst(config: &Config, args: &BurstArgs) -> Result<()> {
    debug!(?args, "cmd_burst: called");
    let burst = args.apply(&config.burst);
    let run_config = burst.to_run_config();

    let client = Arc::new(build_client(config, args.base_url.as_deref())?);
    let sink: Arc<dyn PresentationSink> = Arc::new(ConsoleSink::new(args.quiet));
    let dispatcher = Dispatcher::new(client.clone(), sink.clone());

    sink.log(&format!(
        "Starting burst: {} events, concurrency {}, strategy {} -> {}",
        run_config.total,
        run_config.effective_concurrency(),
        run_config.strategy,
        client.base_url()
    ));

    let report_sink = sink.clone();
    let reporter = move |done: usize, total: usize| {
        debug!(done, total, "cmd_burst: progress");
        if done == total {
            report_sink.log(&format!("Simulated {}/{}", done, total));
        }
    };

    let result = dispatcher.run(&run_config, &reporter).await.context("Burst failed")?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!();
            println!("{}", "Burst summary".bold());
            println!("  finished:  {}", result.finished);
            println!("  succeeded: {}", result.succeeded().to_string().green());
            println!("  failed:    {}", result.failed().to_string().red());
            if let Some(last) = result.last_event_id() {
                println!("  last id:   {}", last);
            }
        }
    }
    Ok(())
}

/// Print the endpoint health report
async fn cmd_health(config: &Config, base_url: Option<&str>) -> Result<()> {
    debug!(?base_url, "cmd_health: called");
    let client = build_client(config, base_url)?;
    let report = client
        .health()
        .await
        .context(format!("Health check against {} failed", client.base_url()))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print the effective configuration
fn cmd_config(config: &Config) -> Result<()> {
    debug!("cmd_config: called");
    print!("{}", config.to_yaml()?);
    Ok(())
}
