//! File Organizer - CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use file_organizer::agent::{AgentLoop, ConsoleReporter, RunOutcome};
use file_organizer::cli::{Cli, get_log_path};
use file_organizer::config::{Config, RunConfig};
use file_organizer::llm::create_client;

fn parse_level(s: &str) -> tracing::Level {
    match s.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(config_log_level: Option<&str>) -> Result<PathBuf> {
    // Logging isn't initialized yet, so nothing here can trace
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: RUST_LOG > config file > default (INFO)
    let level = config_log_level.map(parse_level).unwrap_or(tracing::Level::INFO);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(log_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(Config::path_from_env().as_ref()).context("Failed to load configuration")?;

    let log_path = setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    debug!(?cli, log_path = %log_path.display(), "main: parsed arguments");

    let run = RunConfig::new(cli.directory, cli.dry_run);
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    info!(model = %config.llm.model, "Using model");

    let reporter = ConsoleReporter;
    let mut agent = AgentLoop::new(llm, &run, &reporter)
        .with_max_tokens(config.llm.max_tokens)
        .with_agent_config(&config.agent);

    match agent.run().await? {
        RunOutcome::Finished { turns } => info!(turns, "Agent finished"),
        RunOutcome::Halted { stop_reason, turns } => warn!(%stop_reason, turns, "Agent halted"),
        RunOutcome::TurnLimit { turns } => warn!(turns, "Agent stopped at turn limit"),
    }

    Ok(())
}
