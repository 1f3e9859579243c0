//! Configuration types and loading
//!
//! `Config` is the optional YAML file config (model settings, turn cap, log
//! level). `RunConfig` is the immutable per-run input built from the command
//! line.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "FILE_ORGANIZER_CONFIG";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Agent loop configuration
    pub agent: AgentConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path (from `FILE_ORGANIZER_CONFIG`), then `./.file-organizer.yml`,
    /// then `~/.config/file-organizer/file-organizer.yml`, then defaults.
    /// An unreadable fallback file is skipped with a warning on stderr, since
    /// this runs before logging is set up.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".file-organizer.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                    eprintln!("Warning: Failed to load config from {}: {:#}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("file-organizer").join("file-organizer.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                        eprintln!("Warning: Failed to load config from {}: {:#}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Explicit config path from the environment, if set
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (only "anthropic" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 300_000,
        }
    }
}

/// Agent loop configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Stop after this many model calls (unset: run until the model finishes)
    #[serde(rename = "max-turns")]
    pub max_turns: Option<u32>,
}

/// How the model is instructed to behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Propose a plan and ask before mutating anything
    Interactive,
    /// Proceed autonomously; mutating tools only simulate
    Preview,
}

/// Immutable inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory the user asked to organize
    pub target_dir: PathBuf,

    /// Suppress filesystem mutation in every mutating tool
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(target_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            target_dir: target_dir.into(),
            dry_run,
        }
    }

    /// Instruction mode implied by the dry-run flag
    pub fn mode(&self) -> RunMode {
        if self.dry_run { RunMode::Preview } else { RunMode::Interactive }
    }

    /// The opening user turn of the transcript
    pub fn initial_request(&self) -> String {
        format!(
            "Please look at the files in {} and suggest how to organize them.",
            self.target_dir.display()
        )
    }
}
