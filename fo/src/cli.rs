//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// File Organizer - let an agent tidy a directory
#[derive(Debug, Parser)]
#[command(
    name = "fo",
    about = "Organize the files in a directory with an LLM agent",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/file-organizer/logs/file-organizer.log\n\
                  Set FILE_ORGANIZER_CONFIG to use a specific config file."
)]
pub struct Cli {
    /// Directory to organize
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Preview the reorganization without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

/// Path of the log file written by the binary
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("file-organizer")
        .join("logs")
        .join("file-organizer.log")
}
