//! File Organizer - LLM-driven directory tidying
//!
//! An agent that looks at a directory and proposes or carries out a
//! reorganization by calling three filesystem tools. In dry-run mode every
//! mutating tool only reports what it would have done.
//!
//! # Modules
//!
//! - [`agent`] - Agent loop, transcript and run trace
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`tools`] - Filesystem tools and their executor
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod tools;

pub use agent::{AgentEvent, AgentLoop, ConsoleReporter, Reporter, RunOutcome};
pub use config::{Config, RunConfig, RunMode};
pub use llm::{LlmClient, create_client};
pub use tools::{ToolExecutor, ToolResult};
