//! Observable trace of a run
//!
//! The loop emits `AgentEvent`s in the order things happen; a `Reporter`
//! decides how to show them. `ConsoleReporter` prints the human-readable
//! trace to stdout.

use colored::Colorize;

use crate::config::RunMode;
use crate::llm::ToolCall;
use crate::tools::ToolResult;

/// Everything a run makes visible, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// The run started with this request
    Started { request: String, mode: RunMode },
    /// A text segment from the model
    AgentText(String),
    /// The model asked for a tool
    ToolCall(ToolCall),
    /// A tool finished
    ToolResult(ToolResult),
    /// The loop stopped for a reason other than the model finishing
    Warning(String),
    /// The run is over
    Finished,
}

/// Sink for run events
pub trait Reporter: Send + Sync {
    fn report(&self, event: &AgentEvent);
}

/// Prints the run trace to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &AgentEvent) {
        match event {
            AgentEvent::Started { request, mode } => {
                let mode_str = match mode {
                    RunMode::Preview => " [DRY-RUN MODE]",
                    RunMode::Interactive => "",
                };
                let rule = "=".repeat(60);
                println!();
                println!("{}", rule);
                println!("{} {}{}", "User Request:".bright_cyan().bold(), request, mode_str.yellow());
                println!("{}", rule);
                println!();
            }
            AgentEvent::AgentText(text) => {
                println!("{} {}", "Agent:".bright_blue().bold(), text);
                println!();
            }
            AgentEvent::ToolCall(call) => {
                let input = serde_json::to_string_pretty(&call.input).unwrap_or_else(|_| call.input.to_string());
                println!("{} {}", "[Tool Call]".bright_yellow(), call.name.bright_white());
                println!("{} {}", "[Input]".dimmed(), input);
            }
            AgentEvent::ToolResult(result) => {
                if result.is_error {
                    println!("{} {}", "[Result]".red(), result.content);
                } else {
                    println!("{} {}", "[Result]".green(), result.content);
                }
                println!();
            }
            AgentEvent::Warning(message) => {
                println!("{} {}", "[Warning]".yellow().bold(), message);
            }
            AgentEvent::Finished => {
                println!("{}", "[Agent finished]".bright_green());
            }
        }
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Collects events for assertions
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        events: Mutex<Vec<AgentEvent>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<AgentEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn report(&self, event: &AgentEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
