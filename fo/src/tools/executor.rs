//! ToolExecutor - validates and dispatches tool calls for a run

use tracing::debug;

use crate::config::RunConfig;
use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{CreateFolderTool, ListDirectoryTool, MoveFileTool};
use super::{Tool, ToolContext, ToolError, ToolInput, ToolResult};

/// Manages tool execution for a run
///
/// Execution is total: every call, including unknown tool names and
/// malformed arguments, produces a `ToolResult`.
pub struct ToolExecutor<'a> {
    ctx: ToolContext<'a>,
}

impl<'a> ToolExecutor<'a> {
    /// Create an executor bound to a run's configuration
    pub fn new(run: &'a RunConfig) -> Self {
        let ctx = ToolContext::new(run);
        debug!(target_dir = ?run.target_dir, dry_run = %ctx.dry_run(), "ToolExecutor::new: called");
        Self { ctx }
    }

    /// Whether mutating tools only simulate in this run
    pub fn dry_run(&self) -> bool {
        self.ctx.dry_run()
    }

    /// Get tool definitions for LLM, in a fixed order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ListDirectoryTool.definition(),
            MoveFileTool.definition(),
            CreateFolderTool.definition(),
        ]
    }

    /// Execute a raw tool call from the model
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        debug!(id = %tool_call.id, name = %tool_call.name, "ToolExecutor::execute: called");
        match ToolInput::parse(&tool_call.name, &tool_call.input) {
            Ok(input) => self.execute_input(input).await,
            Err(e @ ToolError::UnknownTool { .. }) => ToolResult::error(e.to_string()),
            Err(e) => ToolResult::error(format!("Error: {}", e)),
        }
    }

    /// Execute an already validated input
    pub async fn execute_input(&self, input: ToolInput) -> ToolResult {
        debug!(?input, dry_run = %self.dry_run(), "ToolExecutor::execute_input: called");
        match input {
            ToolInput::ListDirectory(args) => ListDirectoryTool.execute(args, &self.ctx).await,
            ToolInput::MoveFile(args) => MoveFileTool.execute(args, &self.ctx).await,
            ToolInput::CreateFolder(args) => CreateFolderTool.execute(args, &self.ctx).await,
        }
    }

}
